use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use spamsift_core::{ClassProbabilities, Error, Prediction};
use spamsift_model::facade;

use crate::state::AppState;

/// How many vocabulary entries the model endpoint returns at most
const VOCABULARY_SAMPLE_SIZE: usize = 50;

// ============================================================================
// Health endpoint
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Configuration endpoint
// ============================================================================

pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.read().clone();
    Json(config)
}

// ============================================================================
// Classification endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// Human-readable label text
    pub label: String,

    /// Probability mass on the predicted class
    pub confidence: f64,

    /// Full per-class distribution
    pub probabilities: ClassProbabilities,
}

impl From<Prediction> for ClassifyResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label.as_str().to_string(),
            confidence: prediction.confidence,
            probabilities: prediction.probabilities,
        }
    }
}

pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    let artifact = match state.provider.get().await {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::error!(error = %e, "classifier unavailable");
            state.stats.record_error(&e);
            return error_response(&e);
        }
    };

    match facade::classify(&request.text, artifact.model.as_ref()) {
        Ok(prediction) => {
            state.stats.record_prediction(prediction.label);
            (StatusCode::OK, Json(ClassifyResponse::from(prediction))).into_response()
        }
        Err(e) => {
            state.stats.record_error(&e);
            error_response(&e)
        }
    }
}

// ============================================================================
// Model metadata endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub name: String,
    pub source_url: String,
    pub cache_path: String,
    pub vocabulary_size: usize,
    /// Bounded sample of the fitted vocabulary, display metadata only
    pub vocabulary_sample: Vec<String>,
}

pub async fn model_info(State(state): State<AppState>) -> Response {
    let artifact = match state.provider.get().await {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::error!(error = %e, "classifier unavailable");
            return error_response(&e);
        }
    };

    let location = state.provider.location();
    let response = ModelInfoResponse {
        name: artifact.model.name().to_string(),
        source_url: location.url.clone(),
        cache_path: location.cache_path.display().to_string(),
        vocabulary_size: artifact.vocabulary.len(),
        vocabulary_sample: artifact
            .vocabulary
            .iter()
            .take(VOCABULARY_SAMPLE_SIZE)
            .cloned()
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

// ============================================================================
// Statistics endpoint
// ============================================================================

pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.stats.snapshot())
}

// ============================================================================
// Error mapping
// ============================================================================

/// Convert an error into its user-visible response. Every failure class is
/// terminal for the request: the message is surfaced and processing stops.
fn error_response(error: &Error) -> Response {
    let status = match error {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Download(_) | Error::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}
