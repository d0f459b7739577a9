//! ONNX Runtime backend for the classifier artifact
//!
//! The trained pipeline (TF-IDF vectorizer + Naive Bayes) is exported to
//! ONNX with a string tensor input, an int64 label output, and an
//! sklearn-style probability output. Nothing about the model internals is
//! known here: the session is driven purely through its input/output
//! signature.

use std::path::Path;
use std::sync::Arc;

use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use parking_lot::Mutex;
use spamsift_core::{Error, Result};
use tracing::{debug, info, warn};

use crate::classifier::{ArtifactLoader, LoadedArtifact, SpamModel};

/// Model metadata key the export script stashes the fitted vocabulary under
const VOCABULARY_METADATA_KEY: &str = "vocabulary";

/// Classifier handle backed by an ONNX Runtime session
pub struct OnnxSpamModel {
    name: String,
    // ort sessions need &mut to run
    session: Mutex<Session>,
    input_name: String,
    label_output: String,
    proba_output: String,
}

impl OnnxSpamModel {
    /// Wrap an already-built session, resolving input/output names from its
    /// signature.
    fn from_session(session: Session, name: impl Into<String>) -> Self {
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .first()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "label".to_string())
            });

        let proba_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "probabilities".to_string())
            });

        debug!(
            input = %input_name,
            label = %label_output,
            proba = %proba_output,
            "resolved session signature"
        );

        Self {
            name: name.into(),
            session: Mutex::new(session),
            input_name,
            label_output,
            proba_output,
        }
    }

    /// Build the `[1]` string tensor the exported pipeline expects.
    fn input_tensor(text: &str) -> Result<Tensor<String>> {
        Tensor::from_string_array(([1usize], [text.to_string()].as_slice()))
            .map_err(|e| Error::prediction(format!("failed to build input tensor: {e}")))
    }
}

impl SpamModel for OnnxSpamModel {
    fn predict(&self, text: &str) -> Result<u32> {
        let input = Self::input_tensor(text)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| Error::prediction(format!("inference failed: {e}")))?;

        let output = outputs.get(self.label_output.as_str()).ok_or_else(|| {
            Error::prediction(format!("output '{}' missing", self.label_output))
        })?;

        let (_, data) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| Error::prediction(format!("failed to extract label: {e}")))?;

        let class_id = data
            .first()
            .copied()
            .ok_or_else(|| Error::prediction("empty label output"))?;

        Ok(class_id as u32)
    }

    fn predict_proba(&self, text: &str) -> Result<[f64; 2]> {
        let input = Self::input_tensor(text)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| Error::prediction(format!("inference failed: {e}")))?;

        let output = outputs.get(self.proba_output.as_str()).ok_or_else(|| {
            Error::prediction(format!("output '{}' missing", self.proba_output))
        })?;

        extract_distribution(output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Extract the two-class distribution from either output format sklearn
/// exporters produce: a `[1, 2]` float tensor, or a `seq(map(int64, float))`
/// ZipMap.
fn extract_distribution(output: &DynValue) -> Result<[f64; 2]> {
    if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
        if data.len() < 2 {
            return Err(Error::prediction(format!(
                "probability tensor has {} values, expected 2",
                data.len()
            )));
        }
        return Ok([data[0] as f64, data[1] as f64]);
    }

    if DynSequenceValueType::can_downcast(&output.dtype()) {
        let allocator = Allocator::default();
        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| Error::prediction(format!("failed to downcast probabilities: {e}")))?;

        let maps = sequence
            .try_extract_sequence::<DynMapValueType>(&allocator)
            .map_err(|e| Error::prediction(format!("failed to extract probability maps: {e}")))?;

        let map = maps
            .first()
            .ok_or_else(|| Error::prediction("empty probability sequence"))?;

        let pairs = map
            .try_extract_key_values::<i64, f32>()
            .map_err(|e| Error::prediction(format!("failed to read probability map: {e}")))?;

        let mut distribution = [0.0_f64; 2];
        for (class_id, probability) in pairs {
            match class_id {
                0 => distribution[0] = probability as f64,
                1 => distribution[1] = probability as f64,
                other => {
                    return Err(Error::prediction(format!(
                        "unexpected class id {other} in probability map"
                    )))
                }
            }
        }
        return Ok(distribution);
    }

    Err(Error::prediction(
        "probability output has an unsupported value type",
    ))
}

/// Fitted vocabulary stashed by the export script in the model metadata.
/// Optional display metadata; absence is not an error.
fn read_vocabulary(session: &Session) -> Vec<String> {
    let metadata = match session.metadata() {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(error = %e, "could not read model metadata");
            return Vec::new();
        }
    };

    match metadata.custom(VOCABULARY_METADATA_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(vocabulary) => vocabulary,
            Err(e) => {
                warn!(error = %e, "vocabulary metadata is not a JSON string array");
                Vec::new()
            }
        },
        Ok(None) => {
            debug!("model carries no vocabulary metadata");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "failed to look up vocabulary metadata");
            Vec::new()
        }
    }
}

/// Production [`ArtifactLoader`] building an ONNX Runtime session from the
/// cached artifact file
pub struct OnnxArtifactLoader {
    intra_threads: usize,
}

impl OnnxArtifactLoader {
    /// Loader with single-threaded intra-op execution
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Loader with the given intra-op thread count
    pub fn with_threads(intra_threads: usize) -> Self {
        Self { intra_threads }
    }
}

impl Default for OnnxArtifactLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactLoader for OnnxArtifactLoader {
    fn load(&self, path: &Path) -> Result<LoadedArtifact> {
        if !path.exists() {
            return Err(Error::load(format!(
                "artifact file not found: {}",
                path.display()
            )));
        }

        ort::init()
            .commit()
            .map_err(|e| Error::load(format!("failed to initialize ONNX Runtime: {e}")))?;

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(self.intra_threads))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| {
                Error::load(format!(
                    "failed to deserialize artifact {}: {e}",
                    path.display()
                ))
            })?;

        let vocabulary = read_vocabulary(&session);

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("classifier")
            .to_string();

        info!(
            model = %name,
            path = %path.display(),
            vocabulary = vocabulary.len(),
            "classifier artifact loaded"
        );

        Ok(LoadedArtifact {
            model: Arc::new(OnnxSpamModel::from_session(session, name)),
            vocabulary,
        })
    }
}
