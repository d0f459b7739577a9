//! Shared application state

use std::sync::Arc;

use parking_lot::RwLock;
use spamsift_model::{ArtifactProvider, OnnxArtifactLoader};

use crate::config::ServeConfig;
use crate::state::RequestStats;

/// State shared across all request handlers.
///
/// The artifact provider is the one process-wide owner of the classifier:
/// handlers reach it through this state instead of any global static, so
/// the lifecycle stays explicit and swappable in tests.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<RwLock<ServeConfig>>,

    /// Once-initialized classifier owner
    pub provider: Arc<ArtifactProvider>,

    /// Request counters for the dashboard
    pub stats: Arc<RequestStats>,
}

impl AppState {
    /// State with the production ONNX loader
    pub fn new(config: ServeConfig) -> Self {
        let provider = Arc::new(ArtifactProvider::new(
            config.artifact_location(),
            Arc::new(OnnxArtifactLoader::with_threads(config.onnx_threads)),
        ));
        Self::with_provider(config, provider)
    }

    /// State with an explicit provider (tests substitute stub loaders here)
    pub fn with_provider(config: ServeConfig, provider: Arc<ArtifactProvider>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            provider,
            stats: Arc::new(RequestStats::new()),
        }
    }
}
