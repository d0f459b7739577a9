//! Classifier capability trait and loaded-artifact handle

use std::path::Path;
use std::sync::Arc;

use spamsift_core::Result;

/// Capability interface of the pre-trained classifier.
///
/// The artifact is trained and serialized elsewhere and consumed here as an
/// opaque black box through exactly two read-only operations. Any serialized
/// model format can back this trait without touching the provider or the
/// inference facade.
pub trait SpamModel: Send + Sync {
    /// Predict the class id for one email text: 0 = ham, 1 = spam.
    fn predict(&self, text: &str) -> Result<u32>;

    /// Probability distribution over classes, in class-id order
    /// `[p_ham, p_spam]`.
    fn predict_proba(&self, text: &str) -> Result<[f64; 2]>;

    /// Model identifier for logs and the UI
    fn name(&self) -> &str;
}

/// A deserialized classifier plus its display metadata.
///
/// Immutable after load; shared read-only for the process lifetime.
pub struct LoadedArtifact {
    /// The prediction handle
    pub model: Arc<dyn SpamModel>,

    /// The textual features the vectorizer was fitted on. Informational
    /// only, never consulted during prediction.
    pub vocabulary: Vec<String>,
}

impl std::fmt::Debug for LoadedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `model` is a trait object without a `Debug` bound, so print its
        // name instead of deriving.
        f.debug_struct("LoadedArtifact")
            .field("model", &self.model.name())
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

/// Deserialization seam between the on-disk artifact and the in-memory
/// handle. The production implementation is
/// [`OnnxArtifactLoader`](crate::onnx::OnnxArtifactLoader).
pub trait ArtifactLoader: Send + Sync {
    /// Deserialize the cached artifact file into a classifier handle.
    ///
    /// A missing or malformed file surfaces as [`Error::Load`], distinct
    /// from the download failures raised before this point.
    ///
    /// [`Error::Load`]: spamsift_core::Error::Load
    fn load(&self, path: &Path) -> Result<LoadedArtifact>;
}
