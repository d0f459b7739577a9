//! Artifact source and cache location

use std::path::{Path, PathBuf};

/// Release URL the trained pipeline is published at
pub const DEFAULT_ARTIFACT_URL: &str =
    "https://github.com/Youssouf-Mohamed-Nouh/SpamEmail/releases/download/v1.0/naivebayes.onnx";

/// Cache file next to the working directory, one file, no versioning
pub const DEFAULT_CACHE_PATH: &str = "naivebayes.onnx";

/// Where the classifier artifact is fetched from and cached to.
///
/// Fixed at process start. The cached file is trusted as-is: there is no
/// checksum, no freshness check, and no re-download once the file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// Remote HTTPS URL serving the serialized pipeline
    pub url: String,

    /// Local path the artifact is cached at
    pub cache_path: PathBuf,
}

impl Default for ArtifactLocation {
    fn default() -> Self {
        Self {
            url: DEFAULT_ARTIFACT_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl ArtifactLocation {
    /// Create a location from explicit URL and cache path
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.into(),
        }
    }

    /// Override the remote URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the cache path
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    /// Whether the artifact is already cached locally
    pub fn is_cached(&self) -> bool {
        self.cache_path.exists()
    }

    /// Sibling path downloads are staged at before the atomic rename
    pub(crate) fn staging_path(&self) -> PathBuf {
        let mut name = self.cache_path.as_os_str().to_owned();
        name.push(".part");
        PathBuf::from(name)
    }
}

impl AsRef<Path> for ArtifactLocation {
    fn as_ref(&self) -> &Path {
        &self.cache_path
    }
}
