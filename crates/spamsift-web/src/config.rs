//! Server configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spamsift_model::{ArtifactLocation, DEFAULT_ARTIFACT_URL, DEFAULT_CACHE_PATH};

/// Web service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Remote URL the classifier artifact is downloaded from
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Local file the artifact is cached at
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Intra-op thread count for ONNX inference
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

impl ServeConfig {
    /// Load configuration from an optional YAML file, then apply CLI
    /// overrides.
    pub fn load(
        config_path: Option<&Path>,
        model_url: Option<String>,
        model_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)?;
                serde_yaml::from_str(&content)?
            }
            Some(path) => {
                anyhow::bail!("config file not found: {}", path.display());
            }
            None => Self::default(),
        };

        if let Some(url) = model_url {
            config.model_url = url;
        }
        if let Some(path) = model_path {
            config.model_path = path;
        }

        Ok(config)
    }

    /// Artifact source/cache pair for the provider
    pub fn artifact_location(&self) -> ArtifactLocation {
        ArtifactLocation::new(self.model_url.clone(), self.model_path.clone())
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_url: default_model_url(),
            model_path: default_model_path(),
            onnx_threads: default_onnx_threads(),
        }
    }
}

fn default_model_url() -> String {
    DEFAULT_ARTIFACT_URL.to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_onnx_threads() -> usize {
    1
}
