//! Error types for spamsift

/// Result type alias using spamsift's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spamsift operations
///
/// Every variant is terminal for the request that raised it: the caller
/// surfaces the message and stops, nothing is retried automatically and the
/// process keeps running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-success HTTP status while fetching the artifact
    #[error("download error: {0}")]
    Download(String),

    /// Cached artifact file missing or undeserializable
    #[error("model load error: {0}")]
    Load(String),

    /// Rejected user input (empty or whitespace-only text)
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure inside the model's prediction path
    #[error("prediction error: {0}")]
    Prediction(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors around the artifact cache
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Create a new model load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_and_load_are_distinct() {
        let download = Error::download("HTTP 500");
        let load = Error::load("truncated file");

        assert!(matches!(download, Error::Download(_)));
        assert!(matches!(load, Error::Load(_)));
        assert_eq!(download.to_string(), "download error: HTTP 500");
        assert_eq!(load.to_string(), "model load error: truncated file");
    }
}
