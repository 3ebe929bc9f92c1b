//! Error types for cron-formats

/// Result type for cron-formats operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("the {format} format does not support {operation}")]
    Unsupported {
        format: &'static str,
        operation: &'static str,
    },

    #[error("unknown format: {0}")]
    UnknownFormat(String),
}
