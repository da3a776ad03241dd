//! Error types for the garden content service

use thiserror::Error;

/// The main error type for garden operations
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation failed for {kind} data: {}", .errors.join("; "))]
    ValidationFailed { kind: String, errors: Vec<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("All generations failed: {}", .errors.join("; "))]
    BatchFailed { errors: Vec<String> },

    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl GardenError {
    /// Whether the failure belongs to a single generation attempt (as opposed
    /// to admission, configuration or I/O)
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            GardenError::Decode(_)
                | GardenError::ValidationFailed { .. }
                | GardenError::Transport(_)
        )
    }
}

/// Result type alias for garden operations
pub type Result<T> = std::result::Result<T, GardenError>;

impl From<toml::de::Error> for GardenError {
    fn from(err: toml::de::Error) -> Self {
        GardenError::TomlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for GardenError {
    fn from(err: serde_json::Error) -> Self {
        GardenError::Decode(err.to_string())
    }
}
