//! Workspace-wide error type.

/// Common result type for the workspace.
pub type GlossaResult<T> = std::result::Result<T, GlossaError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum GlossaError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GlossaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
