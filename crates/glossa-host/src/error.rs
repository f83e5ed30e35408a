//! Application-wide error types using thiserror.

use glossa_common::GlossaError;
use glossa_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] GlossaError),

    /// Catalog or propagation error.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// A console line that is not a valid command.
    #[error("Invalid command: {0}")]
    Command(String),

    /// `save` without a configuration file to write to.
    #[error("No configuration file to save to")]
    NoConfigPath,
}

/// Result type for the host application.
pub type HostResult<T> = Result<T, HostError>;
