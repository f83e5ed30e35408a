//! Error types for catalog loading and language propagation

use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// The catalog source could not be parsed
    #[error("Failed to parse text catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Failed to load a catalog file
    #[error("Failed to load catalog file {path}: {source}")]
    CatalogLoad {
        /// Path of the catalog file
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A UI element failed to re-pull its text
    #[error("Failed to refresh text of element '{element}': {reason}")]
    RefreshFailed {
        /// Name of the failing element
        element: String,
        /// What went wrong
        reason: String,
    },

    /// The text renderer rejected a font, scale or wrap setting
    #[error("Text renderer rejected {setting}: {reason}")]
    Renderer {
        /// Which setting was rejected: `font`, `scale` or `word wrap`
        setting: &'static str,
        /// What went wrong
        reason: String,
    },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
