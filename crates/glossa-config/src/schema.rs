//! Configuration schema definitions using serde with validation attributes.

use crate::validator::ConfigValidator;
use glossa_common::{GlossaResult, LanguageRequest, LanguageSetting};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure for Glossa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Localization configuration.
    pub localization: LocalizationConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Localization configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// The user's language selection, `auto` or a configured code.
    pub language: LanguageRequest,
    /// Configured languages in fallback priority order.
    pub languages: Vec<LanguageSetting>,
    /// Locale aliases applied before automatic matching.
    pub remap: HashMap<String, String>,
    /// Languages rendered with the break-anywhere wrap policy.
    pub break_anywhere: Vec<String>,
    /// Path to the text catalog JSON file.
    pub catalog: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON formatted log lines.
    pub json: bool,
    /// Directory for a daily rolling log file, if any.
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> GlossaResult<()> {
        ConfigValidator::validate(self)
    }
}

impl LocalizationConfig {
    /// Looks up a configured language by exact name.
    pub fn language(&self, name: &str) -> Option<&LanguageSetting> {
        self.languages.iter().find(|setting| setting.name == name)
    }
}
