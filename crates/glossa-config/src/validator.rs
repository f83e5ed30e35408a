//! Runtime validation of loaded configuration.

use crate::schema::Config;
use glossa_common::{GlossaError, GlossaResult, LanguageRequest};
use std::collections::HashSet;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// An explicit language selection that is not configured is accepted with a
    /// warning; the negotiator falls back to the first configured language.
    pub fn validate(config: &Config) -> GlossaResult<()> {
        let localization = &config.localization;

        if localization.languages.is_empty() {
            return Err(GlossaError::Config(
                "At least one language must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for setting in &localization.languages {
            if !seen.insert(setting.name.as_str()) {
                return Err(GlossaError::Config(format!(
                    "Language '{}' is configured more than once",
                    setting.name
                )));
            }

            if setting.name.parse::<LanguageIdentifier>().is_err() {
                return Err(GlossaError::Config(format!(
                    "Invalid language identifier: {}",
                    setting.name
                )));
            }

            if !setting.scale.is_finite() || setting.scale <= 0.0 {
                return Err(GlossaError::Config(format!(
                    "Scale for language '{}' must be a positive number, got {}",
                    setting.name, setting.scale
                )));
            }
        }

        if let LanguageRequest::Explicit(code) = &localization.language {
            if !seen.contains(code.as_str()) {
                warn!(
                    language = %code,
                    "Requested language is not configured, the first configured language will be used"
                );
            }
        }

        for (from, to) in &localization.remap {
            if !seen.contains(to.as_str()) {
                warn!(from = %from, to = %to, "Locale remap target is not a configured language");
            }
        }

        Ok(())
    }
}
