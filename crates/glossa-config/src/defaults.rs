//! Default values for the configuration schema.

use crate::schema::*;
use glossa_common::{LanguageRequest, LanguageSetting};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.json";

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            language: LanguageRequest::Auto,
            languages: default_languages(),
            remap: default_remap(),
            break_anywhere: default_break_anywhere(),
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}

/// Shipped languages. The first entry is the ultimate fallback.
pub fn default_languages() -> Vec<LanguageSetting> {
    vec![
        LanguageSetting::new("en", "Noto Sans", 1.0),
        LanguageSetting::new("fr", "Noto Sans", 1.0),
        LanguageSetting::new("de", "Noto Sans", 1.0),
        LanguageSetting::new("ja", "Noto Sans JP", 1.0),
        LanguageSetting::new("zh-CN", "Noto Sans SC", 1.0),
        LanguageSetting::new("zh-TW", "Noto Sans TC", 1.0),
    ]
}

/// Known locale aliases, collapsing regional Chinese variants onto the
/// two shipped script variants.
pub fn default_remap() -> HashMap<String, String> {
    [
        ("zh-HK", "zh-TW"),
        ("zh-MO", "zh-TW"),
        ("zh-Hant", "zh-TW"),
        ("zh-Hant-TW", "zh-TW"),
        ("zh-Hant-HK", "zh-TW"),
        ("zh-Hant-MO", "zh-TW"),
        ("zh-SG", "zh-CN"),
        ("zh-Hans", "zh-CN"),
        ("zh-Hans-CN", "zh-CN"),
        ("zh-Hans-SG", "zh-CN"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

/// Languages without word separators.
pub fn default_break_anywhere() -> Vec<String> {
    ["zh", "zh-CN", "zh-TW", "ja"]
        .into_iter()
        .map(String::from)
        .collect()
}
