//! Test utilities and shared test helpers for Glossa.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use crate::LanguageSetting;
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Builds a language list from bare codes, each with an empty font and scale 1.
pub fn languages(codes: &[&str]) -> Vec<LanguageSetting> {
    codes.iter().map(|code| LanguageSetting::placeholder(*code)).collect()
}

/// Catalog fixtures in the JSON source format.
pub mod catalog_fixtures {
    /// Key of the live score variable referenced by [`sample_catalog_json`].
    pub const SCORE_KEY: &str = "00000000000000a1";

    /// ID of the templated score entry.
    pub const SCORE_ID: &str = "1000000000000003";

    /// A small nested catalog with a template entry and a cross reference.
    pub fn sample_catalog_json() -> &'static str {
        r#"[
  {
    "children": [
      {
        "id": "1000000000000001",
        "contents": { "en": "Start", "fr": "Commencer", "zh-TW": "開始" }
      },
      {
        "children": [
          {
            "id": "1000000000000002",
            "contents": { "en": "Options", "fr": "Options" }
          }
        ]
      }
    ]
  },
  {
    "id": "1000000000000003",
    "contents": {
      "en": "Score: <global:00000000000000a1>",
      "fr": "Points : <global:00000000000000a1>"
    }
  },
  {
    "id": "1000000000000004",
    "contents": { "en": "Press <ref:1000000000000001> to begin", "fr": "Appuyez sur <ref:1000000000000001>" }
  }
]"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
localization:
  language: auto
  languages:
    - name: en
    - name: fr
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "localization:\n",
            "  language: \"zh-TW\"\n",
            "  catalog: \"texts/catalog.json\"\n",
            "  languages:\n",
            "    - name: en\n",
            "      font: \"Noto Sans\"\n",
            "      scale: 1.0\n",
            "    - name: ja\n",
            "      font: \"Noto Sans JP\"\n",
            "      scale: 0.9\n",
            "    - name: zh-TW\n",
            "      font: \"Noto Sans TC\"\n",
            "      scale: 0.9\n",
            "  remap:\n",
            "    zh-HK: zh-TW\n",
            "  break_anywhere:\n",
            "    - ja\n",
            "    - zh-TW\n",
            "\n",
            "logging:\n",
            "  level: debug\n",
            "  json: true\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating 16-digit hex reference keys.
    pub fn reference_key_strategy() -> impl Strategy<Value = String> {
        r"[0-9a-f]{16}".prop_map(|s| s)
    }

    /// Strategy for generating text that never contains a tag opener.
    pub fn tag_free_text_strategy() -> impl Strategy<Value = String> {
        r"[^<]{0,64}".prop_map(|s| s)
    }

    /// Strategy for generating dash-separated language codes.
    pub fn language_code_strategy() -> impl Strategy<Value = String> {
        r"[a-z]{2}(-[A-Z]{2})?".prop_map(|s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_languages_fixture() {
        let list = languages(&["en", "fr"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "en");
        assert!(list[1].font.is_empty());
        assert!((list[1].scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sample_catalog_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(catalog_fixtures::sample_catalog_json()).unwrap();
        assert!(value.is_array());
    }

    #[cfg(feature = "proptest")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_property_reference_key_shape(key in property_testing::reference_key_strategy()) {
                prop_assert_eq!(key.len(), 16);
                prop_assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
            }

            #[test]
            fn test_property_tag_free_text(text in property_testing::tag_free_text_strategy()) {
                prop_assert!(!text.contains('<'));
            }
        }
    }
}
