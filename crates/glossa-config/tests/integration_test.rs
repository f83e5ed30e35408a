//! Integration tests for glossa-config crate.

use glossa_common::test_utils::{config_fixtures, create_temp_dir, init_test_logging};
use glossa_common::{LanguageRequest, LanguageSetting};
use glossa_config::{Config, ConfigCache, ConfigFormat, ConfigLoader};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Defaults ship a usable language list
    assert!(config.validate().is_ok());

    // Removing every language makes it unusable
    config.localization.languages.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_cache() {
    let config = Config::default();
    let cache = ConfigCache::new(config.clone());

    // Should be able to get the config
    let cached_config = cache.get();
    assert_eq!(cached_config.localization.language, config.localization.language);

    // Should be able to update the config
    let mut new_config = config;
    new_config.localization.language = LanguageRequest::new("fr");
    cache.update(new_config);

    let updated_config = cache.get();
    assert_eq!(updated_config.localization.language.as_str(), "fr");
}

#[test]
fn test_cache_set_language_keeps_other_fields() {
    let cache = ConfigCache::default();
    let before = cache.get();

    cache.set_language(&LanguageRequest::new("ja"));

    let after = cache.get();
    assert_eq!(after.localization.language.as_str(), "ja");
    assert_eq!(after.localization.languages, before.localization.languages);
    assert_eq!(after.logging, before.logging);
}

#[test]
fn test_full_yaml_fixture() {
    let config = ConfigFormat::Yaml
        .parse(config_fixtures::full_config_yaml())
        .unwrap();

    assert_eq!(config.localization.language.as_str(), "zh-TW");
    assert_eq!(config.localization.languages.len(), 3);
    assert_eq!(
        config.localization.language("ja"),
        Some(&LanguageSetting::new("ja", "Noto Sans JP", 0.9))
    );
    assert_eq!(config.localization.remap.get("zh-HK").map(String::as_str), Some("zh-TW"));
    assert_eq!(config.localization.break_anywhere, ["ja", "zh-TW"]);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[tokio::test]
async fn test_load_minimal_yaml() {
    init_test_logging();

    let dir = create_temp_dir();
    let path = dir.path().join("glossa.yaml");
    std::fs::write(&path, config_fixtures::minimal_config_yaml()).unwrap();

    let config = ConfigLoader::new(&path).load().await.unwrap();
    assert!(config.localization.language.is_auto());
    assert_eq!(config.localization.languages.len(), 2);
    // Unset sections fall back to defaults
    assert!(!config.localization.remap.is_empty());
}

#[tokio::test]
async fn test_load_rejects_invalid_config() {
    let dir = create_temp_dir();
    let path = dir.path().join("glossa.json");
    std::fs::write(&path, r#"{ "localization": { "languages": [] } }"#).unwrap();

    assert!(ConfigLoader::new(&path).load().await.is_err());
}

#[tokio::test]
async fn test_missing_file_falls_back_to_defaults() {
    let dir = create_temp_dir();
    let loader = ConfigLoader::new(dir.path().join("absent.yaml"));

    let config = loader.load_or_default().await.unwrap();
    assert_eq!(config, Config::default());
}

#[tokio::test]
async fn test_save_then_load_toml() {
    let dir = create_temp_dir();
    let loader = ConfigLoader::new(dir.path().join("glossa.toml"));

    let mut config = Config::default();
    config.localization.language = LanguageRequest::new("de");
    config.logging.level = "warn".to_string();

    loader.save(&config).await.unwrap();
    let loaded = loader.load().await.unwrap();

    assert_eq!(loaded.localization.language.as_str(), "de");
    assert_eq!(loaded.logging.level, "warn");
    assert_eq!(loaded.localization.languages, config.localization.languages);
}

mod property_tests {
    use super::*;
    use glossa_common::test_utils::property_testing::language_code_strategy;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_property_distinct_codes_validate(
            codes in proptest::collection::hash_set(language_code_strategy(), 1..6)
        ) {
            let mut config = Config::default();
            config.localization.languages = codes
                .iter()
                .map(|code| LanguageSetting::new(code.as_str(), "Noto Sans", 1.0))
                .collect();
            prop_assert!(config.validate().is_ok());
        }
    }
}
