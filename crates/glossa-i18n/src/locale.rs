//! Detection of the runtime's reported locale

use glossa_common::normalize_locale_tag;
use std::env;

/// Locale reported when the system offers nothing usable
pub const FALLBACK_LOCALE: &str = "en";

/// Source of the locale that `auto` negotiates against
pub trait LocaleProvider: Send + Sync {
    /// The reported locale as a dash-separated tag, e.g. `en-US`
    fn locale(&self) -> String;
}

/// Reports the operating system's locale
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleProvider for SystemLocale {
    fn locale(&self) -> String {
        system_locale()
    }
}

/// Reports a fixed locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    /// Creates a provider that always reports `tag`
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl LocaleProvider for FixedLocale {
    fn locale(&self) -> String {
        self.0.clone()
    }
}

/// The system locale, normalized to a dash-separated tag.
///
/// Asks the platform first, then the `LC_ALL` and `LANG` environment
/// variables, and reports [`FALLBACK_LOCALE`] if none yields a usable tag.
pub fn system_locale() -> String {
    locale_from(sys_locale::get_locale(), |var| env::var(var).ok())
}

/// Environment variables consulted when the platform reports nothing usable.
const LOCALE_VARS: [&str; 2] = ["LC_ALL", "LANG"];

fn locale_from(platform: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> String {
    platform
        .and_then(|raw| normalize_locale_tag(&raw))
        .or_else(|| {
            LOCALE_VARS
                .into_iter()
                .filter_map(&lookup)
                .find_map(|raw| normalize_locale_tag(&raw))
        })
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_locale() {
        assert_eq!(FixedLocale::new("zh-HK").locale(), "zh-HK");
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_platform_locale_wins() {
        let locale = locale_from(Some("fr_CA".to_string()), vars(&[("LC_ALL", "de_DE.UTF-8")]));
        assert_eq!(locale, "fr-CA");
    }

    #[test]
    fn test_lc_all_before_lang() {
        let env = vars(&[("LANG", "ja_JP.UTF-8"), ("LC_ALL", "zh_TW.UTF-8")]);
        assert_eq!(locale_from(None, &env), "zh-TW");
        assert_eq!(locale_from(None, vars(&[("LANG", "ja_JP.UTF-8")])), "ja-JP");
    }

    #[test]
    fn test_unusable_values_are_skipped() {
        let env = vars(&[("LC_ALL", "C.UTF-8"), ("LANG", "pt_BR.UTF-8")]);
        assert_eq!(locale_from(Some("POSIX".to_string()), env), "pt-BR");
    }

    #[test]
    fn test_nothing_usable_reports_fallback() {
        assert_eq!(locale_from(None, vars(&[])), FALLBACK_LOCALE);
        assert_eq!(locale_from(Some("C".to_string()), vars(&[("LANG", "")])), "en");
    }

    #[test]
    fn test_system_locale_is_a_tag() {
        let locale = system_locale();
        assert!(!locale.is_empty());
        assert!(!locale.contains('_'));
        assert!(!locale.contains('.'));
    }
}
