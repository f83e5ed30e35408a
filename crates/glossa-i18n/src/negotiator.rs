//! Resolution of a language request to one of the configured languages

use glossa_common::{primary_subtag, subtags, LanguageRequest, LanguageSetting};
use std::collections::HashMap;
use tracing::debug;

/// Configured languages plus the locale alias table
#[derive(Debug, Clone, Default)]
pub struct LanguageNegotiator {
    languages: Vec<LanguageSetting>,
    remap: HashMap<String, String>,
}

impl LanguageNegotiator {
    /// Create a negotiator. The order of `languages` is the fallback priority.
    pub fn new(languages: Vec<LanguageSetting>, remap: HashMap<String, String>) -> Self {
        Self { languages, remap }
    }

    /// Configured languages in priority order
    pub fn languages(&self) -> &[LanguageSetting] {
        &self.languages
    }

    /// Locale alias table
    pub fn remap(&self) -> &HashMap<String, String> {
        &self.remap
    }

    /// Resolve `requested` against the configured languages.
    ///
    /// `reported_locale` is only consulted for [`LanguageRequest::Auto`].
    pub fn resolve(&self, requested: &LanguageRequest, reported_locale: &str) -> LanguageSetting {
        resolve_active(requested, &self.languages, reported_locale, &self.remap)
    }
}

/// Resolve a language request to a concrete language setting.
///
/// An explicit code is looked up by exact name. `auto` remaps the reported
/// locale, then picks the configured language sharing its primary subtag with
/// the most subtags in common; ties go to the earlier configured language.
/// Anything unmatched falls back to the first configured language. With no
/// languages configured at all a placeholder setting is synthesized.
pub fn resolve_active(
    requested: &LanguageRequest,
    configured: &[LanguageSetting],
    reported_locale: &str,
    remap: &HashMap<String, String>,
) -> LanguageSetting {
    match requested {
        LanguageRequest::Explicit(code) => {
            if let Some(setting) = configured.iter().find(|setting| &setting.name == code) {
                debug!(language = %code, "Using requested language");
                return setting.clone();
            }
            fallback(configured, code)
        }
        LanguageRequest::Auto => {
            let locale = remap
                .get(reported_locale)
                .map_or(reported_locale, String::as_str);

            if let Some(setting) = best_match(locale, configured) {
                debug!(locale = %locale, language = %setting.name, "Negotiated language from locale");
                return setting.clone();
            }
            fallback(configured, locale)
        }
    }
}

fn fallback(configured: &[LanguageSetting], wanted: &str) -> LanguageSetting {
    match configured.first() {
        Some(first) => {
            debug!(wanted = %wanted, language = %first.name, "Falling back to first configured language");
            first.clone()
        }
        None => {
            debug!(wanted = %wanted, "No languages configured, using a placeholder");
            LanguageSetting::placeholder(wanted)
        }
    }
}

/// The configured language that best matches `locale`, if any shares its primary subtag.
pub fn best_match<'a>(locale: &str, configured: &'a [LanguageSetting]) -> Option<&'a LanguageSetting> {
    let local: Vec<&str> = subtags(locale).collect();
    let primary = primary_subtag(locale);

    let mut best = None;
    let mut max_weight = 0;

    for setting in configured {
        if primary_subtag(&setting.name) != primary {
            continue;
        }

        let weight = subtag_weight(&local, &setting.name);
        if weight > max_weight {
            max_weight = weight;
            best = Some(setting);
        }
    }

    best
}

/// Number of `local` subtags that appear anywhere in `configured`.
fn subtag_weight(local: &[&str], configured: &str) -> usize {
    let theirs: Vec<&str> = subtags(configured).collect();
    local.iter().filter(|subtag| theirs.contains(*subtag)).count()
}
