//! Locale tag helpers shared by the negotiator and the host.

/// Separator between subtags in language codes and locale tags.
pub const SUBTAG_SEPARATOR: char = '-';

/// Splits a language code into its subtags, e.g. `zh-TW` into `["zh", "TW"]`.
pub fn subtags(tag: &str) -> impl Iterator<Item = &str> {
    tag.split(SUBTAG_SEPARATOR)
}

/// Returns the first subtag of a language code.
pub fn primary_subtag(tag: &str) -> &str {
    subtags(tag).next().unwrap_or_default()
}

/// Normalizes a POSIX-style locale string into a dash-separated tag.
///
/// Strips the `.encoding` and `@modifier` parts and turns `_` into `-`,
/// so `en_US.UTF-8` becomes `en-US`. Returns `None` for empty input and
/// for the `C`/`POSIX` pseudo-locales.
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let tag = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");

    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        None
    } else {
        Some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtags() {
        assert_eq!(subtags("zh-Hant-TW").collect::<Vec<_>>(), ["zh", "Hant", "TW"]);
        assert_eq!(subtags("en").collect::<Vec<_>>(), ["en"]);
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("zh-TW"), "zh");
        assert_eq!(primary_subtag("fr"), "fr");
        assert_eq!(primary_subtag(""), "");
    }

    #[test]
    fn test_normalize_locale_tag() {
        assert_eq!(normalize_locale_tag("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(normalize_locale_tag("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(normalize_locale_tag("zh-TW").as_deref(), Some("zh-TW"));
        assert_eq!(normalize_locale_tag("C.UTF-8"), None);
        assert_eq!(normalize_locale_tag("POSIX"), None);
        assert_eq!(normalize_locale_tag("  "), None);
    }
}
