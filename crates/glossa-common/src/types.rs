//! Common type definitions for language selection and text layout.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selector value that asks the engine to negotiate against the system locale.
pub const AUTO_LANGUAGE: &str = "auto";

/// A configured language: its code plus the font and text scale used to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSetting {
    /// Language code, e.g. `en` or `zh-TW`.
    pub name: String,
    /// Font family applied while this language is active.
    #[serde(default)]
    pub font: String,
    /// Text scale factor applied while this language is active.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

const fn default_scale() -> f32 {
    1.0
}

impl LanguageSetting {
    /// Creates a language setting.
    pub fn new(name: impl Into<String>, font: impl Into<String>, scale: f32) -> Self {
        Self {
            name: name.into(),
            font: font.into(),
            scale,
        }
    }

    /// Stand-in setting used when no languages are configured at all.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, String::new(), 1.0)
    }
}

/// The user's raw language selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageRequest {
    /// Negotiate against the reported system locale.
    #[default]
    Auto,
    /// Use this language code.
    Explicit(String),
}

impl LanguageRequest {
    /// Creates an explicit request for `code`, or [`LanguageRequest::Auto`] for `"auto"`.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        if code == AUTO_LANGUAGE {
            Self::Auto
        } else {
            Self::Explicit(code)
        }
    }

    /// Returns true for the `auto` selector.
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The raw selector text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => AUTO_LANGUAGE,
            Self::Explicit(code) => code,
        }
    }
}

impl fmt::Display for LanguageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageRequest {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<String> for LanguageRequest {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for LanguageRequest {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<LanguageRequest> for String {
    fn from(value: LanguageRequest) -> Self {
        match value {
            LanguageRequest::Auto => AUTO_LANGUAGE.to_string(),
            LanguageRequest::Explicit(code) => code,
        }
    }
}

/// Line breaking policy pushed to the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordWrap {
    /// Lines may break between any two characters.
    BreakAnywhere,
    /// Words are kept together; lines break at whitespace.
    KeepTogether,
}

impl WordWrap {
    /// Picks the policy for `language` given the break-anywhere language set.
    pub fn for_language<S: AsRef<str>>(language: &str, break_anywhere: &[S]) -> Self {
        if break_anywhere.iter().any(|code| code.as_ref() == language) {
            Self::BreakAnywhere
        } else {
            Self::KeepTogether
        }
    }
}

impl fmt::Display for WordWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreakAnywhere => f.write_str("break-anywhere"),
            Self::KeepTogether => f.write_str("keep-together"),
        }
    }
}
