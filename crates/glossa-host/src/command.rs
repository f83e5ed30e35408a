//! Console command parsing.

use crate::error::HostError;
use glossa_common::LanguageRequest;
use serde_json::Value;
use std::str::FromStr;

/// A command read from the console.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the text of an entry in the active language.
    Get(String),
    /// Substitute `<ref:ID>` tags in free text.
    Replace(String),
    /// Change the language selection.
    Lang(LanguageRequest),
    /// Store a live variable.
    Set {
        /// Variable key
        key: String,
        /// New value
        value: Value,
    },
    /// Print every console label.
    Show,
    /// List the configured languages.
    Langs,
    /// Write the configuration back to disk.
    Save,
    /// Leave the console loop.
    Quit,
}

impl FromStr for Command {
    type Err = HostError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));

        match verb {
            "get" => required(verb, rest).map(|id| Self::Get(id.to_string())),
            "replace" => Ok(Self::Replace(rest.to_string())),
            "lang" => required(verb, rest).map(|code| Self::Lang(LanguageRequest::new(code))),
            "set" => {
                let (key, value) = required(verb, rest)?
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| HostError::Command("usage: set <key> <value>".to_string()))?;
                Ok(Self::Set {
                    key: key.to_string(),
                    value: parse_value(value.trim()),
                })
            }
            "show" => Ok(Self::Show),
            "langs" => Ok(Self::Langs),
            "save" => Ok(Self::Save),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(HostError::Command(format!("unknown command '{other}'"))),
        }
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str, HostError> {
    if rest.is_empty() {
        Err(HostError::Command(format!("'{verb}' needs an argument")))
    } else {
        Ok(rest)
    }
}

/// JSON when it parses, a plain string otherwise.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
