//! Compilation of catalog text into static strings or live templates.
//!
//! Most catalog text has no `<global:KEY>` tags and is kept as-is. Text with
//! tags is split once into literal segments and filler slots; reading it
//! afterwards only costs one resolver lookup per slot, never a re-scan.

use crate::resolver::ReferenceResolver;
use crate::tag::{contains_tag, TagScanner, GLOBAL_TAG};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Index into [`CompiledTemplate::keys`].
    Filler(usize),
}

/// Text with embedded live variables, evaluated on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    segments: Vec<Segment>,
    keys: Vec<String>,
    literal_len: usize,
}

impl CompiledTemplate {
    fn from_tagged(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut keys = Vec::new();
        let mut literal_len = 0;
        let mut cursor = 0;

        let mut push_literal = |segments: &mut Vec<Segment>, text: &str| {
            if !text.is_empty() {
                literal_len += text.len();
                segments.push(Segment::Literal(text.to_string()));
            }
        };

        for tag in TagScanner::new(raw, GLOBAL_TAG) {
            push_literal(&mut segments, &raw[cursor..tag.start]);
            segments.push(Segment::Filler(keys.len()));
            keys.push(tag.key.to_string());
            cursor = tag.end;
        }
        push_literal(&mut segments, &raw[cursor..]);

        Self {
            segments,
            keys,
            literal_len,
        }
    }

    /// Keys of the filler slots, in text order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Joins the literal segments with the current value of every filler.
    ///
    /// Never mutates the template; two calls may differ when the resolver's
    /// values changed in between.
    pub fn evaluate(&self, resolver: &dyn ReferenceResolver) -> String {
        let mut out = String::with_capacity(self.literal_len + self.keys.len() * 8);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Filler(slot) => match resolver.lookup(&self.keys[*slot]) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(resolver.undefined_repr()),
                },
            }
        }

        out
    }
}

/// Compiled per-language content of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, returned as-is.
    Static(String),
    /// Text with live fillers.
    Template(CompiledTemplate),
}

impl Content {
    /// Compiles raw catalog text. Text without tags stays [`Content::Static`].
    pub fn compile(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if contains_tag(&raw, GLOBAL_TAG) {
            Self::Template(CompiledTemplate::from_tagged(&raw))
        } else {
            Self::Static(raw)
        }
    }

    /// Current text of this content. Static text is borrowed.
    pub fn resolve(&self, resolver: &dyn ReferenceResolver) -> Cow<'_, str> {
        match self {
            Self::Static(text) => Cow::Borrowed(text),
            Self::Template(template) => Cow::Owned(template.evaluate(resolver)),
        }
    }

    /// Returns true for live templates.
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }
}
