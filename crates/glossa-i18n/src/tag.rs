//! Scanner for embedded reference tags.
//!
//! A tag is a fixed prefix literal, exactly [`KEY_LEN`] ASCII hex digits and a
//! closing `>`, e.g. `<global:00000000000000a1>`. Matches are reported left to
//! right and never overlap. Anything that does not fit the shape exactly is
//! plain text.

/// Number of hex digits in a reference key.
pub const KEY_LEN: usize = 16;

/// Prefix of tags that embed a live variable from the reference store.
pub const GLOBAL_TAG: &str = "<global:";

/// Prefix of tags that embed another catalog entry.
pub const REF_TAG: &str = "<ref:";

const TAG_CLOSE: u8 = b'>';

/// One tag found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Byte offset of the tag's `<`.
    pub start: usize,
    /// Byte offset one past the tag's `>`.
    pub end: usize,
    /// The hex key between prefix and `>`.
    pub key: &'a str,
}

/// Iterator over the tags with a given prefix in a text.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    text: &'a str,
    prefix: &'static str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    /// Scans `text` for tags starting with `prefix`.
    ///
    /// `prefix` must begin with an ASCII character.
    pub const fn new(text: &'a str, prefix: &'static str) -> Self {
        Self {
            text,
            prefix,
            pos: 0,
        }
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while let Some(offset) = self.text.get(self.pos..).and_then(|rest| rest.find(self.prefix)) {
            let start = self.pos + offset;
            let key_start = start + self.prefix.len();
            let key_end = key_start + KEY_LEN;

            let well_formed = bytes
                .get(key_start..key_end)
                .is_some_and(|key| key.iter().all(u8::is_ascii_hexdigit))
                && bytes.get(key_end) == Some(&TAG_CLOSE);

            if well_formed {
                self.pos = key_end + 1;
                return Some(TagMatch {
                    start,
                    end: key_end + 1,
                    key: &self.text[key_start..key_end],
                });
            }

            // Resume right after the opener so a tag nested in the rejected
            // candidate can still match.
            self.pos = start + 1;
        }

        self.pos = self.text.len();
        None
    }
}

/// Returns true if `text` holds at least one tag with `prefix`.
pub fn contains_tag(text: &str, prefix: &'static str) -> bool {
    TagScanner::new(text, prefix).next().is_some()
}
