//! Text catalog: flattening of the nested source forest into an ID lookup table

use crate::error::{I18nError, I18nResult};
use crate::template::Content;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A node of the catalog source forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceNode {
    /// Grouping node; contributes no entry of its own
    Group {
        /// Nested nodes
        children: Vec<SourceNode>,
    },
    /// Localizable text with one raw string per language
    Entry {
        /// Stable entry ID
        id: String,
        /// Raw text per language code
        contents: HashMap<String, String>,
    },
}

/// The catalog as authored: a forest of groups and entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSource {
    /// Top-level nodes
    pub nodes: Vec<SourceNode>,
}

impl CatalogSource {
    /// Parse a catalog from JSON text
    pub fn from_json_str(text: &str) -> I18nResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> I18nResult<Self> {
        let path = path.as_ref();
        debug!("Loading catalog file: {:?}", path);

        let text = fs::read_to_string(path).map_err(|source| I18nError::CatalogLoad {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        let source = Self::from_json_str(&text)?;
        info!("Loaded catalog from {:?}", path);
        Ok(source)
    }
}

/// One localizable text unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    /// Stable entry ID
    pub id: String,
    /// Content per language code
    pub contents: HashMap<String, Content>,
}

/// Flat mapping from entry ID to per-language content
#[derive(Debug, Clone, Default)]
pub struct TextCatalog {
    entries: HashMap<String, TextEntry>,
}

impl TextCatalog {
    /// Flatten the source forest depth-first.
    ///
    /// Contents stay raw until [`TextCatalog::compile_all`]. When two leaves
    /// share an ID the later one wins and a warning is logged.
    pub fn build(source: &CatalogSource) -> Self {
        let mut catalog = Self::default();
        for node in &source.nodes {
            catalog.flatten(node);
        }
        debug!("Flattened catalog into {} entries", catalog.entries.len());
        catalog
    }

    fn flatten(&mut self, node: &SourceNode) {
        match node {
            SourceNode::Group { children } => {
                for child in children {
                    self.flatten(child);
                }
            }
            SourceNode::Entry { id, contents } => {
                let entry = TextEntry {
                    id: id.clone(),
                    contents: contents
                        .iter()
                        .map(|(language, raw)| (language.clone(), Content::Static(raw.clone())))
                        .collect(),
                };

                if self.entries.insert(id.clone(), entry).is_some() {
                    warn!(id = %id, "Duplicate text entry id, the later entry replaces the earlier one");
                }
            }
        }
    }

    /// Compile the content of every entry for each of `languages`.
    ///
    /// Languages an entry has no text for stay absent.
    pub fn compile_all<S: AsRef<str>>(&mut self, languages: &[S]) {
        let mut templates = 0usize;

        for entry in self.entries.values_mut() {
            for language in languages {
                if let Some(content) = entry.contents.get_mut(language.as_ref()) {
                    if let Content::Static(raw) = content {
                        *content = Content::compile(std::mem::take(raw));
                    }
                    if content.is_template() {
                        templates += 1;
                    }
                }
            }
        }

        debug!(
            entries = self.entries.len(),
            templates, "Compiled catalog contents"
        );
    }

    /// Look up an entry by ID
    pub fn get(&self, id: &str) -> Option<&TextEntry> {
        self.entries.get(id)
    }

    /// Content of an entry in one language
    pub fn content(&self, id: &str, language: &str) -> Option<&Content> {
        self.entries.get(id)?.contents.get(language)
    }

    /// Check if an entry exists
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entry IDs, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Languages an entry has content for, sorted
    pub fn languages_of(&self, id: &str) -> Vec<&str> {
        let mut languages: Vec<&str> = self
            .entries
            .get(id)
            .map(|entry| entry.contents.keys().map(String::as_str).collect())
            .unwrap_or_default();
        languages.sort_unstable();
        languages
    }

    /// `(id, language)` pairs without text, sorted by ID then language order
    pub fn missing_translations<S: AsRef<str>>(&self, languages: &[S]) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for id in self.ids() {
            let entry = &self.entries[id];
            for language in languages {
                let language = language.as_ref();
                if !entry.contents.contains_key(language) {
                    missing.push((id.to_string(), language.to_string()));
                }
            }
        }
        missing
    }
}
