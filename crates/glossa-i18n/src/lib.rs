//! # Glossa I18n
//!
//! Localized text compilation and resolution for Glossa.
//!
//! This crate turns a nested catalog of per-language text into a flat lookup
//! table and serves it in the active language:
//!
//! - Catalog flattening and one-time compilation of every entry
//! - Live templates re-embedding `<global:KEY>` variables on every read
//! - Single-pass substitution of `<ref:ID>` cross references
//! - `auto` language negotiation against the system locale
//! - Propagation of language changes to the UI tree and text renderer
//!
//! # Example
//!
//! ```rust
//! use glossa_common::LanguageSetting;
//! use glossa_i18n::{CatalogSource, FixedLocale, Localizer, VariableStore};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = CatalogSource::from_json_str(
//!     r#"[{ "id": "0000000000000001", "contents": { "en": "Score: <global:00000000000000a1>" } }]"#,
//! )?;
//! let store = Arc::new(VariableStore::new());
//! let localizer = Localizer::builder()
//!     .languages(vec![LanguageSetting::placeholder("en")])
//!     .resolver(store.clone())
//!     .locale_provider(Arc::new(FixedLocale::new("en-US")))
//!     .build(&source);
//!
//! store.set("00000000000000a1", 12);
//! assert_eq!(localizer.get("0000000000000001").as_deref(), Some("Score: 12"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod locale;
pub mod localizer;
pub mod negotiator;
pub mod propagation;
pub mod resolver;
pub mod tag;
pub mod template;

pub use catalog::{CatalogSource, SourceNode, TextCatalog, TextEntry};
pub use error::{I18nError, I18nResult};
pub use locale::{system_locale, FixedLocale, LocaleProvider, SystemLocale};
pub use localizer::{EngineState, Localizer, LocalizerBuilder};
pub use negotiator::{best_match, resolve_active, LanguageNegotiator};
pub use propagation::{
    refresh_tree, LanguageChange, LanguageChanged, PropagationController, TextRefresh,
    TextRenderer, UiElement,
};
pub use resolver::{ReferenceResolver, VariableStore};
pub use template::{CompiledTemplate, Content};
