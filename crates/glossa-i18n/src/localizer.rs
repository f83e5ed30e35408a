//! Resolution engine: the read path from entry ID to text in the active language

use crate::catalog::{CatalogSource, TextCatalog};
use crate::locale::{LocaleProvider, SystemLocale};
use crate::negotiator::LanguageNegotiator;
use crate::resolver::{ReferenceResolver, VariableStore};
use crate::tag::{TagScanner, REF_TAG};
use glossa_common::{LanguageRequest, LanguageSetting};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The user's raw selection and the concrete language it resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Raw selection, possibly `auto`
    pub requested: LanguageRequest,
    /// Configured language driving lookups; never `auto`
    pub active: LanguageSetting,
}

/// Compiled catalog plus active-language state.
///
/// Built once through [`LocalizerBuilder`]; the catalog is read-only from
/// then on and only the language state changes.
pub struct Localizer {
    catalog: TextCatalog,
    negotiator: LanguageNegotiator,
    resolver: Arc<dyn ReferenceResolver>,
    locale: Arc<dyn LocaleProvider>,
    state: RwLock<EngineState>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("entries", &self.catalog.len())
            .field("languages", &self.negotiator.languages())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// Start building a localizer
    pub fn builder() -> LocalizerBuilder {
        LocalizerBuilder::default()
    }

    /// Text of `id` in the active language.
    ///
    /// Templates are evaluated against the current reference values; static
    /// text is borrowed. `None` means there is no text for this ID in the
    /// active language.
    pub fn get(&self, id: &str) -> Option<Cow<'_, str>> {
        let state = self.state.read();
        let content = self.catalog.content(id, &state.active.name)?;
        drop(state);
        Some(content.resolve(self.resolver.as_ref()))
    }

    /// Text of `id` in a specific language
    pub fn get_in(&self, id: &str, language: &str) -> Option<Cow<'_, str>> {
        self.catalog
            .content(id, language)
            .map(|content| content.resolve(self.resolver.as_ref()))
    }

    /// Substitute `<ref:ID>` tags in `text` with the text of those entries.
    ///
    /// Tags without text in the active language are left untouched. This is
    /// a single pass: substituted text is not scanned again, so tags it
    /// contains survive as-is.
    pub fn replace<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut out: Option<String> = None;
        let mut cursor = 0;

        for tag in TagScanner::new(text, REF_TAG) {
            let Some(value) = self.get(tag.key) else {
                continue;
            };

            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[cursor..tag.start]);
            buf.push_str(&value);
            cursor = tag.end;
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&text[cursor..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(text),
        }
    }

    /// [`Localizer::get`] followed by [`Localizer::replace`]
    pub fn text(&self, id: &str) -> Option<String> {
        let text = self.get(id)?;
        Some(self.replace(&text).into_owned())
    }

    /// Code of the active language
    pub fn active(&self) -> String {
        self.state.read().active.name.clone()
    }

    /// Setting of the active language
    pub fn active_setting(&self) -> LanguageSetting {
        self.state.read().active.clone()
    }

    /// The raw language selection
    pub fn requested(&self) -> LanguageRequest {
        self.state.read().requested.clone()
    }

    /// Snapshot of the language state
    pub fn state(&self) -> EngineState {
        self.state.read().clone()
    }

    /// Configured languages in priority order
    pub fn languages(&self) -> &[LanguageSetting] {
        self.negotiator.languages()
    }

    /// The compiled catalog
    pub fn catalog(&self) -> &TextCatalog {
        &self.catalog
    }

    /// Resolve and store a new selection.
    ///
    /// Returns `None` without touching the state when `requested` equals the
    /// stored selection.
    pub(crate) fn switch_language(&self, requested: &LanguageRequest) -> Option<LanguageSetting> {
        let mut state = self.state.write();
        if &state.requested == requested {
            debug!(requested = %requested, "Language selection unchanged");
            return None;
        }

        let active = self.negotiate(requested);
        state.requested = requested.clone();
        state.active = active.clone();
        Some(active)
    }

    fn negotiate(&self, requested: &LanguageRequest) -> LanguageSetting {
        let reported = if requested.is_auto() {
            self.locale.locale()
        } else {
            String::new()
        };
        self.negotiator.resolve(requested, &reported)
    }
}

/// Builder for [`Localizer`]
#[derive(Default)]
pub struct LocalizerBuilder {
    languages: Vec<LanguageSetting>,
    remap: HashMap<String, String>,
    request: LanguageRequest,
    resolver: Option<Arc<dyn ReferenceResolver>>,
    locale: Option<Arc<dyn LocaleProvider>>,
}

impl LocalizerBuilder {
    /// Configured languages; the first is the ultimate fallback
    pub fn languages(mut self, languages: Vec<LanguageSetting>) -> Self {
        self.languages = languages;
        self
    }

    /// Locale alias table applied before automatic matching
    pub fn remap(mut self, remap: HashMap<String, String>) -> Self {
        self.remap = remap;
        self
    }

    /// Initial language selection, `auto` by default
    pub fn request(mut self, request: impl Into<LanguageRequest>) -> Self {
        self.request = request.into();
        self
    }

    /// Store behind `<global:KEY>` tags, an empty [`VariableStore`] by default
    pub fn resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Reported locale for `auto`, the system locale by default
    pub fn locale_provider(mut self, locale: Arc<dyn LocaleProvider>) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Flatten and compile `source`, then resolve the initial language
    pub fn build(self, source: &CatalogSource) -> Localizer {
        let negotiator = LanguageNegotiator::new(self.languages, self.remap);

        let mut catalog = TextCatalog::build(source);
        let names: Vec<&str> = negotiator.languages().iter().map(|l| l.name.as_str()).collect();
        catalog.compile_all(&names);

        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(VariableStore::new()));
        let locale = self.locale.unwrap_or_else(|| Arc::new(SystemLocale));

        let reported = if self.request.is_auto() {
            locale.locale()
        } else {
            String::new()
        };
        let active = negotiator.resolve(&self.request, &reported);

        info!(
            entries = catalog.len(),
            requested = %self.request,
            active = %active.name,
            "Localizer initialized"
        );

        Localizer {
            catalog,
            negotiator,
            resolver,
            locale,
            state: RwLock::new(EngineState {
                requested: self.request,
                active,
            }),
        }
    }
}
