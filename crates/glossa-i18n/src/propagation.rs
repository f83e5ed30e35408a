//! Propagation of language changes to the UI tree, subscribers and the text renderer

use crate::error::{I18nError, I18nResult};
use crate::localizer::Localizer;
use glossa_common::{LanguageRequest, LanguageSetting, WordWrap};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

const NOTIFICATION_CAPACITY: usize = 16;

/// Broadcast sent after every applied language change.
///
/// Carries no payload; subscribers re-query the [`Localizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChanged;

/// Consumer of the active language's rendering settings.
///
/// The three settings are applied independently; there is no atomic
/// combined update.
#[cfg_attr(test, mockall::automock)]
pub trait TextRenderer {
    /// Switch the font family
    fn set_font(&mut self, font: &str) -> I18nResult<()>;

    /// Switch the text scale factor
    fn set_scale(&mut self, scale: f32) -> I18nResult<()>;

    /// Switch the line breaking policy
    fn set_word_wrap(&mut self, policy: WordWrap) -> I18nResult<()>;
}

/// Capability of a UI element to re-pull its localized text
pub trait TextRefresh {
    /// Re-read text from `localizer`
    fn refresh_text(&self, localizer: &Localizer) -> I18nResult<()>;
}

/// A node of the live UI tree
pub trait UiElement {
    /// Direct children, in display order
    fn children(&self) -> Vec<&dyn UiElement> {
        Vec::new()
    }

    /// The text refresh capability, if this element has one
    fn text_refresh(&self) -> Option<&dyn TextRefresh> {
        None
    }
}

/// Outcome of a language change request
#[derive(Debug)]
pub enum LanguageChange {
    /// The request equals the stored selection; nothing happened
    Unchanged,
    /// The language was switched and every consumer was updated
    Applied {
        /// Newly active language
        active: String,
    },
    /// The language was switched but propagation stopped at an error.
    ///
    /// The active language stays switched.
    Degraded {
        /// Newly active language
        active: String,
        /// The failure that stopped propagation
        error: I18nError,
    },
}

impl LanguageChange {
    /// Returns true if the active language state was updated
    pub const fn is_switched(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Applies language changes and fans them out.
///
/// On a change it updates the [`Localizer`] state, refreshes every element of
/// the UI tree that can refresh its text, broadcasts [`LanguageChanged`] and
/// finally pushes font, scale and word wrap to the [`TextRenderer`].
pub struct PropagationController<R: TextRenderer> {
    localizer: Arc<Localizer>,
    renderer: R,
    break_anywhere: Vec<String>,
    notifier: broadcast::Sender<LanguageChanged>,
}

impl<R: TextRenderer> PropagationController<R> {
    /// Create a controller.
    ///
    /// `break_anywhere` lists the languages rendered with
    /// [`WordWrap::BreakAnywhere`].
    pub fn new(localizer: Arc<Localizer>, renderer: R, break_anywhere: Vec<String>) -> Self {
        let (notifier, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            localizer,
            renderer,
            break_anywhere,
            notifier,
        }
    }

    /// Receive a [`LanguageChanged`] for every applied change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.notifier.subscribe()
    }

    /// The engine whose state this controller drives
    pub fn localizer(&self) -> &Arc<Localizer> {
        &self.localizer
    }

    /// The text renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Push the language resolved at startup to every consumer
    pub fn initialize(&mut self, root: &dyn UiElement) -> LanguageChange {
        let active = self.localizer.active_setting();
        self.propagate(active, root)
    }

    /// Switch to `requested` and propagate the change.
    ///
    /// Nothing happens if `requested` equals the stored selection. Failures
    /// while propagating are logged and reported, never raised, and do not
    /// roll back the language switch.
    pub fn set_language(
        &mut self,
        requested: impl Into<LanguageRequest>,
        root: &dyn UiElement,
    ) -> LanguageChange {
        let requested = requested.into();
        match self.localizer.switch_language(&requested) {
            Some(active) => self.propagate(active, root),
            None => LanguageChange::Unchanged,
        }
    }

    fn propagate(&mut self, active: LanguageSetting, root: &dyn UiElement) -> LanguageChange {
        match self.fan_out(&active, root) {
            Ok(refreshed) => {
                info!(language = %active.name, refreshed, "Language applied");
                LanguageChange::Applied {
                    active: active.name,
                }
            }
            Err(error) => {
                error!(language = %active.name, %error, "Language change propagation failed");
                LanguageChange::Degraded {
                    active: active.name,
                    error,
                }
            }
        }
    }

    fn fan_out(&mut self, active: &LanguageSetting, root: &dyn UiElement) -> I18nResult<usize> {
        let refreshed = refresh_tree(&self.localizer, root)?;

        if self.notifier.send(LanguageChanged).is_err() {
            debug!("No language change subscribers");
        }

        self.renderer.set_font(&active.font)?;
        self.renderer.set_scale(active.scale)?;
        self.renderer
            .set_word_wrap(WordWrap::for_language(&active.name, &self.break_anywhere))?;

        Ok(refreshed)
    }
}

/// Walk the tree depth-first and refresh every element that has the capability.
///
/// Returns the number of refreshed elements. Stops at the first failure.
pub fn refresh_tree(localizer: &Localizer, root: &dyn UiElement) -> I18nResult<usize> {
    let mut stack = vec![root];
    let mut refreshed = 0;

    while let Some(element) = stack.pop() {
        if let Some(refresh) = element.text_refresh() {
            refresh.refresh_text(localizer)?;
            refreshed += 1;
        }
        stack.extend(element.children().into_iter().rev());
    }

    Ok(refreshed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::locale::FixedLocale;
    use glossa_common::test_utils::{catalog_fixtures::sample_catalog_json, init_test_logging};
    use mockall::predicate::eq;
    use parking_lot::Mutex;

    type TextLog = Arc<Mutex<Vec<String>>>;

    struct Label {
        id: &'static str,
        log: TextLog,
    }

    impl TextRefresh for Label {
        fn refresh_text(&self, localizer: &Localizer) -> I18nResult<()> {
            let text = localizer.get(self.id).unwrap_or_default();
            self.log.lock().push(text.into_owned());
            Ok(())
        }
    }

    impl UiElement for Label {
        fn text_refresh(&self) -> Option<&dyn TextRefresh> {
            Some(self)
        }
    }

    struct Broken;

    impl TextRefresh for Broken {
        fn refresh_text(&self, _localizer: &Localizer) -> I18nResult<()> {
            Err(I18nError::RefreshFailed {
                element: "broken".to_string(),
                reason: "detached".to_string(),
            })
        }
    }

    impl UiElement for Broken {
        fn text_refresh(&self) -> Option<&dyn TextRefresh> {
            Some(self)
        }
    }

    struct Panel {
        children: Vec<Box<dyn UiElement>>,
    }

    impl UiElement for Panel {
        fn children(&self) -> Vec<&dyn UiElement> {
            self.children.iter().map(|child| child.as_ref()).collect()
        }
    }

    fn label(id: &'static str, log: &TextLog) -> Box<dyn UiElement> {
        Box::new(Label {
            id,
            log: log.clone(),
        })
    }

    fn localizer(request: &str) -> Arc<Localizer> {
        let source = CatalogSource::from_json_str(sample_catalog_json()).unwrap();
        Arc::new(
            Localizer::builder()
                .languages(vec![
                    LanguageSetting::new("en", "Noto Sans", 1.0),
                    LanguageSetting::new("zh-TW", "Noto Sans TC", 0.9),
                ])
                .request(request)
                .locale_provider(Arc::new(FixedLocale::new("zh-HK")))
                .build(&source),
        )
    }

    fn permissive_renderer() -> MockTextRenderer {
        let mut renderer = MockTextRenderer::new();
        renderer.expect_set_font().returning(|_| Ok(()));
        renderer.expect_set_scale().returning(|_| Ok(()));
        renderer.expect_set_word_wrap().returning(|_| Ok(()));
        renderer
    }

    #[test]
    fn test_applies_settings_to_renderer() {
        init_test_logging();

        let mut renderer = MockTextRenderer::new();
        renderer
            .expect_set_font()
            .withf(|font| font == "Noto Sans TC")
            .times(1)
            .returning(|_| Ok(()));
        renderer
            .expect_set_scale()
            .with(eq(0.9_f32))
            .times(1)
            .returning(|_| Ok(()));
        renderer
            .expect_set_word_wrap()
            .with(eq(WordWrap::BreakAnywhere))
            .times(1)
            .returning(|_| Ok(()));

        let mut controller =
            PropagationController::new(localizer("en"), renderer, vec!["zh-TW".to_string()]);
        let root = Panel { children: vec![] };

        let change = controller.set_language("zh-TW", &root);
        assert!(matches!(change, LanguageChange::Applied { ref active } if active == "zh-TW"));
    }

    #[test]
    fn test_same_request_is_a_no_op() {
        let mut renderer = MockTextRenderer::new();
        renderer.expect_set_font().times(0);
        renderer.expect_set_scale().times(0);
        renderer.expect_set_word_wrap().times(0);

        let mut controller = PropagationController::new(localizer("en"), renderer, vec![]);
        let mut events = controller.subscribe();
        let root = Panel { children: vec![] };

        assert!(matches!(controller.set_language("en", &root), LanguageChange::Unchanged));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_refreshes_tree_in_order_and_notifies() {
        let log = TextLog::default();
        let root = Panel {
            children: vec![
                label("1000000000000001", &log),
                Box::new(Panel {
                    children: vec![label("1000000000000002", &log)],
                }),
                label("1000000000000004", &log),
            ],
        };

        let mut controller =
            PropagationController::new(localizer("zh-TW"), permissive_renderer(), vec![]);
        let mut events = controller.subscribe();

        let change = controller.set_language("en", &root);
        assert!(change.is_switched());
        // Labels re-pull in display order, refs are not substituted by get
        assert_eq!(
            *log.lock(),
            ["Start", "Options", "Press <ref:1000000000000001> to begin"]
        );
        assert_eq!(events.try_recv().unwrap(), LanguageChanged);
    }

    #[test]
    fn test_auto_matches_primary_subtag() {
        let mut controller =
            PropagationController::new(localizer("en"), permissive_renderer(), vec![]);
        let root = Panel { children: vec![] };

        // zh-HK only shares the primary subtag with zh-TW, no remap configured
        controller.set_language("auto", &root);
        assert_eq!(controller.localizer().active(), "zh-TW");
    }

    #[test]
    fn test_failure_is_reported_without_rollback() {
        let mut renderer = MockTextRenderer::new();
        // Propagation stops before the renderer
        renderer.expect_set_font().times(0);
        renderer.expect_set_scale().times(0);
        renderer.expect_set_word_wrap().times(0);

        let log = TextLog::default();
        let root = Panel {
            children: vec![label("1000000000000001", &log), Box::new(Broken)],
        };

        let mut controller = PropagationController::new(localizer("en"), renderer, vec![]);
        let change = controller.set_language("zh-TW", &root);

        match change {
            LanguageChange::Degraded { active, error } => {
                assert_eq!(active, "zh-TW");
                assert!(matches!(error, I18nError::RefreshFailed { .. }));
            }
            other => panic!("expected a degraded change, got {other:?}"),
        }
        assert_eq!(controller.localizer().active(), "zh-TW");
        assert_eq!(*log.lock(), ["開始"]);
    }

    #[test]
    fn test_renderer_failure_is_suppressed() {
        let mut renderer = MockTextRenderer::new();
        renderer.expect_set_font().returning(|_| Ok(()));
        renderer.expect_set_scale().returning(|_| {
            Err(I18nError::Renderer {
                setting: "scale",
                reason: "out of range".to_string(),
            })
        });
        renderer.expect_set_word_wrap().times(0);

        let mut controller = PropagationController::new(localizer("en"), renderer, vec![]);
        let mut events = controller.subscribe();
        let root = Panel { children: vec![] };

        let change = controller.set_language("zh-TW", &root);
        assert!(matches!(change, LanguageChange::Degraded { .. }));
        // Notification went out before the renderer failed
        assert!(events.try_recv().is_ok());
    }

    #[test]
    fn test_initialize_pushes_startup_language() {
        let mut renderer = MockTextRenderer::new();
        renderer
            .expect_set_font()
            .withf(|font| font == "Noto Sans")
            .times(1)
            .returning(|_| Ok(()));
        renderer.expect_set_scale().times(1).returning(|_| Ok(()));
        renderer
            .expect_set_word_wrap()
            .with(eq(WordWrap::KeepTogether))
            .times(1)
            .returning(|_| Ok(()));

        let mut controller =
            PropagationController::new(localizer("en"), renderer, vec!["zh-TW".to_string()]);
        let change = controller.initialize(&Panel { children: vec![] });
        assert!(matches!(change, LanguageChange::Applied { .. }));
    }
}
