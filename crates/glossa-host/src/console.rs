//! Console stand-ins for the UI tree and the text renderer.

use glossa_common::WordWrap;
use glossa_i18n::{I18nError, I18nResult, Localizer, TextRefresh, TextRenderer, UiElement};
use parking_lot::Mutex;
use tracing::debug;

/// Renderer settings as last applied to the console.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleRenderer {
    font: String,
    scale: f32,
    wrap: WordWrap,
}

impl ConsoleRenderer {
    /// Creates a renderer with no font, unit scale and keep-together wrapping.
    pub fn new() -> Self {
        Self {
            font: String::new(),
            scale: 1.0,
            wrap: WordWrap::KeepTogether,
        }
    }

    /// Current font family.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Current scale factor.
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Current word wrap policy.
    pub const fn word_wrap(&self) -> WordWrap {
        self.wrap
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for ConsoleRenderer {
    fn set_font(&mut self, font: &str) -> I18nResult<()> {
        if font.trim().is_empty() {
            return Err(I18nError::Renderer {
                setting: "font",
                reason: "empty font family".to_string(),
            });
        }
        debug!(font, "Renderer font set");
        self.font = font.to_string();
        Ok(())
    }

    fn set_scale(&mut self, scale: f32) -> I18nResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(I18nError::Renderer {
                setting: "scale",
                reason: format!("{scale} is not a positive scale"),
            });
        }
        debug!(scale, "Renderer scale set");
        self.scale = scale;
        Ok(())
    }

    fn set_word_wrap(&mut self, policy: WordWrap) -> I18nResult<()> {
        debug!(policy = %policy, "Renderer word wrap set");
        self.wrap = policy;
        Ok(())
    }
}

/// A line of console text bound to a catalog entry.
#[derive(Debug)]
pub struct Label {
    id: String,
    text: Mutex<String>,
}

impl Label {
    /// Creates an empty label for entry `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Mutex::new(String::new()),
        }
    }

    /// The bound entry ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text from the last refresh.
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }
}

impl TextRefresh for Label {
    fn refresh_text(&self, localizer: &Localizer) -> I18nResult<()> {
        // No text in this language: show the ID so the gap is visible
        let text = localizer
            .text(&self.id)
            .unwrap_or_else(|| format!("[{}]", self.id));
        *self.text.lock() = text;
        Ok(())
    }
}

impl UiElement for Label {
    fn text_refresh(&self) -> Option<&dyn TextRefresh> {
        Some(self)
    }
}

/// A node of the console UI tree.
#[derive(Debug)]
pub enum Node {
    /// Container of further nodes.
    Panel(Panel),
    /// Localized text line.
    Label(Label),
}

impl UiElement for Node {
    fn children(&self) -> Vec<&dyn UiElement> {
        match self {
            Self::Panel(panel) => panel.children(),
            Self::Label(label) => label.children(),
        }
    }

    fn text_refresh(&self) -> Option<&dyn TextRefresh> {
        match self {
            Self::Panel(panel) => panel.text_refresh(),
            Self::Label(label) => label.text_refresh(),
        }
    }
}

/// A named group of console nodes.
#[derive(Debug, Default)]
pub struct Panel {
    name: String,
    children: Vec<Node>,
}

impl Panel {
    /// Creates an empty panel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn with(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// All labels in display order.
    pub fn labels(&self) -> Vec<&Label> {
        let mut labels = Vec::new();
        for child in &self.children {
            match child {
                Node::Panel(panel) => labels.extend(panel.labels()),
                Node::Label(label) => labels.push(label),
            }
        }
        labels
    }

    /// Indented `id: text` lines of the whole subtree.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.render_into(0, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        lines.push(format!("{indent}[{}]", self.name));
        for child in &self.children {
            match child {
                Node::Panel(panel) => panel.render_into(depth + 1, lines),
                Node::Label(label) => {
                    lines.push(format!("{indent}  {}: {}", label.id(), label.text()));
                }
            }
        }
    }
}

impl UiElement for Panel {
    fn children(&self) -> Vec<&dyn UiElement> {
        self.children
            .iter()
            .map(|child| child as &dyn UiElement)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_common::test_utils::catalog_fixtures::sample_catalog_json;
    use glossa_common::test_utils::languages;
    use glossa_i18n::{refresh_tree, CatalogSource};

    fn localizer(language: &str) -> Localizer {
        let source = CatalogSource::from_json_str(sample_catalog_json()).unwrap();
        Localizer::builder()
            .languages(languages(&["en", "zh-TW"]))
            .request(language)
            .build(&source)
    }

    fn tree() -> Panel {
        Panel::new("root")
            .with(Node::Label(Label::new("1000000000000001")))
            .with(Node::Panel(
                Panel::new("menu").with(Node::Label(Label::new("1000000000000002"))),
            ))
    }

    #[test]
    fn test_renderer_applies_settings() {
        let mut renderer = ConsoleRenderer::new();
        renderer.set_font("Noto Sans TC").unwrap();
        renderer.set_scale(1.5).unwrap();
        renderer.set_word_wrap(WordWrap::BreakAnywhere).unwrap();

        assert_eq!(renderer.font(), "Noto Sans TC");
        assert!((renderer.scale() - 1.5).abs() < f32::EPSILON);
        assert_eq!(renderer.word_wrap(), WordWrap::BreakAnywhere);
    }

    #[test]
    fn test_renderer_rejects_bad_settings() {
        let mut renderer = ConsoleRenderer::new();
        assert!(matches!(
            renderer.set_font("  "),
            Err(I18nError::Renderer { setting: "font", .. })
        ));
        assert!(renderer.set_scale(0.0).is_err());
        assert!(renderer.set_scale(f32::NAN).is_err());
        assert_eq!(renderer, ConsoleRenderer::default());
    }

    #[test]
    fn test_tree_refresh_fills_labels() {
        let root = tree();
        let refreshed = refresh_tree(&localizer("en"), &root).unwrap();

        assert_eq!(refreshed, 2);
        let texts: Vec<String> = root.labels().iter().map(|label| label.text()).collect();
        assert_eq!(texts, ["Start", "Options"]);
    }

    #[test]
    fn test_missing_text_shows_id() {
        let root = tree();
        refresh_tree(&localizer("zh-TW"), &root).unwrap();

        assert_eq!(
            root.render(),
            "[root]\n  1000000000000001: 開始\n  [menu]\n    1000000000000002: [1000000000000002]"
        );
    }
}
