//! Console application wiring the configuration to the localization engine.

use crate::command::Command;
use crate::console::{ConsoleRenderer, Label, Node, Panel};
use crate::error::{HostError, HostResult};
use glossa_config::{Config, ConfigCache, ConfigLoader};
use glossa_i18n::{
    CatalogSource, LanguageChange, LocaleProvider, Localizer, PropagationController, SystemLocale,
    VariableStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print.
    Output(String),
    /// Leave the console loop.
    Quit,
}

/// The running console application.
pub struct App {
    config: ConfigCache,
    loader: Option<ConfigLoader>,
    variables: Arc<VariableStore>,
    controller: PropagationController<ConsoleRenderer>,
    ui: Panel,
}

impl App {
    /// Builds the application against the system locale.
    pub fn from_config(config: Config) -> HostResult<Self> {
        Self::with_locale(config, Arc::new(SystemLocale))
    }

    /// Builds the application with a specific locale provider.
    ///
    /// Loads the catalog, builds one console label per entry and pushes the
    /// initial language to the labels and the renderer.
    pub fn with_locale(config: Config, locale: Arc<dyn LocaleProvider>) -> HostResult<Self> {
        let localization = &config.localization;
        let source = CatalogSource::load(&localization.catalog)?;

        let variables = Arc::new(VariableStore::new());
        let localizer = Localizer::builder()
            .languages(localization.languages.clone())
            .remap(localization.remap.clone())
            .request(localization.language.clone())
            .resolver(variables.clone())
            .locale_provider(locale)
            .build(&source);

        let ui = localizer
            .catalog()
            .ids()
            .into_iter()
            .fold(Panel::new("catalog"), |panel, id| {
                panel.with(Node::Label(Label::new(id)))
            });

        let mut controller = PropagationController::new(
            Arc::new(localizer),
            ConsoleRenderer::new(),
            localization.break_anywhere.clone(),
        );
        if let LanguageChange::Degraded { error, .. } = controller.initialize(&ui) {
            warn!(%error, "Initial language applied with errors");
        }

        Ok(Self {
            config: ConfigCache::new(config),
            loader: None,
            variables,
            controller,
            ui,
        })
    }

    /// Sets the file `save` writes to.
    #[must_use]
    pub fn with_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// The localization engine.
    pub fn localizer(&self) -> &Arc<Localizer> {
        self.controller.localizer()
    }

    /// Live variables behind `<global:KEY>` tags.
    pub fn variables(&self) -> &Arc<VariableStore> {
        &self.variables
    }

    /// Current configuration, including the latest language selection.
    pub fn config(&self) -> Arc<Config> {
        self.config.get()
    }

    /// The console renderer.
    pub fn renderer(&self) -> &ConsoleRenderer {
        self.controller.renderer()
    }

    /// Root of the console UI tree.
    pub const fn ui(&self) -> &Panel {
        &self.ui
    }

    /// Parses and runs one console line. Blank lines yield `None`.
    pub async fn handle_line(&mut self, line: &str) -> HostResult<Option<Outcome>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let command = line.parse()?;
        self.execute(command).await.map(Some)
    }

    /// Runs a command.
    pub async fn execute(&mut self, command: Command) -> HostResult<Outcome> {
        let output = match command {
            Command::Get(id) => self
                .localizer()
                .text(&id)
                .unwrap_or_else(|| "(missing)".to_string()),
            Command::Replace(text) => self.localizer().replace(&text).into_owned(),
            Command::Lang(request) => {
                let change = self.controller.set_language(request.clone(), &self.ui);
                if change.is_switched() {
                    self.config.set_language(&request);
                }
                match change {
                    LanguageChange::Unchanged => format!("unchanged ({})", self.localizer().active()),
                    LanguageChange::Applied { active } => active,
                    LanguageChange::Degraded { active, error } => {
                        format!("{active} (degraded: {error})")
                    }
                }
            }
            Command::Set { key, value } => {
                self.variables.set(key.as_str(), value);
                format!("{key} set")
            }
            Command::Show => self.ui.render(),
            Command::Langs => self.list_languages(),
            Command::Save => {
                let loader = self.loader.as_ref().ok_or(HostError::NoConfigPath)?;
                loader.save(&self.config.get()).await?;
                info!(path = %loader.path().display(), "Configuration saved");
                format!("saved {}", loader.path().display())
            }
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(output))
    }

    fn list_languages(&self) -> String {
        let active = self.localizer().active();
        self.localizer()
            .languages()
            .iter()
            .map(|setting| {
                let marker = if setting.name == active { '*' } else { ' ' };
                format!("{marker} {} ({}, x{})", setting.name, setting.font, setting.scale)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
