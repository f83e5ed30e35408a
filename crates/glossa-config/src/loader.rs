//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use glossa_common::{GlossaError, GlossaResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detects the format of `path` from its extension.
    pub fn from_path(path: &Path) -> GlossaResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(GlossaError::Config(format!(
                "Unsupported configuration file extension: {}",
                path.display()
            ))),
        }
    }

    /// Parses configuration text in this format.
    pub fn parse(self, text: &str) -> GlossaResult<Config> {
        match self {
            Self::Yaml => serde_yaml::from_str(text)
                .map_err(|e| GlossaError::Serialization(e.to_string())),
            Self::Toml => {
                toml::from_str(text).map_err(|e| GlossaError::Serialization(e.to_string()))
            }
            Self::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Renders configuration in this format.
    pub fn render(self, config: &Config) -> GlossaResult<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(config)
                .map_err(|e| GlossaError::Serialization(e.to_string())),
            Self::Toml => toml::to_string_pretty(config)
                .map_err(|e| GlossaError::Serialization(e.to_string())),
            Self::Json => Ok(serde_json::to_string_pretty(config)?),
        }
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates configuration from file.
    pub async fn load(&self) -> GlossaResult<Config> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!(path = %self.path.display(), ?format, "Loading configuration");

        let text = tokio::fs::read_to_string(&self.path).await?;
        let config = format.parse(&text)?;
        config.validate()?;

        info!(path = %self.path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Loads configuration from file, or the defaults when the file does not exist.
    pub async fn load_or_default(&self) -> GlossaResult<Config> {
        if tokio::fs::try_exists(&self.path).await? {
            self.load().await
        } else {
            info!(path = %self.path.display(), "No configuration file, using defaults");
            Ok(Config::default())
        }
    }

    /// Saves configuration to file atomically.
    ///
    /// The rendered text goes to a temporary file in the target directory,
    /// which is then renamed over the target.
    pub async fn save(&self, config: &Config) -> GlossaResult<()> {
        let format = ConfigFormat::from_path(&self.path)?;
        let text = format.render(config)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, text.as_bytes()))
            .await
            .map_err(|e| GlossaError::Config(format!("Save task failed: {e}")))??;

        info!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> GlossaResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| GlossaError::Io(e.error))?;
    Ok(())
}
