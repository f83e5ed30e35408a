//! Main entry point for the Glossa console.

use anyhow::Context;
use glossa_config::ConfigLoader;
use glossa_host::{init_logging, App, Outcome};
use std::env;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "GLOSSA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "glossa.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let loader = ConfigLoader::new(path);
    let config = loader
        .load_or_default()
        .await
        .with_context(|| format!("failed to load {}", loader.path().display()))?;

    let _guard = init_logging(&config.logging);
    info!(config = %loader.path().display(), "Starting Glossa");

    let mut app = App::from_config(config)
        .context("failed to start the localization engine")?
        .with_loader(loader);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let text = match app.handle_line(&line).await {
            Ok(Some(Outcome::Output(text))) => text,
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => continue,
            Err(error) => {
                warn!(%error, "Command failed");
                format!("error: {error}")
            }
        };
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Shutting down");
    Ok(())
}
