//! Tracing subscriber setup from the logging configuration.

use glossa_config::LoggingConfig;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "glossa.log";

const FALLBACK_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Console output goes to stderr, as JSON when `logging.json` is set. With
/// `logging.directory` a daily rolling file is written as well; keep the
/// returned guard alive until shutdown so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (plain, json) = if config.json {
        (None, Some(fmt::layer().json().with_writer(io::stderr)))
    } else {
        (Some(fmt::layer().with_writer(io::stderr)), None)
    };

    let (file, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(plain)
        .with(json)
        .with(file)
        .init();

    guard
}

/// `RUST_LOG` if set, otherwise `level`, otherwise `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}
