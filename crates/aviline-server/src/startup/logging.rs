//! Logging setup
//!
//! Console output plus daily-rotated files under the log directory:
//! `aviline.log` receives every event, `cables.log` the domain services
//! (`aviline_core`) and `persistence.log` the storage backends
//! (`aviline_persistence`). `RUST_LOG` takes precedence over the configured
//! level on the console and root file layers.
//!
//! The directory defaults to `~/aviline/logs`; override with the
//! `AVILINE_LOG_DIR` environment variable or the `aviline.logs.path` key.

use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const COMPONENT_FILES: &[(&str, &str)] = &[
    ("cables.log", "aviline_core"),
    ("persistence.log", "aviline_persistence"),
];

/// Logging settings, read from the `aviline.logs.*` keys
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub level: Level,
    pub console: bool,
    pub files: bool,
}

impl LoggingConfig {
    pub fn new(directory: Option<String>, level: &str, console: bool, files: bool) -> Self {
        Self {
            directory: directory
                .map(PathBuf::from)
                .unwrap_or_else(default_directory),
            level: level.parse().unwrap_or(Level::INFO),
            console,
            files,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            level: Level::INFO,
            console: true,
            files: true,
        }
    }
}

fn default_directory() -> PathBuf {
    if let Ok(directory) = std::env::var("AVILINE_LOG_DIR") {
        return PathBuf::from(directory);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    Path::new(&home).join("aviline").join("logs")
}

/// Keeps the non-blocking appender workers alive. Dropping it flushes the
/// buffered output, so it must live as long as the server does.
pub struct LoggingGuard {
    _workers: Vec<WorkerGuard>,
}

fn file_writer(workers: &mut Vec<WorkerGuard>, directory: &Path, file_name: &str) -> NonBlocking {
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(directory, file_name));
    workers.push(guard);
    writer
}

fn env_filter(fallback: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback.to_string()))
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    let mut workers = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console {
        layers.push(Box::new(
            fmt::layer()
                .with_target(true)
                .with_filter(env_filter(config.level)),
        ));
    }

    if config.files {
        std::fs::create_dir_all(&config.directory)?;

        layers.push(Box::new(
            fmt::layer()
                .with_writer(file_writer(&mut workers, &config.directory, "aviline.log"))
                .with_target(true)
                .with_ansi(false)
                .with_filter(env_filter(config.level)),
        ));

        // Component files take every event from their crate; the level cap
        // lives on the console and root layers
        for (file_name, target) in COMPONENT_FILES {
            layers.push(Box::new(
                fmt::layer()
                    .with_writer(file_writer(&mut workers, &config.directory, file_name))
                    .with_target(true)
                    .with_ansi(false)
                    .with_filter(Targets::new().with_target(*target, LevelFilter::TRACE)),
            ));
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("failed to initialize logging: {e}"))?;

    if config.files {
        tracing::info!(directory = %config.directory.display(), "file logging initialized");
    }

    Ok(LoggingGuard { _workers: workers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_directory_and_level() {
        let config = LoggingConfig::new(Some("/tmp/aviline-logs".to_string()), "debug", false, true);
        assert_eq!(config.directory, PathBuf::from("/tmp/aviline-logs"));
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.console);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = LoggingConfig::new(None, "chatty", true, true);
        assert_eq!(config.level, Level::INFO);
    }

    #[test]
    fn test_component_files_are_named() {
        for (file_name, target) in COMPONENT_FILES {
            assert!(file_name.ends_with(".log"));
            assert!(target.starts_with("aviline_"));
        }
    }
}
