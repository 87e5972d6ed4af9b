//! Configuration management for the Aviline server
//!
//! Configuration is layered: `conf/application.yml`, then `AVILINE_*`
//! environment variables, then command line overrides.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use aviline_persistence::model::StorageMode;

use crate::startup::logging::LoggingConfig;

const DEFAULT_SERVER_PORT: u16 = 8080;

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 's', long = "storage")]
    storage: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("aviline")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml").required(false));

        if let Some(mode) = args.storage {
            config_builder = config_builder
                .set_override("aviline.storage.mode", mode)
                .expect("failed to apply --storage override");
        }
        if let Some(port) = args.port {
            config_builder = config_builder
                .set_override("server.port", i64::from(port))
                .expect("failed to apply --port override");
        }
        if let Some(url) = args.database_url {
            config_builder = config_builder
                .set_override("db.url", url)
                .expect("failed to apply --db-url override");
        }

        let config = config_builder
            .build()
            .expect("invalid configuration, check conf/application.yml");

        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .unwrap_or(DEFAULT_SERVER_PORT.into()) as u16
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.config
            .get_string("aviline.storage.mode")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::new(
            self.config.get_string("aviline.logs.path").ok(),
            &self
                .config
                .get_string("aviline.logs.level")
                .unwrap_or_else(|_| "info".to_string()),
            self.config.get_bool("aviline.logs.console").unwrap_or(true),
            self.config.get_bool("aviline.logs.file").unwrap_or(true),
        )
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    fn pool_value(&self, key: &str, default: i64) -> i64 {
        self.config
            .get_int(&format!("db.pool.{key}"))
            .unwrap_or(default)
    }

    pub async fn database_connection(
        &self,
    ) -> std::result::Result<DatabaseConnection, Box<dyn std::error::Error>> {
        let url = self.config.get_string("db.url")?;

        let max_connections = self.pool_value("max_connections", 20) as u32;
        let min_connections = self.pool_value("min_connections", 1) as u32;

        let mut options = ConnectOptions::new(url);
        options
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(
                self.pool_value("connect_timeout", 30) as u64
            ))
            .idle_timeout(Duration::from_secs(self.pool_value("idle_timeout", 600) as u64))
            .max_lifetime(Duration::from_secs(self.pool_value("max_lifetime", 1800) as u64))
            .sqlx_logging(self.config.get_bool("db.sqlx_logging").unwrap_or(false))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        tracing::info!(
            max_connections,
            min_connections,
            "database connection pool configured"
        );

        Ok(Database::connect(options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration_with(pairs: &[(&str, &str)]) -> Configuration {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        Configuration {
            config: builder.build().unwrap(),
        }
    }

    #[test]
    fn test_defaults() {
        let configuration = configuration_with(&[]);
        assert_eq!(configuration.server_address(), "0.0.0.0");
        assert_eq!(configuration.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(configuration.storage_mode(), StorageMode::ExternalDb);
    }

    #[test]
    fn test_storage_mode_override() {
        let configuration = configuration_with(&[("aviline.storage.mode", "memory")]);
        assert_eq!(configuration.storage_mode(), StorageMode::Memory);
    }

    #[test]
    fn test_logging_config() {
        let configuration = configuration_with(&[
            ("aviline.logs.path", "/tmp/aviline-logs"),
            ("aviline.logs.level", "debug"),
        ]);
        let logging = configuration.logging_config();
        assert_eq!(logging.directory.to_str().unwrap(), "/tmp/aviline-logs");
        assert_eq!(logging.level, tracing::Level::DEBUG);
    }
}
