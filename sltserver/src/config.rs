//! Application configuration management.
//!
//! Configuration is assembled from default values, an optional TOML file and
//! `APP_`-prefixed environment variables, in increasing order of precedence.

use crate::{Cli, schedule::Scheduler};
use serde::{Deserialize, Serialize};
use slt_core::models::Thresholds;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, CORS)
    #[serde(default)]
    pub server: slt_axum::config::AxumConfig,

    /// Database configuration (file path, creation)
    #[serde(default)]
    pub database: slt_sqlite::config::SqliteConfig,

    /// The day counts separating the urgency buckets
    #[serde(default)]
    pub thresholds: Thresholds,

    /// When to sweep the catalog and log its warnings
    #[serde(default)]
    pub sweep: Scheduler,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep the catalog in a file
    /// export APP_DATABASE__DATABASE_PATH="/data/catalog.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Widen the alert window
    /// export APP_THRESHOLDS__ALERT_WITHIN_DAYS=45
    ///
    /// # Sweep the catalog every morning
    /// export APP_SWEEP__EVERY="1day"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // APP_SERVER__BIND_ADDRESS maps to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{path::PathBuf, time::Duration};

    fn cli(config: Option<PathBuf>) -> Cli {
        Cli {
            config,
            schema: None,
        }
    }

    #[test]
    fn defaults_without_a_file() {
        let config = AppConfig::load(&cli(None)).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.server.bind_address.port(), 8080);
        assert!(config.database.database_path.is_none());
        assert!(config.sweep.every.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("sltserver-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
            [server]
            bind_address = "127.0.0.1:3000"

            [database]
            database_path = "catalog.db"

            [thresholds]
            alert_within_days = 45

            [sweep]
            every = "12h"
            "#,
        )
        .unwrap();

        let config = AppConfig::load(&cli(Some(path.clone())));
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.server.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.database.database_path,
            Some(PathBuf::from("catalog.db"))
        );
        assert!(config.database.create_if_missing);
        assert_eq!(config.thresholds.alert_within_days, 45);
        assert_eq!(config.thresholds.ok_after_days, 365);
        assert_eq!(config.sweep.every, Some(Duration::from_secs(12 * 3600)));
    }

    #[test]
    fn zero_sweep_interval_is_an_error() {
        let path = std::env::temp_dir().join(format!("sltserver-zero-{}.toml", std::process::id()));
        std::fs::write(&path, "[sweep]\nevery = \"0s\"\n").unwrap();

        let config = AppConfig::load(&cli(Some(path.clone())));
        std::fs::remove_file(&path).unwrap();
        assert!(config.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here.toml");
        assert!(AppConfig::load(&cli(Some(path))).is_err());
    }
}
