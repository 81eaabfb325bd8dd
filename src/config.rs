//! Configuration management for the circulation admin

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdminApiConfig {
    /// Root of the circulation server, without trailing slash
    pub base_url: String,
    /// Short name of the library whose lanes and lists are edited
    pub library: String,
    pub csrf_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub admin: AdminApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix CIRCULATION_)
            .add_source(
                Environment::with_prefix("CIRCULATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("admin.base_url", env::var("CIRCULATION_ADMIN_URL").ok())?
            .set_override_option("admin.csrf_token", env::var("CSRF_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6500".to_string(),
            library: "default".to_string(),
            csrf_token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
