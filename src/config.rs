use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Recommendation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Path to the static catalog JSON file, read once at startup.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("tests_db.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in TESTREC_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (falls back to defaults when absent)
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let explicit = std::env::var("TESTREC_CONFIG").map(PathBuf::from).ok();
        let config_path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        if !config_path.exists() {
            // An explicitly requested config file must exist; the implicit
            // ./config.toml may be absent, in which case defaults apply.
            if explicit.is_some() {
                anyhow::bail!(
                    "Config file not found: {} (set by TESTREC_CONFIG)",
                    config_path.display()
                );
            }
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.service.catalog_path.as_os_str().is_empty() {
            anyhow::bail!("service.catalog_path must not be empty");
        }

        if self.service.host.trim().is_empty() {
            anyhow::bail!("service.host must not be empty");
        }

        Ok(())
    }

    /// Get catalog file path
    pub fn catalog_path(&self) -> &Path {
        &self.service.catalog_path
    }

    /// Get the address the service binds to, as host:port
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}
