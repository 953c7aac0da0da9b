use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for docuflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocuflowConfig {
    /// Document store settings
    pub store: StoreConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Simulated round-trip latency per operation, in milliseconds
    pub latency_ms: u64,
}

impl StoreConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON-formatted log lines
    pub json_logs: bool,
}

impl Default for DocuflowConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                // Matches the mock backend's simulated network delay
                latency_ms: 500,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: true,
            },
        }
    }
}

impl DocuflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (docuflow.toml)
    /// 3. Environment variables (prefixed with DOCUFLOW_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("docuflow.toml").exists() {
            builder = builder.add_source(File::with_name("docuflow"));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCUFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<DocuflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = DocuflowConfig::load_env_file();
        DocuflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static DocuflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_resolves_the_global() {
        init_config().expect("defaults load without a config file");
        let config = config().unwrap();
        assert_eq!(config.store.latency_ms, 500);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.observability.json_logs);
    }
}
