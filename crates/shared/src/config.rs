//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Host clock configuration.
    #[serde(default)]
    pub host: HostConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// The single identity allowed to issue certificates.
    ///
    /// Optional here so a host can supply it another way; a ledger cannot
    /// be built without one.
    pub administrator: Option<String>,
}

/// Host clock configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Block height assigned to the first call.
    #[serde(default = "default_start_height")]
    pub start_height: u64,
    /// Height increment between calls that carry no explicit height.
    #[serde(default = "default_blocks_per_call")]
    pub blocks_per_call: u64,
}

fn default_start_height() -> u64 {
    1
}

fn default_blocks_per_call() -> u64 {
    1
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            start_height: default_start_height(),
            blocks_per_call: default_blocks_per_call(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "recledger=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RECLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
