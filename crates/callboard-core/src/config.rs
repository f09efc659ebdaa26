//! Configuration management for the callboard dashboard

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Display formatting options
    #[serde(default)]
    pub display: DisplayConfig,

    /// Billing thresholds
    #[serde(default)]
    pub billing: BillingConfig,

    /// Dataset source
    #[serde(default)]
    pub data: DataConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// How derived display values are rendered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `strftime` pattern for short times in tables
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Text shown in place of an absent value
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

/// Billing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Usage percentage above which the approaching-limit warning shows
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_percent: f64,
}

/// Where the record sets come from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON dataset replacing the built-in sample data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_time_format() -> String {
    "%I:%M %p".to_string()
}

fn default_placeholder() -> String {
    "-".to_string()
}

const fn default_warning_threshold() -> f64 {
    80.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            warning_threshold_percent: default_warning_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file and `CALLBOARD_*` env vars
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CALLBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make derived values meaningless
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable time format or a
    /// threshold outside 0..=100.
    pub fn validate(&self) -> crate::Result<()> {
        if !crate::utils::is_valid_time_format(&self.display.time_format) {
            return Err(crate::Error::Configuration {
                message: format!(
                    "display.time_format is not a valid strftime pattern: {:?}",
                    self.display.time_format
                ),
            });
        }

        let threshold = self.billing.warning_threshold_percent;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(crate::Error::Configuration {
                message: format!(
                    "billing.warning_threshold_percent must be within 0..=100, got {threshold}"
                ),
            });
        }

        Ok(())
    }
}
