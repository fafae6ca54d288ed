//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `panelctl.toml` in the working directory unless a path is
//! given. Every field has a default so the file is optional. Environment
//! variables take precedence over file values.

use std::path::Path;
use std::time::Duration;

use panelweb_domain::about::AboutLayout;
use panelweb_domain::live_view::{AutoRefresh, RetryPolicy};
use serde::Deserialize;

const DEFAULT_PATH: &str = "panelctl.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The panel to talk to.
    pub device: DeviceConfig,
    /// Screenshot probe timings.
    pub live_view: LiveViewConfig,
    /// About panel contents.
    pub about: AboutConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Device connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Absolute base address of the panel's web server.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LiveViewConfig {
    /// Pause before the retry probe.
    pub retry_delay_ms: u64,
    /// Retry probes after the first failure.
    pub max_retries: u32,
    pub after_load_secs: u64,
    pub after_error_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    /// List `LovyanGFX` instead of `TFT_eSPI` as the graphics driver.
    pub lovyangfx: bool,
    pub layout: AboutLayout,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path`, or from `panelctl.toml` if present,
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `path` cannot be read, if the file is
    /// malformed, or if the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::from_file(DEFAULT_PATH)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PANELCTL_DEVICE") {
            self.device.base_url = val;
        }
        if let Ok(val) = std::env::var("PANELCTL_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.device.timeout_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("PANELCTL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Check the settings that would make every command fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an empty device address or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "device base_url must not be empty".to_string(),
            ));
        }
        if self.device.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "device timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.device.timeout_secs)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.live_view.retry_delay_ms),
            self.live_view.max_retries,
        )
    }

    #[must_use]
    pub fn auto_refresh(&self) -> AutoRefresh {
        AutoRefresh {
            after_load: Duration::from_secs(self.live_view.after_load_secs),
            after_error: Duration::from_secs(self.live_view.after_error_secs),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://plate01/".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for LiveViewConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        let auto_refresh = AutoRefresh::default();
        Self {
            retry_delay_ms: u64::try_from(policy.delay.as_millis()).unwrap_or(u64::MAX),
            max_retries: policy.max_retries,
            after_load_secs: auto_refresh.after_load.as_secs(),
            after_error_secs: auto_refresh.after_error.as_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "panelctl=info,panelweb_app=info,panelweb_adapter_http_reqwest=info"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
