use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty (or absent) file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewayConfig,
    pub session: SessionConfig,
    pub backtest: BacktestConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.gateway.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "gateway.base_url must start with http:// or https:// (got '{}')",
                self.gateway.base_url
            )));
        }
        if self.session.default_subject.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.default_subject must not be empty".to_string(),
            ));
        }
        if self.backtest.test_days == Some(0) {
            return Err(ConfigError::ValidationError(
                "backtest.test_days must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where and how to reach the remote analytics service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL the operation names are appended to, e.g. `{base_url}/analyze`.
    pub base_url: String,
    /// Per-request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 0,
        }
    }
}

/// What to do when the user selects the subject that is already selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SameSubjectPolicy {
    /// Treat it like any other selection: reset every stage and refresh.
    #[default]
    Refresh,
    /// Leave the session untouched.
    Ignore,
}

/// Initial session values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_subject: String,
    pub monthly_target: u64,
    pub total_target: u64,
    pub same_subject: SameSubjectPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_subject: "VAS.AX".to_string(),
            monthly_target: 2000,
            total_target: 10000,
            same_subject: SameSubjectPolicy::Refresh,
        }
    }
}

/// Optional parameters forwarded with every backtest request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// History window used to train the model, e.g. "5y".
    pub train_period: Option<String>,
    /// Number of trailing days to predict and compare against actual prices.
    pub test_days: Option<u32>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            train_period: Some("5y".to_string()),
            test_days: Some(30),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Symbols listed first in the instrument picker, in this order.
    pub priority: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
