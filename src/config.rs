//! Configuration loading from TOML files.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "greenleaf.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub pricing: PricingConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Where persisted snapshots live.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage directory; defaults to the platform data dir.
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the storage directory, falling back to the platform default.
    #[must_use]
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("greenleaf")
        })
    }
}

/// Checkout pricing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Tax rate applied to the subtotal (0.08 = 8%).
    pub tax_rate: Decimal,
    /// Fixed fee added to every order total.
    pub service_fee: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2), // 8%
            service_fee: Decimal::ZERO,
        }
    }
}

/// Auth service endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the bistro auth backend.
    pub base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config path, or the default file if present, or the
    /// built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pricing.tax_rate < Decimal::ZERO || self.pricing.tax_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "pricing.tax_rate",
                reason: format!("must be in [0, 1), got {}", self.pricing.tax_rate),
            });
        }
        if self.pricing.service_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "pricing.service_fee",
                reason: format!("must be non-negative, got {}", self.pricing.service_fee),
            });
        }
        if self.auth.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.base_url",
            });
        }
        url::Url::parse(&self.auth.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "auth.base_url",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
