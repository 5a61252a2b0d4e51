//! Configuration for the forecasting pipeline and the reservation store

use crate::error::{ForecastError, Result};
use crate::stationarity::DEFAULT_SIGNIFICANCE_LEVEL;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Forecasting parameters
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ForecastConfig {
    /// Number of future days to forecast
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    /// AR order of the ARIMA model
    #[serde(default = "default_autoregressive_order")]
    pub autoregressive_order: usize,
    /// Unit-root test threshold
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    /// Coverage of the forecast interval
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_reservations_path")]
    pub reservations_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_horizon_days() -> usize {
    14
}

fn default_autoregressive_order() -> usize {
    5
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_reservations_path() -> String {
    "/api/reserva/listar".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            autoregressive_order: default_autoregressive_order(),
            significance_level: default_significance_level(),
            confidence_level: default_confidence_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            reservations_path: default_reservations_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ForecastConfig {
    /// Check every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ForecastError::Config(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if self.autoregressive_order == 0 {
            return Err(ForecastError::Config(
                "autoregressive_order must be at least 1".to_string(),
            ));
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ForecastError::Config(format!(
                "significance_level must be between 0 and 1, got {}",
                self.significance_level
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::Config(format!(
                "confidence_level must be between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        Ok(())
    }
}

impl BackendConfig {
    /// Full reservation listing URL, without doubled slashes
    pub fn reservations_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.reservations_path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ForecastError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.forecast.validate()?;
        Ok(config)
    }

    /// Apply `BACKEND_BASE` and `FORECAST_HORIZON_DAYS` overrides, reading a
    /// `.env` file first when one exists
    pub fn with_env_overrides(self) -> Result<Self> {
        dotenv::dotenv().ok();
        self.with_overrides(
            std::env::var("BACKEND_BASE").ok(),
            std::env::var("FORECAST_HORIZON_DAYS").ok(),
        )
    }

    fn with_overrides(
        mut self,
        base_url: Option<String>,
        horizon_days: Option<String>,
    ) -> Result<Self> {
        if let Some(base_url) = base_url {
            self.backend.base_url = base_url;
        }

        if let Some(raw) = horizon_days {
            self.forecast.horizon_days = raw.trim().parse().map_err(|_| {
                ForecastError::Config(format!("FORECAST_HORIZON_DAYS is not a number: {}", raw))
            })?;
        }

        self.forecast.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.forecast.horizon_days, 14);
        assert_eq!(config.forecast.autoregressive_order, 5);
        assert_eq!(config.forecast.significance_level, 0.05);
        assert_eq!(config.forecast.confidence_level, 0.95);
        assert_eq!(config.backend.timeout(), Duration::from_secs(6));
        assert!(config.forecast.validate().is_ok());
    }

    #[test]
    fn test_reservations_url_joins_cleanly() {
        let backend = BackendConfig {
            base_url: "http://store:8080/".to_string(),
            reservations_path: "/api/reserva/listar".to_string(),
            timeout_secs: 2,
        };
        assert_eq!(backend.reservations_url(), "http://store:8080/api/reserva/listar");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("http://other:9000".to_string()), Some("7".to_string()))
            .unwrap();
        assert_eq!(config.backend.base_url, "http://other:9000");
        assert_eq!(config.forecast.horizon_days, 7);

        assert!(AppConfig::default()
            .with_overrides(None, Some("soon".to_string()))
            .is_err());
        assert!(AppConfig::default()
            .with_overrides(None, Some("0".to_string()))
            .is_err());
    }
}
