//! Configuration management for the Aerolytics briefing server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AERO_ prefix

use std::collections::HashMap;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::RiskThresholds;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream aviation weather data source
    pub upstream: UpstreamConfig,

    /// Optional NOTAM feed
    #[serde(default)]
    pub notam: NotamConfig,

    /// Risk scoring cut points
    #[serde(default)]
    pub risk: RiskThresholds,

    /// SIGMET scoping per station
    #[serde(default)]
    pub sigmet: SigmetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the aviation weather data API
    pub base_url: String,

    /// Per-request deadline in seconds
    pub timeout_secs: u64,

    /// Search radius for PIREPs around the station, in nautical miles
    pub pirep_radius_nm: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotamConfig {
    /// NOTAM endpoint returning one notice per line
    pub api_endpoint: Option<String>,

    /// NOTAM API key
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SigmetConfig {
    /// Station id to the FIR/ARTCC ids whose advisories concern it,
    /// e.g. `KJFK = ["KZNY", "ZNY"]`
    #[serde(default)]
    pub areas: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AERO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.base_url", "https://aviationweather.gov/api/data")?
            .set_default("upstream.timeout_secs", 10)?
            .set_default("upstream.pirep_radius_nm", 100)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AERO_ prefix)
            .add_source(
                Environment::with_prefix("AERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings that would make every briefing fail
    pub fn validate(&self) -> AppResult<()> {
        if self.upstream.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "upstream.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(AppError::Configuration("upstream.base_url is empty".to_string()));
        }
        if let Some((station, _)) = self
            .sigmet
            .areas
            .iter()
            .find(|(station, _)| shared::validate_station_id(station).is_err())
        {
            return Err(AppError::Configuration(format!(
                "sigmet.areas has an invalid station id: {}",
                station
            )));
        }
        if self.risk.significant_at == 0 || self.risk.severe_at <= self.risk.significant_at {
            return Err(AppError::Configuration(
                "risk.severe_at must be greater than risk.significant_at, which must be positive"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            environment: "test".into(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig {
                base_url: "https://aviationweather.gov/api/data".into(),
                timeout_secs: 10,
                pirep_radius_nm: 100,
            },
            notam: NotamConfig::default(),
            risk: RiskThresholds::default(),
            sigmet: SigmetConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = config();
        config.upstream.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_sigmet_area_station_must_be_valid() {
        let mut config = config();
        config
            .sigmet
            .areas
            .insert("KJFK".into(), vec!["KZNY".into()]);
        assert!(config.validate().is_ok());
        config.sigmet.areas.insert("JF".into(), vec!["KZNY".into()]);
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_inverted_cut_points_rejected() {
        let mut config = config();
        config.risk.severe_at = 1;
        assert!(config.validate().is_err());
    }
}
