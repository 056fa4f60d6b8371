use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use config::{Config as ConfigBuilder, Environment, File, FileFormat};

use super::{HttpConfig, LoggingConfig, PathsConfig, ReferenceConfig, StatsConfig, UpstreamConfig};
use crate::{ConfigValidationError, ServiceError};

/// Main application configuration
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// External lookup services
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Field locations in upstream responses
    #[serde(default)]
    pub paths: PathsConfig,

    /// Sentinels and base location/currency
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Stats manager configuration
    #[serde(default)]
    pub stats: StatsConfig,
}

impl Config {
    /// Default configuration directory
    pub const CONFIG_DIR: &'static str = "config";

    /// Environment variable prefix
    const ENV_PREFIX: &'static str = "WHERE_IP";

    fn environment() -> Environment {
        Environment::with_prefix(Self::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Build configuration using the following priority (highest to lowest):
    /// 1. Environment variables (WHERE_IP_<SECTION>__<KEY>)
    /// 2. Local configuration file (config/local.yaml)
    /// 3. Environment specific file (config/{env}.yaml)
    /// 4. Default configuration (config/default.yaml)
    /// 5. Built-in defaults
    pub fn new() -> Result<Self, ServiceError> {
        let environment = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = ConfigBuilder::builder()
            // Start with built-in defaults
            .add_source(ConfigBuilder::try_from(&Config::default())?)
            .add_source(
                File::new(&format!("{}/default", Self::CONFIG_DIR), FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                File::new(
                    &format!("{}/{}", Self::CONFIG_DIR, environment),
                    FileFormat::Yaml,
                )
                .required(false),
            )
            .add_source(
                File::new(&format!("{}/local", Self::CONFIG_DIR), FileFormat::Yaml).required(false),
            )
            .add_source(Self::environment())
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file, format taken from its extension
    pub fn from_file(path: PathBuf) -> Result<Self, ServiceError> {
        let config = ConfigBuilder::builder()
            .add_source(ConfigBuilder::try_from(&Config::default())?)
            .add_source(File::from(path))
            // Add env vars as overrides
            .add_source(Self::environment())
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        fn validation_error(msg: &str) -> ConfigValidationError {
            ConfigValidationError::config(msg)
        }

        if self.http.bind_addr.is_empty() {
            return Err(validation_error("HTTP bind address must not be empty"));
        }
        if self.http.bind_port == 0 {
            return Err(validation_error("HTTP port must be non-zero"));
        }

        self.logging.validate()?;

        let upstream = &self.upstream;
        if !upstream.geolocation_url.contains("{ip}") {
            return Err(validation_error("Geolocation URL must contain {ip}"));
        }
        if !upstream.country_url.contains("{code}") {
            return Err(validation_error("Country URL must contain {code}"));
        }
        if !upstream.currency_url.contains("{code}") {
            return Err(validation_error("Currency URL must contain {code}"));
        }
        if upstream.request_timeout.is_zero() {
            return Err(validation_error("Request timeout must be non-zero"));
        }
        if upstream.connect_timeout.is_zero() {
            return Err(validation_error("Connect timeout must be non-zero"));
        }

        let reference = &self.reference;
        if reference.unknown_country_code.trim().is_empty() {
            return Err(validation_error("Unknown country code must not be empty"));
        }
        if reference.unavailable_rate.is_nan() || reference.unavailable_rate < 0.0 {
            return Err(validation_error("Unavailable rate must be non-negative"));
        }
        if reference.base_currency.len() != 3
            || !reference
                .base_currency
                .bytes()
                .all(|b| b.is_ascii_alphabetic())
        {
            return Err(validation_error(
                "Base currency must be a three letter ISO 4217 code",
            ));
        }
        if !(-90.0..=90.0).contains(&reference.base_latitude) {
            return Err(validation_error("Base latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&reference.base_longitude) {
            return Err(validation_error("Base longitude must be within [-180, 180]"));
        }

        self.paths.compile(&reference.base_currency)?;

        if self.stats.channel_capacity == 0 {
            return Err(validation_error("Stats channel capacity must be non-zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::{fs, time::Duration};
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_default_config() {
        let config = Config::new().unwrap();
        assert_eq!(config.http.bind_port, 3000);
        assert_eq!(config.http.bind_addr, "0.0.0.0");
        assert_eq!(config.reference.unknown_country_code, "XX");
        assert_eq!(config.reference.base_currency, "USD");
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var("WHERE_IP_HTTP__BIND_PORT", "8080");
        std::env::set_var("WHERE_IP_REFERENCE__BASE_CURRENCY", "EUR");
        let config = Config::new();
        std::env::remove_var("WHERE_IP_HTTP__BIND_PORT");
        std::env::remove_var("WHERE_IP_REFERENCE__BASE_CURRENCY");

        let config = config.unwrap();
        assert_eq!(config.http.bind_port, 8080);
        assert_eq!(config.reference.base_currency, "EUR");
    }

    #[test]
    #[serial]
    fn test_file_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");

        fs::write(
            &config_path,
            r#"
            http:
              bind_port: 9000
              bind_addr: "127.0.0.1"
            upstream:
              request_timeout: 750ms
            paths:
              country_name: name
            "#,
        )
        .unwrap();

        let config = Config::from_file(config_path).unwrap();
        assert_eq!(config.http.bind_port, 9000);
        assert_eq!(config.http.bind_addr, "127.0.0.1");
        assert_eq!(config.upstream.request_timeout, Duration::from_millis(750));
        assert_eq!(config.paths.country_name, "name");
        // untouched sections keep their defaults
        assert_eq!(config.paths.latitude, "latlng.0");
    }

    #[test]
    #[serial]
    fn test_validation() {
        std::env::set_var("WHERE_IP_HTTP__BIND_PORT", "0");
        let result = Config::new();
        std::env::remove_var("WHERE_IP_HTTP__BIND_PORT");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.reference.base_latitude = 91.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reference.base_currency = "US".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reference.unavailable_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.geolocation_url = "https://example.com/ip".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.paths.timezones = String::new();
        assert!(config.validate().is_err());
    }
}
