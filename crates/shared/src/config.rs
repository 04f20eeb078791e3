//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Conversion policy configuration.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Conversion policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Multiplier applied to two-step conversions (1.01 = 1% commission).
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
        }
    }
}

fn default_commission_rate() -> Decimal {
    Decimal::new(101, 2)
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
            .add_source(config::Environment::with_prefix("HOPFX").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.conversion.commission_rate, dec!(1.01));
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            ["HOPFX__SERVER__PORT", "HOPFX__CONVERSION__COMMISSION_RATE"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.conversion.commission_rate, dec!(1.01));
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("HOPFX__SERVER__PORT", Some("9100")),
                ("HOPFX__CONVERSION__COMMISSION_RATE", Some("1.02")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9100);
                assert_eq!(config.conversion.commission_rate, dec!(1.02));
            },
        );
    }
}
