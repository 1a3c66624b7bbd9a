//! Configuration management for the Weather Monitoring System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WMS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::TemperatureUnit;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Polling loop configuration
    pub monitor: MonitorConfig,

    /// Alert threshold configuration
    pub alerts: AlertConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Database configuration; absent means run in-memory only
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Locations to poll, by city name
    pub locations: Vec<String>,

    /// Seconds between poll cycles
    pub poll_interval_secs: u64,

    /// Stop after this many seconds; run forever when absent
    pub run_duration_secs: Option<u64>,

    /// Unit used when evaluating temperature alerts
    pub temperature_unit: TemperatureUnit,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Temperature limit in the configured unit
    pub temperature: i64,

    /// Humidity limit in percent
    pub humidity: i64,

    /// Wind speed limit in m/s
    pub wind_speed: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("monitor.locations", vec!["New York", "Los Angeles", "Chicago"])?
            .set_default("monitor.poll_interval_secs", 300)?
            .set_default("monitor.temperature_unit", "celsius")?
            .set_default("alerts.temperature", 35)?
            .set_default("alerts.humidity", 80)?
            .set_default("alerts.wind_speed", 15)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WMS_ prefix)
            .add_source(
                Environment::with_prefix("WMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
