//! Weather Monitoring System - Server
//!
//! Polls weather for the configured locations, maintains rolling daily and
//! forecast summaries, and raises threshold alerts.

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_monitor::external::WeatherClient;
use weather_monitor::services::{AlertThresholds, WeatherMonitor};
use weather_monitor::storage::SummaryStore;
use weather_monitor::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_monitor=debug,wms_server=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Weather Monitoring Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Monitoring locations: {:?}", config.monitor.locations);

    // Connect the optional persistence sink
    let store = match &config.database {
        Some(database) => {
            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .min_connections(database.min_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(&database.url)
                .await?;

            let store = SummaryStore::new(db_pool);
            store.ensure_schema().await?;
            tracing::info!("Database connection established");
            Some(store)
        }
        None => {
            tracing::info!("No database configured; summaries stay in-memory");
            None
        }
    };

    let client = WeatherClient::with_base_url(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
    );

    let thresholds = AlertThresholds {
        temperature: Decimal::from(config.alerts.temperature),
        humidity: Decimal::from(config.alerts.humidity),
        wind_speed: Decimal::from(config.alerts.wind_speed),
    };

    let mut monitor = WeatherMonitor::new(&config.monitor, thresholds, client, store);
    monitor.run().await?;

    Ok(())
}
