//! Polling orchestrator for the monitoring loop
//!
//! Drives one fetch-ingest-evaluate-report pass per cycle. Any single
//! failure degrades to a skipped location or cycle; the loop never dies.

use std::time::{Duration, Instant};

use shared::{ForecastEntry, Observation, TemperatureUnit};

use crate::config::MonitorConfig;
use crate::error::AppResult;
use crate::external::weather::WeatherClient;
use crate::services::aggregation::DailySummaryService;
use crate::services::alerts::{AlertService, AlertThresholds};
use crate::services::forecast::ForecastSummaryService;
use crate::services::reporting;
use crate::storage::SummaryStore;

/// Owner of the managers and the poll loop.
pub struct WeatherMonitor {
    client: WeatherClient,
    store: Option<SummaryStore>,
    daily: DailySummaryService,
    forecast: ForecastSummaryService,
    alerts: AlertService,
    locations: Vec<String>,
    poll_interval: Duration,
    run_duration: Option<Duration>,
    temperature_unit: TemperatureUnit,
}

impl WeatherMonitor {
    pub fn new(
        config: &MonitorConfig,
        thresholds: AlertThresholds,
        client: WeatherClient,
        store: Option<SummaryStore>,
    ) -> Self {
        Self {
            client,
            store,
            daily: DailySummaryService::new(),
            forecast: ForecastSummaryService::new(),
            alerts: AlertService::with_thresholds(thresholds),
            locations: config.locations.clone(),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            run_duration: config.run_duration_secs.map(Duration::from_secs),
            temperature_unit: config.temperature_unit,
        }
    }

    /// Run poll cycles until the configured duration elapses, or forever
    /// when no duration is set.
    pub async fn run(&mut self) -> AppResult<()> {
        let started = Instant::now();
        loop {
            if let Err(error) = self.run_cycle().await {
                tracing::error!(%error, "poll cycle failed");
            }

            if let Some(duration) = self.run_duration {
                if started.elapsed() >= duration {
                    tracing::info!(
                        seconds = duration.as_secs(),
                        "monitoring ended after configured duration"
                    );
                    return Ok(());
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One pass: fetch, ingest, refresh forecasts, evaluate alerts, report,
    /// and persist the daily snapshot when a store is configured.
    pub async fn run_cycle(&mut self) -> AppResult<()> {
        let observations = self.fetch_observations().await;
        for observation in &observations {
            if let Err(error) = self.daily.ingest(observation) {
                tracing::warn!(location = %observation.location, %error, "dropping observation");
            }
        }

        let batches = self.fetch_forecasts().await;
        self.forecast.reset_and_ingest_all(&batches);

        for alert in self.alerts.check_alerts(&observations, self.temperature_unit) {
            tracing::warn!("{}", alert);
        }

        let daily = self.daily.snapshot();
        reporting::log_daily_report(&daily);
        reporting::log_forecast_report(&self.forecast.snapshot());

        if let Some(store) = &self.store {
            store.upsert_summaries(&daily).await?;
        }

        Ok(())
    }

    async fn fetch_observations(&self) -> Vec<Observation> {
        let mut observations = Vec::new();
        for location in &self.locations {
            match self.client.get_current(location).await {
                Ok(observation) => observations.push(observation),
                Err(error) => {
                    tracing::warn!(location = %location, %error, "failed to fetch current weather");
                }
            }
        }
        observations
    }

    async fn fetch_forecasts(&self) -> Vec<(String, Vec<ForecastEntry>)> {
        let mut batches = Vec::new();
        for location in &self.locations {
            match self.client.get_forecast(location).await {
                Ok(entries) => batches.push((location.clone(), entries)),
                Err(error) => {
                    tracing::warn!(location = %location, %error, "failed to fetch forecast");
                }
            }
        }
        batches
    }
}
