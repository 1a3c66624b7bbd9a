//! Forecast summary aggregation
//!
//! Buckets forecast entries by (forecast date, location). Unlike the daily
//! map, the forecast map is rebuilt from scratch on every refresh cycle.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::{complete_forecast_entry, ForecastEntry, WeatherSummary};

use crate::services::aggregation::SummaryBucket;
use crate::services::units;

/// Owner of the forecast summary map.
#[derive(Debug, Default)]
pub struct ForecastSummaryService {
    buckets: BTreeMap<NaiveDate, BTreeMap<String, SummaryBucket>>,
}

impl ForecastSummaryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one location's forecast batch into the map, returning the number
    /// of entries accepted. An entry missing a payload field is skipped and
    /// logged; the rest of the batch is unaffected.
    pub fn ingest_batch(&mut self, location: &str, entries: &[ForecastEntry]) -> usize {
        let mut accepted = 0;
        for entry in entries {
            match complete_forecast_entry(entry) {
                Ok(reading) => {
                    self.buckets
                        .entry(entry.forecast_date())
                        .or_default()
                        .entry(location.to_string())
                        .or_default()
                        .append(
                            units::kelvin_to_celsius(reading.temperature_kelvin),
                            reading.humidity_percent,
                            reading.wind_speed_mps,
                            reading.condition,
                        );
                    accepted += 1;
                }
                Err(field) => {
                    tracing::warn!(
                        location = %location,
                        field,
                        forecast_at = %entry.forecast_at,
                        "skipping forecast entry with missing field"
                    );
                }
            }
        }
        accepted
    }

    /// Apply a full forecast refresh: clear the map, then ingest every
    /// location's batch. One location's bad entries never block another.
    pub fn reset_and_ingest_all(&mut self, batches: &[(String, Vec<ForecastEntry>)]) {
        self.buckets.clear();
        for (location, entries) in batches {
            let accepted = self.ingest_batch(location, entries);
            tracing::debug!(
                location = %location,
                accepted,
                total = entries.len(),
                "ingested forecast batch"
            );
        }
    }

    /// Read-only copy of every complete bucket, ordered by date then location.
    pub fn snapshot(&self) -> Vec<WeatherSummary> {
        self.buckets
            .iter()
            .flat_map(|(date, locations)| {
                locations
                    .iter()
                    .filter_map(move |(location, bucket)| bucket.summary(*date, location))
            })
            .collect()
    }
}
