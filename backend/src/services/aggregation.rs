//! Daily summary aggregation
//!
//! Folds per-location observations into (date, location) buckets and keeps
//! the derived statistics in step with the raw sequences. The daily map
//! holds one live date at a time; a new date clears everything recorded for
//! the previous one before any bucket is touched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{complete_observation, Observation, WeatherSummary};

use crate::error::{AppError, AppResult};
use crate::services::units;

/// Aggregated state for one (date, location) pair.
///
/// The four raw sequences grow in lockstep, one entry per observation; the
/// derived stats are recomputed after every append and are `None` only while
/// the bucket is empty.
#[derive(Debug, Clone, Default)]
pub struct SummaryBucket {
    temperatures: Vec<Decimal>,
    humidities: Vec<i32>,
    wind_speeds: Vec<Decimal>,
    conditions: Vec<String>,
    stats: Option<BucketStats>,
}

/// Derived statistics over a bucket's raw sequences. Temperatures in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    pub average_temp: Decimal,
    pub max_temp: Decimal,
    pub min_temp: Decimal,
    pub average_humidity: Decimal,
    pub average_wind_speed: Decimal,
    pub dominant_condition: String,
}

impl SummaryBucket {
    /// Fold one reading into the bucket and recompute every derived stat.
    pub fn append(&mut self, temp_c: Decimal, humidity: i32, wind_speed: Decimal, condition: &str) {
        self.temperatures.push(temp_c);
        self.humidities.push(humidity);
        self.wind_speeds.push(wind_speed);
        self.conditions.push(condition.to_string());
        self.recompute();
    }

    pub fn stats(&self) -> Option<&BucketStats> {
        self.stats.as_ref()
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    fn recompute(&mut self) {
        self.stats = match (
            self.temperatures.iter().max(),
            self.temperatures.iter().min(),
            dominant_condition(&self.conditions),
        ) {
            (Some(&max_temp), Some(&min_temp), Some(dominant_condition)) => {
                let count = Decimal::from(self.temperatures.len());
                Some(BucketStats {
                    average_temp: self.temperatures.iter().sum::<Decimal>() / count,
                    max_temp,
                    min_temp,
                    average_humidity: self.humidities.iter().map(|&h| Decimal::from(h)).sum::<Decimal>()
                        / count,
                    average_wind_speed: self.wind_speeds.iter().sum::<Decimal>() / count,
                    dominant_condition,
                })
            }
            _ => None,
        };
    }

    /// Validated read-only record for this bucket, or `None` while the
    /// sequences are empty or uneven.
    pub fn summary(&self, date: NaiveDate, location: &str) -> Option<WeatherSummary> {
        let stats = self.stats.as_ref()?;
        let len = self.temperatures.len();
        if len == 0
            || self.humidities.len() != len
            || self.wind_speeds.len() != len
            || self.conditions.len() != len
        {
            return None;
        }
        Some(WeatherSummary {
            date,
            location: location.to_string(),
            average_temp: stats.average_temp,
            max_temp: stats.max_temp,
            min_temp: stats.min_temp,
            average_humidity: stats.average_humidity,
            average_wind_speed: stats.average_wind_speed,
            dominant_condition: stats.dominant_condition.clone(),
            sample_count: len,
        })
    }
}

/// Most frequent label in insertion order; the first label to reach the
/// maximal count wins ties.
fn dominant_condition(conditions: &[String]) -> Option<String> {
    let mut counts: Vec<(&String, usize)> = Vec::new();
    for condition in conditions {
        match counts.iter_mut().find(|(label, _)| *label == condition) {
            Some((_, count)) => *count += 1,
            None => counts.push((condition, 1)),
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.clone())
}

/// Owner of the current-day summary map.
#[derive(Debug, Default)]
pub struct DailySummaryService {
    current_date: Option<NaiveDate>,
    buckets: BTreeMap<NaiveDate, BTreeMap<String, SummaryBucket>>,
}

impl DailySummaryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Fold one observation into its (date, location) bucket.
    ///
    /// An observation missing any payload field is dropped whole; no bucket
    /// is touched. Rollover for the observation's date happens before the
    /// bucket is resolved, so readings tagged with a new date never land in
    /// the old day's map.
    pub fn ingest(&mut self, observation: &Observation) -> AppResult<()> {
        let reading = complete_observation(observation).map_err(|field| AppError::MissingField {
            location: observation.location.clone(),
            field: field.to_string(),
        })?;

        let date = observation.observed_at.date_naive();
        self.rollover(date);

        self.buckets
            .entry(date)
            .or_default()
            .entry(observation.location.clone())
            .or_default()
            .append(
                units::kelvin_to_celsius(reading.temperature_kelvin),
                reading.humidity_percent,
                reading.wind_speed_mps,
                reading.condition,
            );
        Ok(())
    }

    /// Adopt `today` as the current date, dropping every bucket recorded for
    /// the previous one. A repeat of the current date is a no-op.
    pub fn rollover(&mut self, today: NaiveDate) {
        if self.current_date != Some(today) {
            if let Some(previous) = self.current_date {
                tracing::info!(%previous, %today, "daily summary rollover");
            }
            self.buckets.clear();
            self.current_date = Some(today);
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
