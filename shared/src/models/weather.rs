//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One location's instantaneous weather reading, as parsed from the fetch
/// collaborator. Payload fields the upstream response omitted are `None`;
/// completeness is checked at ingestion, not at parse time.
///
/// Temperatures are in Kelvin, the source unit of the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub location: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_kelvin: Option<Decimal>,
    pub humidity_percent: Option<i32>,
    pub wind_speed_mps: Option<Decimal>,
    pub condition: Option<String>,
}

/// One future reading from a forecast batch. Same payload shape as
/// [`Observation`], keyed by the forecast timestamp instead of a location
/// (the batch itself carries the location).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub forecast_at: DateTime<Utc>,
    pub temperature_kelvin: Option<Decimal>,
    pub humidity_percent: Option<i32>,
    pub wind_speed_mps: Option<Decimal>,
    pub condition: Option<String>,
}

impl ForecastEntry {
    /// Calendar date this entry aggregates under.
    pub fn forecast_date(&self) -> NaiveDate {
        self.forecast_at.date_naive()
    }
}

/// A validated, read-only summary of one (date, location) bucket.
///
/// Temperatures are in Celsius. Produced only from buckets with at least
/// one complete observation, so every field is always populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub date: NaiveDate,
    pub location: String,
    pub average_temp: Decimal,
    pub max_temp: Decimal,
    pub min_temp: Decimal,
    pub average_humidity: Decimal,
    pub average_wind_speed: Decimal,
    pub dominant_condition: String,
    pub sample_count: usize,
}
