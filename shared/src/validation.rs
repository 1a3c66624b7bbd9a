//! Validation utilities for the Weather Monitoring System
//!
//! Completeness checks for parsed weather records. A record is only fit for
//! aggregation or alert evaluation once every payload field is present;
//! these helpers name the first missing field so callers can report it.

use rust_decimal::Decimal;

use crate::models::{ForecastEntry, Observation};

/// A fully populated view of one reading, borrowed from the source record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteReading<'a> {
    pub temperature_kelvin: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_mps: Decimal,
    pub condition: &'a str,
}

/// Validate an observation has every payload field, or name the missing one.
pub fn complete_observation(observation: &Observation) -> Result<CompleteReading<'_>, &'static str> {
    complete_reading(
        observation.temperature_kelvin,
        observation.humidity_percent,
        observation.wind_speed_mps,
        observation.condition.as_deref(),
    )
}

/// Validate a forecast entry has every payload field, or name the missing one.
pub fn complete_forecast_entry(entry: &ForecastEntry) -> Result<CompleteReading<'_>, &'static str> {
    complete_reading(
        entry.temperature_kelvin,
        entry.humidity_percent,
        entry.wind_speed_mps,
        entry.condition.as_deref(),
    )
}

fn complete_reading(
    temperature_kelvin: Option<Decimal>,
    humidity_percent: Option<i32>,
    wind_speed_mps: Option<Decimal>,
    condition: Option<&str>,
) -> Result<CompleteReading<'_>, &'static str> {
    let temperature_kelvin = temperature_kelvin.ok_or("temperature")?;
    let humidity_percent = humidity_percent.ok_or("humidity")?;
    let wind_speed_mps = wind_speed_mps.ok_or("wind_speed")?;
    let condition = condition.ok_or("condition")?;
    Ok(CompleteReading {
        temperature_kelvin,
        humidity_percent,
        wind_speed_mps,
        condition,
    })
}
