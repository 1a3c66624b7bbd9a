//! Threshold alert evaluation
//!
//! Evaluates current observations against configured limits. Temperature
//! uses consecutive-breach hysteresis: a reading must stay over the limit
//! for two cycles in a row before an alert fires. Humidity and wind speed
//! alert on every breaching cycle.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::{Observation, TemperatureUnit};

use crate::services::units;

/// Condition a threshold applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCondition {
    Temperature,
    Humidity,
    WindSpeed,
}

/// Numeric limits for alert evaluation. The temperature limit is read in
/// whatever unit the caller evaluates with.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertThresholds {
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub wind_speed: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temperature: Decimal::from(35),
            humidity: Decimal::from(80),
            wind_speed: Decimal::from(15),
        }
    }
}

/// Alert evaluator owning the thresholds and the per-location breach memory.
#[derive(Debug, Default)]
pub struct AlertService {
    thresholds: AlertThresholds,
    previous_exceed: HashMap<String, bool>,
}

impl AlertService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            previous_exceed: HashMap::new(),
        }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    pub fn set_threshold(&mut self, condition: AlertCondition, value: Decimal) {
        match condition {
            AlertCondition::Temperature => self.thresholds.temperature = value,
            AlertCondition::Humidity => self.thresholds.humidity = value,
            AlertCondition::WindSpeed => self.thresholds.wind_speed = value,
        }
    }

    /// Evaluate one cycle of observations, in input order.
    ///
    /// Per location the condition order is fixed: temperature, then
    /// humidity, then wind speed. A location missing a temperature, humidity
    /// or wind-speed reading is skipped whole for the cycle — no alert, no
    /// state change. The returned strings are ready for the dispatch sink;
    /// no I/O happens here.
    pub fn check_alerts(
        &mut self,
        observations: &[Observation],
        unit: TemperatureUnit,
    ) -> Vec<String> {
        let mut alerts = Vec::new();

        for observation in observations {
            let location = &observation.location;
            let (temp_kelvin, humidity, wind_speed) = match alert_reading(observation) {
                Ok(reading) => reading,
                Err(field) => {
                    tracing::warn!(
                        location = %location,
                        field,
                        "skipping alert evaluation for incomplete observation"
                    );
                    continue;
                }
            };

            let temperature = units::convert(temp_kelvin, unit);
            if temperature > self.thresholds.temperature {
                // Second consecutive breach fires; the first only arms the flag.
                if self.previous_exceed.get(location).copied().unwrap_or(false) {
                    alerts.push(format!(
                        "Alert! {} temperature exceeded {}{} for consecutive updates.",
                        location,
                        self.thresholds.temperature,
                        unit.symbol()
                    ));
                }
                self.previous_exceed.insert(location.clone(), true);
            } else {
                self.previous_exceed.insert(location.clone(), false);
            }

            if Decimal::from(humidity) > self.thresholds.humidity {
                alerts.push(format!(
                    "Alert! {} humidity exceeded {}%.",
                    location, self.thresholds.humidity
                ));
            }

            if wind_speed > self.thresholds.wind_speed {
                alerts.push(format!(
                    "Alert! {} wind speed exceeded {} m/s.",
                    location, self.thresholds.wind_speed
                ));
            }
        }

        alerts
    }
}

/// The three readings alert evaluation consumes, or the first missing field.
/// The condition label plays no part here.
fn alert_reading(observation: &Observation) -> Result<(Decimal, i32, Decimal), &'static str> {
    let temp_kelvin = observation.temperature_kelvin.ok_or("temperature")?;
    let humidity = observation.humidity_percent.ok_or("humidity")?;
    let wind_speed = observation.wind_speed_mps.ok_or("wind_speed")?;
    Ok((temp_kelvin, humidity, wind_speed))
}
