//! Temperature unit conversions
//!
//! The upstream API reports temperatures in Kelvin; everything downstream
//! works in Celsius or Fahrenheit.

use rust_decimal::Decimal;
use shared::TemperatureUnit;

fn kelvin_offset() -> Decimal {
    Decimal::new(27315, 2)
}

pub fn kelvin_to_celsius(kelvin: Decimal) -> Decimal {
    kelvin - kelvin_offset()
}

pub fn kelvin_to_fahrenheit(kelvin: Decimal) -> Decimal {
    (kelvin - kelvin_offset()) * Decimal::from(9) / Decimal::from(5) + Decimal::from(32)
}

/// Convert a Kelvin reading into the requested unit.
pub fn convert(kelvin: Decimal, unit: TemperatureUnit) -> Decimal {
    match unit {
        TemperatureUnit::Celsius => kelvin_to_celsius(kelvin),
        TemperatureUnit::Fahrenheit => kelvin_to_fahrenheit(kelvin),
    }
}
