//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and 5-day
//! forecasts, queried by city name. Requests carry no `units` parameter, so
//! temperatures arrive in Kelvin. Failed requests are retried a fixed
//! number of times with a fixed pause between attempts.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{ForecastEntry, Observation};

use crate::error::{AppError, AppResult};

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather. Leaf fields are
/// optional so an absent key surfaces as `None` in the parsed record
/// instead of failing the whole response.
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: Option<OWMMain>,
    wind: Option<OWMWind>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    humidity: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: Option<OWMMain>,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    wind: Option<OWMWind>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions for a city
    pub async fn get_current(&self, location: &str) -> AppResult<Observation> {
        let url = format!(
            "{}/weather?q={}&appid={}",
            self.base_url, location, self.api_key
        );
        let data: OWMCurrentResponse = self.get_with_retry(&url).await?;
        Ok(self.convert_current_response(location, data))
    }

    /// Fetch the 5-day forecast for a city
    pub async fn get_forecast(&self, location: &str) -> AppResult<Vec<ForecastEntry>> {
        let url = format!(
            "{}/forecast?q={}&appid={}",
            self.base_url, location, self.api_key
        );
        let data: OWMForecastResponse = self.get_with_retry(&url).await?;
        Ok(self.convert_forecast_response(data))
    }

    /// Issue a GET, retrying a fixed number of times with a fixed pause.
    async fn get_with_retry<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let mut last_error = AppError::WeatherServiceUnavailable;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.get_once(url).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    tracing::warn!(attempt, %error, "weather API request failed");
                    last_error = error;
                    if attempt < RETRY_ATTEMPTS {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(last_error)
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("failed to parse response: {}", e)))
    }

    /// Convert OpenWeatherMap current response to our format
    fn convert_current_response(&self, location: &str, data: OWMCurrentResponse) -> Observation {
        Observation {
            location: location.to_string(),
            observed_at: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
            temperature_kelvin: data
                .main
                .as_ref()
                .and_then(|m| m.temp)
                .and_then(Decimal::from_f64_retain),
            humidity_percent: data.main.as_ref().and_then(|m| m.humidity),
            wind_speed_mps: data
                .wind
                .as_ref()
                .and_then(|w| w.speed)
                .and_then(Decimal::from_f64_retain),
            condition: data.weather.first().and_then(|w| w.main.clone()),
        }
    }

    /// Convert OpenWeatherMap forecast response to our format
    fn convert_forecast_response(&self, data: OWMForecastResponse) -> Vec<ForecastEntry> {
        data.list
            .into_iter()
            .map(|item| ForecastEntry {
                forecast_at: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temperature_kelvin: item
                    .main
                    .as_ref()
                    .and_then(|m| m.temp)
                    .and_then(Decimal::from_f64_retain),
                humidity_percent: item.main.as_ref().and_then(|m| m.humidity),
                wind_speed_mps: item
                    .wind
                    .as_ref()
                    .and_then(|w| w.speed)
                    .and_then(Decimal::from_f64_retain),
                condition: item.weather.first().and_then(|w| w.main.clone()),
            })
            .collect()
    }
}
