//! Core services for the Weather Monitoring System

pub mod aggregation;
pub mod alerts;
pub mod forecast;
pub mod monitor;
pub mod reporting;
pub mod units;

pub use aggregation::DailySummaryService;
pub use alerts::{AlertCondition, AlertService, AlertThresholds};
pub use forecast::ForecastSummaryService;
pub use monitor::WeatherMonitor;
