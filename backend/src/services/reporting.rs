//! Reporting of summary snapshots
//!
//! Formats validated daily and forecast summaries into one-line reports and
//! emits them through the logging layer.

use shared::WeatherSummary;

/// One-line report for a daily summary row.
pub fn daily_summary_line(summary: &WeatherSummary) -> String {
    format!(
        "Daily summary for {} on {}: avg {}°C, max {}°C, min {}°C, humidity {}%, wind {} m/s, dominant condition {}",
        summary.location,
        summary.date,
        summary.average_temp,
        summary.max_temp,
        summary.min_temp,
        summary.average_humidity,
        summary.average_wind_speed,
        summary.dominant_condition
    )
}

/// One-line report for a forecast summary row.
pub fn forecast_summary_line(summary: &WeatherSummary) -> String {
    format!(
        "Forecast for {} on {}: avg {}°C, humidity {}%, wind {} m/s, dominant condition {}",
        summary.location,
        summary.date,
        summary.average_temp,
        summary.average_humidity,
        summary.average_wind_speed,
        summary.dominant_condition
    )
}

/// Emit a daily snapshot through the log sink.
pub fn log_daily_report(summaries: &[WeatherSummary]) {
    for summary in summaries {
        tracing::info!("{}", daily_summary_line(summary));
    }
}

/// Emit a forecast snapshot through the log sink.
pub fn log_forecast_report(summaries: &[WeatherSummary]) {
    for summary in summaries {
        tracing::info!("{}", forecast_summary_line(summary));
    }
}
