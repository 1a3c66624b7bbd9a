//! Forecast summary tests
//!
//! Covers per-date bucketing, skip-and-continue on bad entries, and the
//! rebuild-on-refresh lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::ForecastEntry;
use weather_monitor::services::ForecastSummaryService;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn entry(at: &str, temp_kelvin: &str, humidity: i32, wind: &str, condition: &str) -> ForecastEntry {
    let forecast_at: DateTime<Utc> = at.parse().unwrap();
    ForecastEntry {
        forecast_at,
        temperature_kelvin: Some(dec(temp_kelvin)),
        humidity_percent: Some(humidity),
        wind_speed_mps: Some(dec(wind)),
        condition: Some(condition.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Entries bucket under their calendar date
    #[test]
    fn test_batch_groups_by_date() {
        let mut service = ForecastSummaryService::new();
        let batch = vec![
            entry("2024-10-18T06:00:00Z", "290.15", 60, "4.0", "Clouds"),
            entry("2024-10-18T18:00:00Z", "294.15", 70, "6.0", "Clouds"),
            entry("2024-10-19T06:00:00Z", "288.15", 80, "3.0", "Rain"),
        ];

        let accepted = service.ingest_batch("Chicago", &batch);
        assert_eq!(accepted, 3);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.len(), 2);

        assert_eq!(snapshot[0].date, date("2024-10-18"));
        assert_eq!(snapshot[0].average_temp, dec("19")); // mean of 17°C and 21°C
        assert_eq!(snapshot[0].sample_count, 2);

        assert_eq!(snapshot[1].date, date("2024-10-19"));
        assert_eq!(snapshot[1].average_temp, dec("15"));
        assert_eq!(snapshot[1].sample_count, 1);
    }

    /// A bad entry is skipped; the rest of the batch lands
    #[test]
    fn test_bad_entry_skipped_rest_of_batch_lands() {
        let mut service = ForecastSummaryService::new();
        let mut broken = entry("2024-10-18T12:00:00Z", "291.15", 65, "5.0", "Clear");
        broken.humidity_percent = None;

        let batch = vec![
            entry("2024-10-18T06:00:00Z", "290.15", 60, "4.0", "Clear"),
            broken,
            entry("2024-10-18T18:00:00Z", "292.15", 70, "6.0", "Clear"),
        ];

        let accepted = service.ingest_batch("Delhi", &batch);
        assert_eq!(accepted, 2);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].sample_count, 2);
        assert_eq!(snapshot[0].average_temp, dec("18"));
    }

    /// A refresh clears the previous map entirely
    #[test]
    fn test_refresh_rebuilds_map() {
        let mut service = ForecastSummaryService::new();
        service.ingest_batch(
            "Chicago",
            &[entry("2024-10-18T06:00:00Z", "290.15", 60, "4.0", "Clouds")],
        );

        let batches = vec![(
            "Mumbai".to_string(),
            vec![entry("2024-10-19T06:00:00Z", "303.15", 75, "2.0", "Rain")],
        )];
        service.reset_and_ingest_all(&batches);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].location, "Mumbai");
        assert_eq!(snapshot[0].date, date("2024-10-19"));
    }

    /// One location's bad batch never blocks another's
    #[test]
    fn test_bad_location_does_not_block_others() {
        let mut service = ForecastSummaryService::new();

        let mut broken = entry("2024-10-18T06:00:00Z", "290.15", 60, "4.0", "Clear");
        broken.condition = None;

        let batches = vec![
            ("Chicago".to_string(), vec![broken]),
            (
                "New York".to_string(),
                vec![entry("2024-10-18T06:00:00Z", "292.15", 55, "3.0", "Clear")],
            ),
        ];
        service.reset_and_ingest_all(&batches);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].location, "New York");
    }

    /// Snapshots order by date, then location
    #[test]
    fn test_snapshot_ordering() {
        let mut service = ForecastSummaryService::new();
        let batches = vec![
            (
                "New York".to_string(),
                vec![
                    entry("2024-10-19T06:00:00Z", "292.15", 55, "3.0", "Clear"),
                    entry("2024-10-18T06:00:00Z", "291.15", 50, "2.0", "Clear"),
                ],
            ),
            (
                "Chicago".to_string(),
                vec![entry("2024-10-19T06:00:00Z", "289.15", 60, "4.0", "Clouds")],
            ),
        ];
        service.reset_and_ingest_all(&batches);

        let keys: Vec<(NaiveDate, String)> = service
            .snapshot()
            .into_iter()
            .map(|s| (s.date, s.location))
            .collect();
        assert_eq!(
            keys,
            vec![
                (date("2024-10-18"), "New York".to_string()),
                (date("2024-10-19"), "Chicago".to_string()),
                (date("2024-10-19"), "New York".to_string()),
            ]
        );
    }

    /// A fresh service snapshots to nothing
    #[test]
    fn test_snapshot_empty_service() {
        let service = ForecastSummaryService::new();
        assert!(service.snapshot().is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating Kelvin temperatures (-40.00 to 50.00°C)
    fn temperature_kelvin_strategy() -> impl Strategy<Value = Decimal> {
        (23315i64..=32315i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating humidity percentages
    fn humidity_strategy() -> impl Strategy<Value = i32> {
        0..=100i32
    }

    /// Strategy for generating wind speeds
    fn wind_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=300i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 30.0 m/s
    }

    /// Strategy for generating a forecast hour on one of three days
    fn timestamp_strategy() -> impl Strategy<Value = String> {
        (18u32..=20u32, 0u32..=23u32)
            .prop_map(|(day, hour)| format!("2024-10-{:02}T{:02}:00:00Z", day, hour))
    }

    fn entry_strategy() -> impl Strategy<Value = ForecastEntry> {
        (
            timestamp_strategy(),
            temperature_kelvin_strategy(),
            humidity_strategy(),
            wind_strategy(),
            prop::sample::select(vec!["Clear", "Clouds", "Rain"]),
        )
            .prop_map(|(at, temp, humidity, wind, condition)| {
                let mut e = entry(&at, "290.15", humidity, "5.0", condition);
                e.temperature_kelvin = Some(temp);
                e.wind_speed_mps = Some(wind);
                e
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Accepted entries all land; snapshot sample counts add up
        #[test]
        fn prop_sample_counts_add_up(
            batch in prop::collection::vec(entry_strategy(), 1..30)
        ) {
            let mut service = ForecastSummaryService::new();
            let accepted = service.ingest_batch("Chicago", &batch);
            prop_assert_eq!(accepted, batch.len());

            let total: usize = service.snapshot().iter().map(|s| s.sample_count).sum();
            prop_assert_eq!(total, batch.len());
        }

        /// Every summarised bucket keeps its statistics bounded
        #[test]
        fn prop_forecast_statistics_bounded(
            batch in prop::collection::vec(entry_strategy(), 1..30)
        ) {
            let mut service = ForecastSummaryService::new();
            service.ingest_batch("Delhi", &batch);

            for summary in service.snapshot() {
                prop_assert!(summary.min_temp <= summary.average_temp);
                prop_assert!(summary.average_temp <= summary.max_temp);
                prop_assert!(summary.average_humidity >= Decimal::ZERO);
                prop_assert!(summary.average_humidity <= Decimal::from(100));
            }
        }

        /// A refresh is a full rebuild: two refreshes with the same input
        /// produce identical snapshots
        #[test]
        fn prop_refresh_is_idempotent(
            batch in prop::collection::vec(entry_strategy(), 1..20)
        ) {
            let mut service = ForecastSummaryService::new();
            let batches = vec![("Mumbai".to_string(), batch)];

            service.reset_and_ingest_all(&batches);
            let first = service.snapshot();

            service.reset_and_ingest_all(&batches);
            prop_assert_eq!(service.snapshot(), first);
        }
    }
}
