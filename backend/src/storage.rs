//! Persistence sink for daily weather summaries
//!
//! One row per (date, location), upserted on refresh. Persistence is
//! optional at runtime; without a configured database the monitor runs
//! in-memory only.

use rust_decimal::Decimal;
use shared::WeatherSummary;
use sqlx::PgPool;

use crate::error::AppResult;

/// Store for daily summary rows
#[derive(Clone)]
pub struct SummaryStore {
    db: PgPool,
}

impl SummaryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create the summary table if it does not exist yet.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_weather_summary (
                id SERIAL PRIMARY KEY,
                date DATE NOT NULL,
                location VARCHAR(255) NOT NULL,
                avg_temp NUMERIC NOT NULL,
                max_temp NUMERIC NOT NULL,
                min_temp NUMERIC NOT NULL,
                dominant_condition VARCHAR(255) NOT NULL,
                UNIQUE (date, location)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Insert or update one row per summary.
    pub async fn upsert_summaries(&self, summaries: &[WeatherSummary]) -> AppResult<()> {
        if summaries.is_empty() {
            tracing::info!("No summaries to persist");
            return Ok(());
        }

        for summary in summaries {
            sqlx::query(
                r#"
                INSERT INTO daily_weather_summary (
                    date, location, avg_temp, max_temp, min_temp, dominant_condition
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (date, location) DO UPDATE SET
                    avg_temp = EXCLUDED.avg_temp,
                    max_temp = EXCLUDED.max_temp,
                    min_temp = EXCLUDED.min_temp,
                    dominant_condition = EXCLUDED.dominant_condition
                "#,
            )
            .bind(summary.date)
            .bind(&summary.location)
            .bind(summary.average_temp)
            .bind(summary.max_temp)
            .bind(summary.min_temp)
            .bind(&summary.dominant_condition)
            .execute(&self.db)
            .await?;
        }

        tracing::info!(count = summaries.len(), "persisted daily summaries");
        Ok(())
    }

    /// Historical average of the stored avg_temp rows for a location.
    pub async fn average_temperature(&self, location: &str) -> AppResult<Option<Decimal>> {
        let avg = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT AVG(avg_temp) FROM daily_weather_summary WHERE location = $1",
        )
        .bind(location)
        .fetch_one(&self.db)
        .await?;

        Ok(avg)
    }
}
