use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{
    Aggregation, Metric, PowerSample, RawDailyAggregate, RawValue, Reading, TimeWindow,
};
use crate::repositories::ReadingStore;

#[derive(Clone)]
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

struct ReadingRow(Reading);

impl<'r> FromRow<'r, PgRow> for ReadingRow {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self(Reading {
            inverter_id: row.try_get("inverter_id")?,
            ts: row.try_get("ts")?,
            active_power: row.try_get("active_power")?,
            temperature: row.try_get("temperature")?,
        }))
    }
}

struct DailyRow {
    day: String,
    value: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for DailyRow {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            day: row.try_get("day")?,
            value: row.try_get("value")?,
        })
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn readings(
        &self,
        inverter_id: i64,
        metric: Metric,
        window: TimeWindow,
    ) -> Result<Vec<Reading>> {
        // column names come from a closed enum, never from input
        let query = format!(
            r#"
            SELECT inverter_id, ts, active_power, temperature
            FROM metrics
            WHERE inverter_id = $1
                AND ts >= $2
                AND ts <= $3
                AND {column} IS NOT NULL
            ORDER BY ts ASC
            "#,
            column = metric.column(),
        );

        let rows = sqlx::query_as::<_, ReadingRow>(&query)
            .bind(inverter_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn power_series(&self, inverter_id: i64, window: TimeWindow) -> Result<Vec<PowerSample>> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r#"
            SELECT ts, active_power
            FROM metrics
            WHERE inverter_id = $1
                AND ts >= $2
                AND ts <= $3
                AND active_power IS NOT NULL
            ORDER BY ts ASC
            "#,
        )
        .bind(inverter_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(ts, power_w)| PowerSample { ts, power_w })
            .collect())
    }

    async fn daily_aggregate(
        &self,
        inverter_id: i64,
        metric: Metric,
        op: Aggregation,
        window: TimeWindow,
    ) -> Result<Vec<RawDailyAggregate>> {
        // Days are cut in UTC, same as the in-process aggregator. The value
        // comes back as text so MAX over float8 and AVG share one decode path.
        let query = format!(
            r#"
            SELECT
                to_char(ts AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day,
                {function}({column})::text AS value
            FROM metrics
            WHERE inverter_id = $1
                AND ts >= $2
                AND ts <= $3
                AND {column} IS NOT NULL
            GROUP BY day
            ORDER BY day ASC
            "#,
            function = op.sql_function(),
            column = metric.column(),
        );

        let rows = sqlx::query_as::<_, DailyRow>(&query)
            .bind(inverter_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| RawDailyAggregate {
                day: r.day,
                value: RawValue::from(r.value),
            })
            .collect())
    }
}
