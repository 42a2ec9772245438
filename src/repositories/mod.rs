pub mod directory;
pub mod readings;

pub use directory::PgEntityDirectory;
pub use readings::PgReadingStore;

use async_trait::async_trait;

use crate::analytics::aggregate_by_day;
use crate::error::Result;
use crate::models::{
    Aggregation, Inverter, Metric, Plant, PowerSample, RawDailyAggregate, RawValue, Reading,
    TimeWindow,
};

/// Read access to inverter telemetry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Readings of one inverter inside `window` with a value for `metric`,
    /// ascending by timestamp.
    async fn readings(
        &self,
        inverter_id: i64,
        metric: Metric,
        window: TimeWindow,
    ) -> Result<Vec<Reading>>;

    /// Non-null active power samples of one inverter inside `window`,
    /// ascending by timestamp.
    async fn power_series(&self, inverter_id: i64, window: TimeWindow) -> Result<Vec<PowerSample>>;

    /// Per-day aggregate of `metric`. Stores that can group on their side
    /// override this; the default groups the fetched window in process.
    async fn daily_aggregate(
        &self,
        inverter_id: i64,
        metric: Metric,
        op: Aggregation,
        window: TimeWindow,
    ) -> Result<Vec<RawDailyAggregate>> {
        let readings = self.readings(inverter_id, metric, window).await?;
        Ok(aggregate_by_day(&readings, metric, op)
            .into_iter()
            .map(|entry| RawDailyAggregate {
                day: entry.day,
                value: RawValue::from(entry.value),
            })
            .collect())
    }
}

/// Lookup of plants, inverters and plant membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    async fn find_inverter(&self, inverter_id: i64) -> Result<Option<Inverter>>;

    async fn find_plant(&self, plant_id: i64) -> Result<Option<Plant>>;

    async fn plant_inverter_ids(&self, plant_id: i64) -> Result<Vec<i64>>;

    async fn list_plants(&self) -> Result<Vec<Plant>>;

    async fn list_inverters(&self, plant_id: Option<i64>) -> Result<Vec<Inverter>>;
}
