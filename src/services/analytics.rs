use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::analytics::{integrate, normalize_store_aggregates, round_fixed};
use crate::analytics::rounding::ENERGY_DECIMALS;
use crate::error::{AppError, Result};
use crate::models::{
    Aggregation, DailyAggregateEntry, DailyAverageTemperatureEntry, DailyMaxPowerEntry, DateRange,
    DateRangeParams, EnergyResult, EntityType, Metric,
};
use crate::repositories::{EntityDirectory, ReadingStore};

/// Validates analytics requests, pulls the reading window and runs the
/// aggregator or integrator over it. Holds no per-request state.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn ReadingStore>,
    directory: Arc<dyn EntityDirectory>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn ReadingStore>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn daily_max(
        &self,
        inverter_id: i64,
        params: &DateRangeParams,
    ) -> Result<Vec<DailyMaxPowerEntry>> {
        let entries = self
            .daily(inverter_id, params, Metric::ActivePower, Aggregation::Max)
            .await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    pub async fn daily_average_temperature(
        &self,
        inverter_id: i64,
        params: &DateRangeParams,
    ) -> Result<Vec<DailyAverageTemperatureEntry>> {
        let entries = self
            .daily(inverter_id, params, Metric::Temperature, Aggregation::Avg)
            .await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    pub async fn inverter_energy(
        &self,
        inverter_id: i64,
        params: &DateRangeParams,
    ) -> Result<EnergyResult> {
        self.ensure_inverter(inverter_id).await?;
        let range = DateRange::parse(params)?;

        let total_wh = self.integrate_inverter(inverter_id, &range).await?;
        Ok(EnergyResult {
            total_wh,
            start_date: range.start,
            end_date: range.end,
            entity_id: inverter_id,
            entity_type: EntityType::Inverter,
        })
    }

    pub async fn plant_energy(
        &self,
        plant_id: i64,
        params: &DateRangeParams,
    ) -> Result<EnergyResult> {
        if self.directory.find_plant(plant_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Plant with ID \"{}\" not found",
                plant_id
            )));
        }
        let inverter_ids = self.directory.plant_inverter_ids(plant_id).await?;
        let range = DateRange::parse(params)?;

        let total_wh = if inverter_ids.is_empty() {
            info!(plant_id, "plant has no inverters; generation is zero");
            0.0
        } else {
            // one integration per inverter, never a pooled walk
            let per_inverter = try_join_all(
                inverter_ids
                    .iter()
                    .map(|&inverter_id| self.integrate_inverter(inverter_id, &range)),
            )
            .await?;

            debug!(
                plant_id,
                inverters = inverter_ids.len(),
                "summing per-inverter generation"
            );
            round_fixed(per_inverter.iter().sum(), ENERGY_DECIMALS).unwrap_or(0.0)
        };

        Ok(EnergyResult {
            total_wh,
            start_date: range.start,
            end_date: range.end,
            entity_id: plant_id,
            entity_type: EntityType::Plant,
        })
    }

    async fn daily(
        &self,
        inverter_id: i64,
        params: &DateRangeParams,
        metric: Metric,
        op: Aggregation,
    ) -> Result<Vec<DailyAggregateEntry>> {
        self.ensure_inverter(inverter_id).await?;
        let range = DateRange::parse(params)?;

        let rows = self
            .store
            .daily_aggregate(inverter_id, metric, op, range.window())
            .await?;
        debug!(inverter_id, ?metric, ?op, days = rows.len(), "fetched daily aggregates");

        Ok(normalize_store_aggregates(rows))
    }

    async fn integrate_inverter(&self, inverter_id: i64, range: &DateRange) -> Result<f64> {
        let samples = self.store.power_series(inverter_id, range.window()).await?;
        debug!(inverter_id, samples = samples.len(), "fetched power series");

        if samples.len() < 2 {
            info!(
                inverter_id,
                samples = samples.len(),
                "not enough samples to integrate; generation is zero"
            );
            return Ok(0.0);
        }

        let integration = integrate(&BTreeMap::from([(inverter_id, samples)]));
        if integration.segments_skipped > 0 {
            warn!(
                inverter_id,
                skipped = integration.segments_skipped,
                used = integration.segments_used,
                "skipped power segments (negative, non-finite or out-of-order samples)"
            );
        }

        Ok(integration.total_wh)
    }

    async fn ensure_inverter(&self, inverter_id: i64) -> Result<()> {
        match self.directory.find_inverter(inverter_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Inverter with ID \"{}\" not found",
                inverter_id
            ))),
        }
    }
}
