use axum::{extract::State, response::Json};

use super::extract::{Path, Query};
use super::AppState;
use crate::error::Result;
use crate::models::{
    DailyAverageTemperatureEntry, DailyMaxPowerEntry, DataResponse, DateRangeParams, EnergyResult,
};

pub async fn max_power_by_day(
    State(state): State<AppState>,
    Path(inverter_id): Path<i64>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<DataResponse<DailyMaxPowerEntry>>> {
    let data = state.analytics.daily_max(inverter_id, &params).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn avg_temperature_by_day(
    State(state): State<AppState>,
    Path(inverter_id): Path<i64>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<DataResponse<DailyAverageTemperatureEntry>>> {
    let data = state
        .analytics
        .daily_average_temperature(inverter_id, &params)
        .await?;
    Ok(Json(DataResponse { data }))
}

pub async fn inverter_generation(
    State(state): State<AppState>,
    Path(inverter_id): Path<i64>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<EnergyResult>> {
    let result = state.analytics.inverter_energy(inverter_id, &params).await?;
    Ok(Json(result))
}

pub async fn plant_generation(
    State(state): State<AppState>,
    Path(plant_id): Path<i64>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<EnergyResult>> {
    let result = state.analytics.plant_energy(plant_id, &params).await?;
    Ok(Json(result))
}
