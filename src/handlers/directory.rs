use axum::{extract::State, response::Json};

use super::extract::{Path, Query};
use super::AppState;
use crate::error::Result;
use crate::models::{Inverter, InverterListParams, Plant};

pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>> {
    Ok(Json(state.directory.list_plants().await?))
}

pub async fn get_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<i64>,
) -> Result<Json<Plant>> {
    Ok(Json(state.directory.get_plant(plant_id).await?))
}

pub async fn list_inverters(
    State(state): State<AppState>,
    Query(params): Query<InverterListParams>,
) -> Result<Json<Vec<Inverter>>> {
    Ok(Json(state.directory.list_inverters(&params).await?))
}

pub async fn get_inverter(
    State(state): State<AppState>,
    Path(inverter_id): Path<i64>,
) -> Result<Json<Inverter>> {
    Ok(Json(state.directory.get_inverter(inverter_id).await?))
}
