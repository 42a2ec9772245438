use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Inverter, InverterListParams, Plant};
use crate::repositories::EntityDirectory;

#[derive(Clone)]
pub struct DirectoryService {
    directory: Arc<dyn EntityDirectory>,
}

impl DirectoryService {
    pub fn new(directory: Arc<dyn EntityDirectory>) -> Self {
        Self { directory }
    }

    pub async fn list_plants(&self) -> Result<Vec<Plant>> {
        self.directory.list_plants().await
    }

    pub async fn get_plant(&self, plant_id: i64) -> Result<Plant> {
        self.directory
            .find_plant(plant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plant with ID \"{}\" not found", plant_id)))
    }

    pub async fn list_inverters(&self, params: &InverterListParams) -> Result<Vec<Inverter>> {
        self.directory.list_inverters(params.plant_id).await
    }

    pub async fn get_inverter(&self, inverter_id: i64) -> Result<Inverter> {
        self.directory
            .find_inverter(inverter_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Inverter with ID \"{}\" not found", inverter_id))
            })
    }
}
