use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{Inverter, Plant};
use crate::repositories::EntityDirectory;

#[derive(Clone)]
pub struct PgEntityDirectory {
    pool: DbPool,
}

impl PgEntityDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

struct PlantRow(Plant);

impl<'r> FromRow<'r, PgRow> for PlantRow {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self(Plant {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        }))
    }
}

struct InverterRow(Inverter);

impl<'r> FromRow<'r, PgRow> for InverterRow {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self(Inverter {
            id: row.try_get("id")?,
            external_id: row.try_get("external_id")?,
            name: row.try_get("name")?,
            plant_id: row.try_get("plant_id")?,
            plant_name: row.try_get("plant_name")?,
            created_at: row.try_get("created_at")?,
        }))
    }
}

const INVERTER_SELECT: &str = r#"
    SELECT
        i.id,
        i.external_id,
        i.name,
        i.plant_id,
        p.name AS plant_name,
        i.created_at
    FROM inverters i
    LEFT JOIN plants p ON p.id = i.plant_id
"#;

#[async_trait]
impl EntityDirectory for PgEntityDirectory {
    async fn find_inverter(&self, inverter_id: i64) -> Result<Option<Inverter>> {
        let query = format!("{INVERTER_SELECT} WHERE i.id = $1");
        let row = sqlx::query_as::<_, InverterRow>(&query)
            .bind(inverter_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.0))
    }

    async fn find_plant(&self, plant_id: i64) -> Result<Option<Plant>> {
        let row = sqlx::query_as::<_, PlantRow>(
            r#"
            SELECT id, name, created_at
            FROM plants
            WHERE id = $1
            "#,
        )
        .bind(plant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.0))
    }

    async fn plant_inverter_ids(&self, plant_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT id
            FROM inverters
            WHERE plant_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(plant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn list_plants(&self) -> Result<Vec<Plant>> {
        let rows = sqlx::query_as::<_, PlantRow>(
            r#"
            SELECT id, name, created_at
            FROM plants
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn list_inverters(&self, plant_id: Option<i64>) -> Result<Vec<Inverter>> {
        let rows = match plant_id {
            Some(plant_id) => {
                let query = format!("{INVERTER_SELECT} WHERE i.plant_id = $1 ORDER BY i.id ASC");
                sqlx::query_as::<_, InverterRow>(&query)
                    .bind(plant_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("{INVERTER_SELECT} ORDER BY i.id ASC");
                sqlx::query_as::<_, InverterRow>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
