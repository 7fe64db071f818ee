use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::services::transfer_service::VehicleStore;
use crate::utils::errors::AppError;

// Código SQLSTATE de violación de unicidad en PostgreSQL
const UNIQUE_VIOLATION: &str = "23505";

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, owner_id, make, model, year, vin, transfer_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.owner_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .bind(&vehicle.transfer_code)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        self.find_by_id(id).await
    }

    async fn set_transfer_code(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        code: &str,
    ) -> Result<bool, AppError> {
        // La condición de propiedad viaja en el mismo UPDATE: si el vehículo
        // cambió de dueño entre la lectura y esta escritura, no afecta filas.
        // El índice parcial sobre transfer_code rechaza códigos ya activos.
        let result = sqlx::query(
            "UPDATE vehicles SET transfer_code = $3 WHERE id = $1 AND owner_id = $2",
        )
        .bind(vehicle_id)
        .bind(owner_id)
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("transfer code already active".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn claim_by_code(
        &self,
        code: &str,
        new_owner_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        // Búsqueda y reasignación en una sola mutación condicional: de varios
        // reclamos concurrentes del mismo código, solo uno afecta la fila.
        // No hay SELECT previo, así que un código fallido no revela nada.
        let result: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE vehicles
            SET owner_id = $1, transfer_code = NULL
            WHERE transfer_code = $2
            RETURNING id
            "#,
        )
        .bind(new_owner_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.map(|row| row.0))
    }
}
