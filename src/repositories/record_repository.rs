use crate::models::maintenance_record::MaintenanceRecord;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &MaintenanceRecord) -> Result<MaintenanceRecord, AppError> {
        let result = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records
                (id, vehicle_id, service_type, description, cost, image_path, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(&record.service_type)
        .bind(&record.description)
        .bind(record.cost)
        .bind(&record.image_path)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let result = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE vehicle_id = $1 ORDER BY created_at DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }
}
