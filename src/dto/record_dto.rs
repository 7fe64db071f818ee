use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance_record::MaintenanceRecord;

/// Request para registrar un servicio de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordRequest {
    pub vehicle_id: Uuid,

    #[validate(
        length(min = 1, max = 100),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub service_type: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub cost: Decimal,

    // Ruta del recibo ya subido al storage; la subida en sí queda fuera de la API
    #[validate(length(max = 512))]
    pub image_path: Option<String>,
}

/// Response de registro de mantenimiento
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub description: Option<String>,
    pub cost: Decimal,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRecord> for RecordResponse {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            service_type: record.service_type,
            description: record.description,
            cost: record.cost,
            image_path: record.image_path,
            created_at: record.created_at,
        }
    }
}
