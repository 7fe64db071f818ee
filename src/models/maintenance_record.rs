//! Modelo de MaintenanceRecord
//!
//! Cada registro pertenece a exactamente un vehículo via vehicle_id.
//! El historial acompaña al vehículo: una transferencia de propiedad
//! no altera esta relación.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// MaintenanceRecord principal - mapea exactamente a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub description: Option<String>,
    pub cost: Decimal,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn new(
        vehicle_id: Uuid,
        service_type: String,
        description: Option<String>,
        cost: Decimal,
        image_path: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            service_type,
            description,
            cost,
            image_path,
            created_at: Utc::now(),
        }
    }
}
