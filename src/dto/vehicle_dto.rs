use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(
        length(min = 1, max = 100),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub make: String,

    #[validate(
        length(min = 1, max = 100),
        custom = "crate::utils::validation::validate_not_empty"
    )]
    pub model: String,

    // Primer automóvil patentado: 1886
    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,

    #[validate(custom = "crate::utils::validation::validate_vin")]
    pub vin: Option<String>,
}

/// Response de vehículo para la API
///
/// Incluye transfer_code: solo el propietario puede leer el vehículo,
/// y necesita ver el código pendiente para compartirlo.
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub transfer_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            transfer_code: vehicle.transfer_code,
            created_at: vehicle.created_at,
        }
    }
}
