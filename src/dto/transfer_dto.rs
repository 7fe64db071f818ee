use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request para reclamar un vehículo con un código de transferencia
#[derive(Debug, Deserialize)]
pub struct ClaimTransferRequest {
    pub code: String,
}

/// Response al generar o regenerar un código de transferencia
#[derive(Debug, Serialize)]
pub struct TransferCodeResponse {
    pub vehicle_id: Uuid,
    pub code: String,
}

/// Response al reclamar un vehículo
#[derive(Debug, Serialize)]
pub struct ClaimTransferResponse {
    pub vehicle_id: Uuid,
}
