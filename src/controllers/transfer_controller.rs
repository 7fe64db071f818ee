use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::transfer_dto::{ClaimTransferRequest, ClaimTransferResponse, TransferCodeResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::transfer_service::TransferService;
use crate::utils::errors::AppError;

pub struct TransferController {
    service: TransferService,
}

impl TransferController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: TransferService::new(Arc::new(VehicleRepository::new(pool))),
        }
    }

    /// Generar (o regenerar) el código de transferencia de un vehículo propio
    pub async fn generate_code(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
    ) -> Result<TransferCodeResponse, AppError> {
        let code = self.service.initiate_transfer(vehicle_id, user_id).await?;

        Ok(TransferCodeResponse { vehicle_id, code })
    }

    /// Reclamar un vehículo presentando su código de transferencia
    pub async fn claim(
        &self,
        user_id: Uuid,
        request: ClaimTransferRequest,
    ) -> Result<ClaimTransferResponse, AppError> {
        let vehicle_id = self.service.claim_transfer(&request.code, user_id).await?;

        Ok(ClaimTransferResponse { vehicle_id })
    }
}
