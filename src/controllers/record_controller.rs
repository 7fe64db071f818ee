use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::record_dto::{CreateRecordRequest, RecordResponse};
use crate::models::maintenance_record::MaintenanceRecord;
use crate::repositories::record_repository::RecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};

pub struct RecordController {
    repository: RecordRepository,
    vehicles: VehicleRepository,
}

impl RecordController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RecordRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Verificar que el vehículo existe y pertenece al usuario
    async fn check_vehicle_access(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        if vehicle.owner_id != user_id {
            return Err(forbidden_error(
                "access vehicle",
                "it belongs to another user",
            ));
        }

        Ok(())
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateRecordRequest,
    ) -> Result<ApiResponse<RecordResponse>, AppError> {
        // Validar campos
        request.validate().map_err(AppError::Validation)?;

        if request.cost < Decimal::ZERO {
            return Err(AppError::BadRequest("Cost cannot be negative".to_string()));
        }

        self.check_vehicle_access(request.vehicle_id, user_id).await?;

        let record = MaintenanceRecord::new(
            request.vehicle_id,
            request.service_type,
            request.description,
            request.cost,
            request.image_path,
        );
        let saved_record = self.repository.create(&record).await?;

        Ok(ApiResponse::success_with_message(
            RecordResponse::from(saved_record),
            "Registro de mantenimiento guardado".to_string(),
        ))
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<RecordResponse>, AppError> {
        self.check_vehicle_access(vehicle_id, user_id).await?;

        let records = self.repository.find_by_vehicle(vehicle_id).await?;

        Ok(records.into_iter().map(RecordResponse::from).collect())
    }
}
