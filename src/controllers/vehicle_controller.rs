use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        request.validate().map_err(AppError::Validation)?;

        // El VIN se guarda normalizado en mayúsculas
        let vin = request.vin.map(|v| v.trim().to_ascii_uppercase());

        let vehicle = Vehicle::new(owner_id, request.make, request.model, request.year, vin);
        let saved_vehicle = self.repository.create(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved_vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        // Verificar que pertenece al usuario
        if vehicle.owner_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have access to this vehicle".to_string(),
            ));
        }

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_owner(user_id).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
