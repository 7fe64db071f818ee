use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::transfer_controller::TransferController;
use crate::dto::transfer_dto::{ClaimTransferRequest, ClaimTransferResponse, TransferCodeResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transfer_router() -> Router<AppState> {
    Router::new()
        .route("/:id/code", post(generate_code))
        .route("/claim", post(claim))
}

/// Generar o regenerar el código de transferencia (solo el propietario)
async fn generate_code(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransferCodeResponse>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller.generate_code(id, user.user_id).await?;
    Ok(Json(response))
}

/// Reclamar un vehículo por código (cualquier usuario autenticado)
async fn claim(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<ClaimTransferRequest>,
) -> Result<Json<ClaimTransferResponse>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller.claim(user.user_id, request).await?;
    Ok(Json(response))
}
