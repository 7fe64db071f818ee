use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::record_controller::RecordController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::record_dto::{CreateRecordRequest, RecordResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/vehicle/:vehicle_id", get(list_records))
}

async fn create_record(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<Json<ApiResponse<RecordResponse>>, AppError> {
    let controller = RecordController::new(state.pool.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_records(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let controller = RecordController::new(state.pool.clone());
    let response = controller.list_by_vehicle(vehicle_id, user.user_id).await?;
    Ok(Json(response))
}
