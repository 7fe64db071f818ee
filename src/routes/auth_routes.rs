use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rutas públicas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Rutas de autenticación que requieren sesión
pub fn create_auth_me_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.me(user.user_id).await?;
    Ok(Json(response))
}
