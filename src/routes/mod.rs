pub mod auth_routes;
pub mod record_routes;
pub mod transfer_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Ensamblar el router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    // Rutas que requieren usuario autenticado
    let protected = Router::new()
        .nest("/api/auth", auth_routes::create_auth_me_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .nest("/api/record", record_routes::create_record_router())
        .nest("/api/transfer", transfer_routes::create_transfer_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "garage-ledger",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
