//! Routers HTTP de la aplicación
//!
//! Handlers delgados: extraen, delegan al controller y serializan.
//! `create_app_router` ensambla la aplicación completa a partir del
//! estado, para que el binario y los tests levanten el mismo router.

pub mod operator_routes;
pub mod order_routes;
pub mod route_routes;

pub use operator_routes::create_operator_router;
pub use order_routes::create_order_router;
pub use route_routes::create_route_router;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Aplicación completa: health público, API protegida por JWT y capas
/// de CORS y tracing. Fuera de desarrollo el CORS se restringe a los
/// orígenes configurados.
pub fn create_app_router(state: AppState) -> Router {
    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    let api = Router::new()
        .nest("/api/order", create_order_router())
        .nest("/api/route", create_route_router())
        .nest("/api/operator", create_operator_router())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_endpoint))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check simple, sin autenticación
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "lastmile-admin",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
