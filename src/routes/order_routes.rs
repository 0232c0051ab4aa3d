use axum::{
    extract::{Path, State},
    http::header,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::common::ApiResponse;
use crate::dto::order_dto::{
    CreateOrderRequest, CsvImportRequest, CsvImportResponse, OrderResponse, UpdateOrderRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::csv_import_service::csv_template;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/", get(list_orders))
        .route("/csv-template", get(download_csv_template))
        .route("/csv-import", post(import_csv))
        .route("/:id", get(get_order))
        .route("/:id", put(update_order))
        .route("/:id", delete(delete_order))
}

async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.create(request, user.user_id).await?;
    Ok(Json(response))
}

async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Orden eliminada exitosamente"
    })))
}

/// Plantilla CSV descargable con el formato esperado de importación
async fn download_csv_template() -> ([(header::HeaderName, &'static str); 2], String) {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ordenes_template.csv\"",
            ),
        ],
        csv_template(),
    )
}

async fn import_csv(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CsvImportRequest>,
) -> Result<Json<CsvImportResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.import_csv(request, user.user_id).await?;
    Ok(Json(response))
}
