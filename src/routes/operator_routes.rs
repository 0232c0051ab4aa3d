use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::operator_controller::OperatorController;
use crate::dto::common::ApiResponse;
use crate::dto::operator_dto::{
    CreateOperatorRequest, CreateVehicleRequest, DocumentResponse, OperatorDetailResponse,
    OperatorResponse, SignedUrlQuery, SignedUrlResponse, UpdateOperatorRequest,
    UploadDocumentRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_operator_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_operator))
        .route("/", get(list_operators))
        .route("/:id", get(get_operator_detail))
        .route("/:id", put(update_operator))
        .route("/:id", delete(delete_operator))
        .route("/:id/document", post(upload_document))
        .route("/:id/document", get(list_documents))
        .route("/:id/document/:document_id/url", get(document_signed_url))
        .route("/:id/document/:document_id", delete(delete_document))
        .route("/:id/vehicle", post(register_vehicle))
        .route("/:id/vehicle", get(list_vehicles))
}

async fn register_operator(
    State(state): State<AppState>,
    Json(request): Json<CreateOperatorRequest>,
) -> Result<Json<ApiResponse<OperatorResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn list_operators(
    State(state): State<AppState>,
) -> Result<Json<Vec<OperatorResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_operator_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OperatorDetailResponse>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.get_detail(id).await?;
    Ok(Json(response))
}

async fn update_operator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOperatorRequest>,
) -> Result<Json<ApiResponse<OperatorResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_operator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Operador eliminado exitosamente"
    })))
}

async fn upload_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.upload_document(id, request).await?;
    Ok(Json(response))
}

async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.list_documents(id).await?;
    Ok(Json(response))
}

async fn document_signed_url(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<SignedUrlQuery>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller
        .document_signed_url(id, document_id, query.expires_in)
        .await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    controller.delete_document(id, document_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Documento eliminado exitosamente"
    })))
}

async fn register_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.register_vehicle(id, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = OperatorController::new(state.pool.clone(), state.storage.clone());
    let response = controller.list_vehicles(id).await?;
    Ok(Json(response))
}
