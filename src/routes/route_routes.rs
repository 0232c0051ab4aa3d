use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::common::ApiResponse;
use crate::dto::order_dto::OrderResponse;
use crate::dto::route_dto::{
    AssignOperatorRequest, CreateRouteRequest, RouteDetailResponse, RouteFilters,
    RouteListResponse, RouteResponse, UpdateRouteStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route))
        .route("/", get(list_routes))
        .route("/unassigned-orders", get(list_unassigned_orders))
        .route("/:id", get(get_route_detail))
        .route("/:id/operator", put(assign_operator))
        .route("/:id/status", put(update_route_status))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteListResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list(filters.status).await?;
    Ok(Json(response))
}

async fn list_unassigned_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list_unassigned_orders().await?;
    Ok(Json(response))
}

async fn get_route_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.detail(id).await?;
    Ok(Json(response))
}

async fn assign_operator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignOperatorRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.assign_operator(id, request.operator_id).await?;
    Ok(Json(response))
}

async fn update_route_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteStatusRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.update_status(id, &request.status).await?;
    Ok(Json(response))
}
