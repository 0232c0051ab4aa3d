use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::order_dto::OrderWithSequenceResponse;
use crate::models::route::{Route, RouteStatus, RouteWithStats};

/// Request para crear una ruta con sus órdenes seleccionadas.
/// El orden de `order_ids` es el orden de entrega.
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub alias: String,
    pub order_ids: Vec<Uuid>,
}

/// Filtro de listado (?status=pending|active|completed|todas)
#[derive(Debug, Deserialize)]
pub struct RouteFilters {
    pub status: Option<String>,
}

/// Request para asignar un operador a la ruta
#[derive(Debug, Deserialize)]
pub struct AssignOperatorRequest {
    pub operator_id: Uuid,
}

/// Request para cambiar el estado de la ruta
#[derive(Debug, Deserialize)]
pub struct UpdateRouteStatusRequest {
    pub status: String,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub alias: String,
    pub status: RouteStatus,
    pub operator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            alias: route.alias,
            status: RouteStatus::normalize(&route.status),
            operator_id: route.operator_id,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}

/// Fila de listado: ruta con número de paradas y nombre del operador
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub id: Uuid,
    pub alias: String,
    pub status: RouteStatus,
    pub stops: i64,
    pub operator_id: Option<Uuid>,
    pub operator_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RouteWithStats> for RouteListResponse {
    fn from(row: RouteWithStats) -> Self {
        let operator_name = match (row.operator_name, row.operator_lastname) {
            (Some(name), Some(lastname)) => Some(format!("{} {}", name, lastname)),
            (Some(name), None) => Some(name),
            _ => None,
        };

        Self {
            id: row.id,
            alias: row.alias,
            status: RouteStatus::normalize(&row.status),
            stops: row.stops,
            operator_id: row.operator_id,
            operator_name,
            created_at: row.created_at,
        }
    }
}

/// Detalle de ruta: la ruta más sus órdenes en orden de entrega
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub route: RouteResponse,
    pub orders: Vec<OrderWithSequenceResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_row(status: &str, name: Option<&str>, lastname: Option<&str>) -> RouteWithStats {
        RouteWithStats {
            id: Uuid::new_v4(),
            alias: "Zona Norte - Mañana".to_string(),
            status: status.to_string(),
            operator_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            stops: 8,
            operator_name: name.map(String::from),
            operator_lastname: lastname.map(String::from),
        }
    }

    #[test]
    fn test_list_response_normalizes_unknown_status() {
        let response = RouteListResponse::from(stats_row("weird_value", None, None));
        assert_eq!(response.status, RouteStatus::Pending);
    }

    #[test]
    fn test_list_response_joins_operator_name() {
        let response = RouteListResponse::from(stats_row("active", Some("Juan"), Some("Pérez")));
        assert_eq!(response.operator_name.as_deref(), Some("Juan Pérez"));

        let response = RouteListResponse::from(stats_row("active", None, None));
        assert_eq!(response.operator_name, None);
    }
}
