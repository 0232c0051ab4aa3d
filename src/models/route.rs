//! Modelo de Route
//!
//! Una ruta agrupa órdenes seleccionadas para entregarse juntas, con una
//! posición de entrega por orden y opcionalmente un operador asignado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la ruta. En la base se guarda como texto; cualquier valor
/// fuera del conjunto conocido se normaliza a `pending` al leer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pending,
    Active,
    Completed,
}

impl RouteStatus {
    /// Normalizar un valor leído de la base. Valores corruptos o legacy
    /// se muestran como `pending` en lugar de romper el render.
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(RouteStatus::Pending)
    }

    /// Parseo estricto, para filtros y actualizaciones de estado.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(RouteStatus::Pending),
            "active" => Some(RouteStatus::Active),
            "completed" => Some(RouteStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Pending => "pending",
            RouteStatus::Active => "active",
            RouteStatus::Completed => "completed",
        }
    }
}

/// Route principal - mapea a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub alias: String,
    pub status: String,
    pub operator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asociación ruta-orden con su posición de entrega (1-based).
/// Se crea una sola vez al crear la ruta y no se reordena después.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RouteOrder {
    pub id: Uuid,
    pub route_id: Uuid,
    pub order_id: Uuid,
    pub sequence_number: i32,
    pub created_at: DateTime<Utc>,
}

/// Fila de listado: ruta anotada con número de paradas y nombre del
/// operador asignado (si lo hay).
#[derive(Debug, Clone, FromRow)]
pub struct RouteWithStats {
    pub id: Uuid,
    pub alias: String,
    pub status: String,
    pub operator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stops: i64,
    pub operator_name: Option<String>,
    pub operator_lastname: Option<String>,
}

/// Par (orden, posición) listo para insertarse en route_orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAssignment {
    pub order_id: Uuid,
    pub sequence_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_values() {
        assert_eq!(RouteStatus::normalize("pending"), RouteStatus::Pending);
        assert_eq!(RouteStatus::normalize("active"), RouteStatus::Active);
        assert_eq!(RouteStatus::normalize("completed"), RouteStatus::Completed);
    }

    #[test]
    fn test_normalize_unknown_value_falls_back_to_pending() {
        assert_eq!(RouteStatus::normalize("weird_value"), RouteStatus::Pending);
        assert_eq!(RouteStatus::normalize(""), RouteStatus::Pending);
        assert_eq!(RouteStatus::normalize("PENDING"), RouteStatus::Pending);
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!(RouteStatus::parse("active"), Some(RouteStatus::Active));
        assert_eq!(RouteStatus::parse("weird_value"), None);
    }

    #[test]
    fn test_as_str_round_trip() {
        for status in [
            RouteStatus::Pending,
            RouteStatus::Active,
            RouteStatus::Completed,
        ] {
            assert_eq!(RouteStatus::parse(status.as_str()), Some(status));
        }
    }
}
