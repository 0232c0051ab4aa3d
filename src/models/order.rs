//! Modelo de Order
//!
//! Una orden es un destino de entrega. Mapea exactamente a la tabla
//! `orders` del schema con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Orden de entrega - mapea a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub street: String,
    pub number: String,
    pub int_number: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub administrative_area: String,
    pub sub_administrative_area: String,
    pub country: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub is_manual: bool,
    /// Una orden pertenece a lo sumo a una ruta activa; este flag la
    /// excluye del pool de órdenes sin asignar y nunca regresa a false
    /// desde este servicio.
    pub route_assigned: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Orden anotada con su posición de entrega dentro de una ruta
#[derive(Debug, Clone)]
pub struct OrderWithSequence {
    pub order: Order,
    pub sequence_number: i32,
}
