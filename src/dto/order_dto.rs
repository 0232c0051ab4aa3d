use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::order::{Order, OrderWithSequence};

/// Request para crear una orden manual
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 200))]
    pub street: String,

    #[validate(length(min = 1, max = 20))]
    pub number: String,

    #[validate(length(max = 20))]
    pub int_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub neighborhood: String,

    #[validate(length(min = 4, max = 10))]
    pub postal_code: String,

    #[validate(length(min = 1, max = 100))]
    pub administrative_area: String,

    #[validate(length(min = 1, max = 100))]
    pub sub_administrative_area: String,

    pub lat: Option<f64>,
    pub lng: Option<f64>,

    #[validate(length(max = 500))]
    pub reference: Option<String>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Request para actualizar una orden (campos parciales)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, max = 200))]
    pub street: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub number: Option<String>,

    #[validate(length(max = 20))]
    pub int_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub neighborhood: Option<String>,

    #[validate(length(min = 4, max = 10))]
    pub postal_code: Option<String>,

    pub lat: Option<f64>,
    pub lng: Option<f64>,

    #[validate(length(max = 500))]
    pub reference: Option<String>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Response de orden para la API
#[derive(Debug, Serialize)]
pub struct OrderResponse {
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
    pub route_assigned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            street: order.street,
            number: order.number,
            int_number: order.int_number,
            neighborhood: order.neighborhood,
            postal_code: order.postal_code,
            administrative_area: order.administrative_area,
            sub_administrative_area: order.sub_administrative_area,
            country: order.country,
            lat: order.lat,
            lng: order.lng,
            reference: order.reference,
            notes: order.notes,
            is_manual: order.is_manual,
            route_assigned: order.route_assigned,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Orden con su posición dentro de una ruta
#[derive(Debug, Serialize)]
pub struct OrderWithSequenceResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub sequence_number: i32,
}

impl From<OrderWithSequence> for OrderWithSequenceResponse {
    fn from(entry: OrderWithSequence) -> Self {
        Self {
            order: entry.order.into(),
            sequence_number: entry.sequence_number,
        }
    }
}

/// Request de importación CSV: el body trae el texto crudo del archivo
#[derive(Debug, Deserialize)]
pub struct CsvImportRequest {
    pub file_name: Option<String>,
    pub content: String,
}

/// Reporte agregado de la importación CSV
#[derive(Debug, Serialize)]
pub struct CsvImportResponse {
    pub created: usize,
    pub errors: usize,
    pub message: String,
}
