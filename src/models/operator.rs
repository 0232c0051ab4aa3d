//! Modelo de Operator
//!
//! Perfil de conductor con sus documentos de identidad/cumplimiento
//! y vehículos registrados. Los hijos pertenecen exclusivamente a un
//! operador.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Operador (conductor) - mapea a la tabla operators
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Operator {
    pub id: Uuid,
    pub name: String,
    pub lastname: String,
    pub second_lastname: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub curp: String,
    pub rfc: String,
    pub sex: String,
    pub offer_source: String,
    pub short_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Documento subido al bucket de storage - mapea a operator_documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OperatorDocument {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub document_type: String,
    pub file_name: String,
    /// Key dentro del bucket, no una URL
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Vehículo registrado del operador - mapea a operator_vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OperatorVehicle {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
