use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::operator::{Operator, OperatorDocument, OperatorVehicle};

/// Request para registrar un operador
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOperatorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub lastname: String,

    #[validate(length(min = 1, max = 100))]
    pub second_lastname: String,

    #[validate(email)]
    pub email: String,

    pub phone: String,

    pub birth_date: NaiveDate,

    pub curp: String,

    pub rfc: String,

    #[validate(length(min = 1, max = 20))]
    pub sex: String,

    #[validate(length(min = 1, max = 100))]
    pub offer_source: String,
}

/// Request para actualizar datos personales del operador
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOperatorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub second_lastname: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub phone: Option<String>,
}

/// Response de operador
#[derive(Debug, Serialize)]
pub struct OperatorResponse {
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
    pub created_at: DateTime<Utc>,
}

impl From<Operator> for OperatorResponse {
    fn from(op: Operator) -> Self {
        Self {
            id: op.id,
            name: op.name,
            lastname: op.lastname,
            second_lastname: op.second_lastname,
            email: op.email,
            phone: op.phone,
            birth_date: op.birth_date,
            curp: op.curp,
            rfc: op.rfc,
            sex: op.sex,
            offer_source: op.offer_source,
            short_id: op.short_id,
            created_at: op.created_at,
        }
    }
}

/// Detalle de operador con sus documentos y vehículos
#[derive(Debug, Serialize)]
pub struct OperatorDetailResponse {
    pub operator: OperatorResponse,
    pub documents: Vec<DocumentResponse>,
    pub vehicles: Vec<VehicleResponse>,
}

/// Request de subida de documento: el archivo viaja en base64
#[derive(Debug, Deserialize)]
pub struct UploadDocumentRequest {
    pub document_type: String,
    pub file_name: String,
    pub content_base64: String,
}

/// Response de documento (sin URL; las URLs firmadas se piden aparte)
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub document_type: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<OperatorDocument> for DocumentResponse {
    fn from(doc: OperatorDocument) -> Self {
        Self {
            id: doc.id,
            document_type: doc.document_type,
            file_name: doc.file_name,
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// Parámetros para pedir una URL firmada
#[derive(Debug, Deserialize)]
pub struct SignedUrlQuery {
    pub expires_in: Option<u64>,
}

/// Response con la URL firmada de un documento
#[derive(Debug, Serialize)]
pub struct SignedUrlResponse {
    pub url: String,
    pub expires_in: u64,
}

/// Request para registrar un vehículo del operador
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    pub year: i32,

    pub plate: String,

    #[validate(length(max = 30))]
    pub color: Option<String>,
}

/// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OperatorVehicle> for VehicleResponse {
    fn from(v: OperatorVehicle) -> Self {
        Self {
            id: v.id,
            operator_id: v.operator_id,
            brand: v.brand,
            model: v.model,
            year: v.year,
            plate: v.plate,
            color: v.color,
            created_at: v.created_at,
        }
    }
}
