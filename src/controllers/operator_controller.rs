//! Controller de operadores
//!
//! Alta y mantenimiento de perfiles de conductor, sus documentos en el
//! object storage y sus vehículos registrados.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::operator_dto::{
    CreateOperatorRequest, CreateVehicleRequest, DocumentResponse, OperatorDetailResponse,
    OperatorResponse, SignedUrlResponse, UpdateOperatorRequest, UploadDocumentRequest,
    VehicleResponse,
};
use crate::repositories::operator_repository::OperatorRepository;
use crate::services::storage_service::{
    content_type_for, StorageService, DEFAULT_SIGNED_URL_EXPIRY_SECS,
};
use crate::utils::errors::AppError;
use crate::utils::validation::{
    validate_curp, validate_not_empty, validate_phone, validate_plate, validate_positive,
    validate_range, validate_rfc,
};

/// Key del documento dentro del bucket: agrupado por operador, con
/// timestamp para no pisar subidas anteriores del mismo tipo.
pub fn document_object_path(operator_id: Uuid, document_type: &str, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");

    format!(
        "{}/{}_{}.{}",
        operator_id,
        document_type,
        Utc::now().timestamp_millis(),
        extension
    )
}

pub struct OperatorController {
    repository: OperatorRepository,
    storage: StorageService,
}

impl OperatorController {
    pub fn new(pool: PgPool, storage: StorageService) -> Self {
        Self {
            repository: OperatorRepository::new(pool),
            storage,
        }
    }

    pub async fn register(
        &self,
        request: CreateOperatorRequest,
    ) -> Result<ApiResponse<OperatorResponse>, AppError> {
        request.validate()?;

        validate_phone(&request.phone)
            .map_err(|_| AppError::Validation("Teléfono inválido".to_string()))?;
        validate_curp(&request.curp)
            .map_err(|_| AppError::Validation("CURP inválido".to_string()))?;
        validate_rfc(&request.rfc)
            .map_err(|_| AppError::Validation("RFC inválido".to_string()))?;

        if request.birth_date >= Utc::now().date_naive() {
            return Err(AppError::Validation(
                "La fecha de nacimiento debe estar en el pasado".to_string(),
            ));
        }

        let operator = self.repository.create(&request).await?;

        Ok(ApiResponse::success_with_message(
            operator.into(),
            "Operador registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<OperatorResponse>, AppError> {
        let operators = self.repository.list().await?;
        Ok(operators.into_iter().map(OperatorResponse::from).collect())
    }

    /// Detalle con documentos y vehículos. Sin documentos o sin vehículos
    /// son estados normales, no errores.
    pub async fn get_detail(&self, id: Uuid) -> Result<OperatorDetailResponse, AppError> {
        let operator = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Operador no encontrado".to_string()))?;

        let documents = self.repository.list_documents(id).await?;
        let vehicles = self.repository.list_vehicles(id).await?;

        Ok(OperatorDetailResponse {
            operator: operator.into(),
            documents: documents.into_iter().map(DocumentResponse::from).collect(),
            vehicles: vehicles.into_iter().map(VehicleResponse::from).collect(),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateOperatorRequest,
    ) -> Result<ApiResponse<OperatorResponse>, AppError> {
        request.validate()?;

        if let Some(phone) = &request.phone {
            validate_phone(phone)
                .map_err(|_| AppError::Validation("Teléfono inválido".to_string()))?;
        }

        let operator = self.repository.update(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            operator.into(),
            "Operador actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    // ---- Documentos ----

    /// Subir un documento: primero el archivo al bucket, después la fila.
    /// Si la fila falla el archivo queda huérfano en el storage; se
    /// registra y el usuario reintenta la operación completa.
    pub async fn upload_document(
        &self,
        operator_id: Uuid,
        request: UploadDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        validate_not_empty(&request.document_type)
            .map_err(|_| AppError::Validation("El tipo de documento es requerido".to_string()))?;
        validate_not_empty(&request.file_name)
            .map_err(|_| AppError::Validation("El nombre del archivo es requerido".to_string()))?;

        self.repository
            .find_by_id(operator_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Operador no encontrado".to_string()))?;

        let bytes = BASE64.decode(request.content_base64.trim()).map_err(|_| {
            AppError::Validation("El contenido del archivo no es base64 válido".to_string())
        })?;

        let key = document_object_path(operator_id, &request.document_type, &request.file_name);

        self.storage
            .upload(&key, bytes, content_type_for(&request.file_name))
            .await?;

        let document = match self
            .repository
            .insert_document(operator_id, &request.document_type, &request.file_name, &key)
            .await
        {
            Ok(document) => document,
            Err(e) => {
                warn!("Archivo '{}' quedó huérfano en el storage: {}", key, e);
                return Err(e);
            }
        };

        Ok(ApiResponse::success_with_message(
            document.into(),
            "Documento subido exitosamente".to_string(),
        ))
    }

    pub async fn list_documents(&self, operator_id: Uuid) -> Result<Vec<DocumentResponse>, AppError> {
        let documents = self.repository.list_documents(operator_id).await?;
        Ok(documents.into_iter().map(DocumentResponse::from).collect())
    }

    /// URL firmada con vigencia limitada para previsualizar un documento
    pub async fn document_signed_url(
        &self,
        operator_id: Uuid,
        document_id: Uuid,
        expires_in: Option<u64>,
    ) -> Result<SignedUrlResponse, AppError> {
        let expires_in = expires_in.unwrap_or(DEFAULT_SIGNED_URL_EXPIRY_SECS);
        validate_positive(expires_in as i64)
            .map_err(|_| AppError::Validation("La expiración debe ser positiva".to_string()))?;

        let document = self
            .repository
            .find_document(operator_id, document_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))?;

        let url = self
            .storage
            .create_signed_url(&document.file_path, expires_in)
            .await?;

        Ok(SignedUrlResponse { url, expires_in })
    }

    /// Borrar el documento: primero la fila, después el archivo. Un fallo
    /// al borrar el archivo deja basura en el bucket pero no revierte el
    /// borrado lógico.
    pub async fn delete_document(
        &self,
        operator_id: Uuid,
        document_id: Uuid,
    ) -> Result<(), AppError> {
        let document = self
            .repository
            .find_document(operator_id, document_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))?;

        self.repository.delete_document(document_id).await?;

        if let Err(e) = self.storage.delete(&document.file_path).await {
            warn!(
                "No se pudo borrar '{}' del storage: {}",
                document.file_path, e
            );
        }

        Ok(())
    }

    // ---- Vehículos ----

    pub async fn register_vehicle(
        &self,
        operator_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        validate_plate(&request.plate)
            .map_err(|_| AppError::Validation("Placa inválida".to_string()))?;

        let current_year = Utc::now().year();
        validate_range(request.year, 1950, current_year + 1)
            .map_err(|_| AppError::Validation("Año del vehículo inválido".to_string()))?;

        self.repository
            .find_by_id(operator_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Operador no encontrado".to_string()))?;

        let vehicle = self.repository.insert_vehicle(operator_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_vehicles(&self, operator_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list_vehicles(operator_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_object_path_shape() {
        let operator_id = Uuid::new_v4();
        let path = document_object_path(operator_id, "ine", "credencial.pdf");

        assert!(path.starts_with(&format!("{}/ine_", operator_id)));
        assert!(path.ends_with(".pdf"));
    }

    #[test]
    fn test_document_object_path_without_extension() {
        let operator_id = Uuid::new_v4();
        let path = document_object_path(operator_id, "licencia", "archivo");
        assert!(path.ends_with(".bin"));

        let path = document_object_path(operator_id, "licencia", "archivo.");
        assert!(path.ends_with(".bin"));
    }
}
