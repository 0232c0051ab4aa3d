//! Cliente del object storage
//!
//! Habla con el API HTTP del storage hosteado: subida y borrado por key
//! dentro de un bucket, URLs públicas y URLs firmadas con expiración para
//! contenido privado (documentos de operadores).

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::json;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Expiración por defecto de las URLs firmadas (1 hora)
pub const DEFAULT_SIGNED_URL_EXPIRY_SECS: u64 = 3600;

#[derive(Clone)]
pub struct StorageService {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl StorageService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.storage_url.trim_end_matches('/').to_string(),
            service_key: config.storage_service_key.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, self.bucket, key)
    }

    /// Subir un archivo por key. Sobrescribir una key existente es un
    /// error del lado del storage y se reporta tal cual.
    pub async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.service_key)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error subiendo archivo: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Error subiendo archivo '{}' ({})",
                key,
                response.status()
            )));
        }

        Ok(())
    }

    /// Borrar un archivo por key
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error borrando archivo: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Error borrando archivo '{}' ({})",
                key,
                response.status()
            )));
        }

        Ok(())
    }

    /// URL pública de un archivo (solo válida en buckets públicos)
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, key)
    }

    /// Pedir una URL firmada con vigencia limitada
    pub async fn create_signed_url(
        &self,
        key: &str,
        expires_in_secs: u64,
    ) -> Result<String, AppError> {
        let url = format!("{}/object/sign/{}/{}", self.base_url, self.bucket, key);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .json(&json!({ "expiresIn": expires_in_secs }))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error firmando URL: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Error firmando URL para '{}' ({})",
                key,
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Storage(format!("Respuesta inválida del storage: {}", e)))?;

        let signed_path = body
            .get("signedURL")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::Storage("Respuesta del storage sin signedURL".to_string())
            })?;

        Ok(format!("{}{}", self.base_url, signed_path))
    }
}

/// Content type según la extensión del archivo
pub fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StorageService {
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "localhost".to_string(),
            jwt_secret: "secret".to_string(),
            cors_origins: vec![],
            storage_url: "https://storage.example.com/storage/v1/".to_string(),
            storage_service_key: "key".to_string(),
            storage_bucket: "operator-documents".to_string(),
        };
        StorageService::new(&config)
    }

    #[test]
    fn test_object_url_strips_trailing_slash() {
        let svc = service();
        assert_eq!(
            svc.object_url("op1/ine_123.pdf"),
            "https://storage.example.com/storage/v1/object/operator-documents/op1/ine_123.pdf"
        );
    }

    #[test]
    fn test_public_url_format() {
        let svc = service();
        assert_eq!(
            svc.public_url("op1/foto.png"),
            "https://storage.example.com/storage/v1/object/public/operator-documents/op1/foto.png"
        );
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("ine.PDF"), "application/pdf");
        assert_eq!(content_type_for("foto.jpg"), "image/jpeg");
        assert_eq!(content_type_for("foto.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("captura.png"), "image/png");
        assert_eq!(content_type_for("raro.bin"), "application/octet-stream");
    }
}
