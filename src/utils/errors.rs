//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Los mensajes que
//! llegan al cliente son legibles para humanos; el detalle crudo
//! del backend solo se registra en los logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Fallas que vale la pena reintentar. Solo las lecturas se reintentan,
    /// con un número fijo y pequeño de intentos; las escrituras nunca.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::Database(sqlx::Error::Io(_))
                | AppError::Database(sqlx::Error::PoolTimedOut)
                | AppError::Database(sqlx::Error::PoolClosed)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "Ocurrió un error al acceder a la base de datos".to_string(),
                        code: "DB_ERROR".to_string(),
                    },
                )
            }

            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: msg,
                    code: "VALIDATION_ERROR".to_string(),
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    code: "UNAUTHORIZED".to_string(),
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    code: "FORBIDDEN".to_string(),
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    code: "NOT_FOUND".to_string(),
                },
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    code: "CONFLICT".to_string(),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    code: "BAD_REQUEST".to_string(),
                },
            ),

            AppError::Storage(msg) => {
                error!("Storage error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Storage Error".to_string(),
                        message: "Ocurrió un error al comunicarse con el almacenamiento de archivos"
                            .to_string(),
                        code: "STORAGE_ERROR".to_string(),
                    },
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "Ocurrió un error inesperado".to_string(),
                        code: "INTERNAL_ERROR".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_detection() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        assert!(err.is_transient());

        let err = AppError::Validation("campo requerido".to_string());
        assert!(!err.is_transient());

        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_transient());
    }
}
