//! Middleware de autenticación JWT
//!
//! La autenticación vive en la plataforma hosteada; aquí solo se decodifica
//! el token de sesión para obtener la identidad del usuario y se inyecta de
//! forma explícita en cada request. Ningún flujo lee identidad de estado
//! global.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Inyectar usuario autenticado en las extensions
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Función para generar JWT token (usada por herramientas y tests)
pub fn generate_session_token(
    user_id: Uuid,
    jwt_secret: &str,
    expires_in_secs: i64,
) -> Result<String, AppError> {
    let expires_at = chrono::Utc::now() + chrono::Duration::seconds(expires_in_secs);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    let encoding_key = jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref());

    jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_decode_session_token() {
        let user_id = Uuid::new_v4();
        let secret = "test-secret";

        let token = generate_session_token(user_id, secret, 3600).unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id.to_string());
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let token = generate_session_token(Uuid::new_v4(), "secret-a", 3600).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("secret-b".as_ref()),
            &Validation::default(),
        );

        assert!(result.is_err());
    }
}
