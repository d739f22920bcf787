//! User JWT authentication middleware.
//!
//! Provides middleware for requiring JWT-based user authentication on routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use shared::jwt::JwtVerifier;

/// Authenticated user information extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl AuthUser {
    /// Validates an access token and returns user authentication info.
    pub fn validate(verifier: &JwtVerifier, token: &str) -> Result<Self, String> {
        let claims = verifier
            .validate(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        // Parse user ID from claims
        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        Ok(AuthUser {
            user_id,
            jti: claims.jti,
        })
    }

    /// Creates a JwtVerifier from JwtAuthConfig.
    pub fn create_verifier(config: &JwtAuthConfig) -> Result<JwtVerifier, String> {
        JwtVerifier::with_leeway(&config.public_key, config.leeway_secs)
            .map_err(|e| format!("Failed to initialize JWT verifier: {}", e))
    }
}

/// Middleware that requires JWT user authentication.
///
/// This middleware validates the Bearer token in the Authorization header
/// and rejects requests without a valid JWT. Authenticated user information
/// is stored in request extensions for use by downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
                .into_response();
        }
    };

    // Create JWT verifier
    let verifier = match AuthUser::create_verifier(&state.config.jwt) {
        Ok(verifier) => verifier,
        Err(e) => {
            return ApiError::Internal(format!("JWT verifier unavailable: {}", e)).into_response();
        }
    };

    // Validate the token
    match AuthUser::validate(&verifier, token) {
        Ok(auth) => {
            // Store authentication info in request extensions
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}
