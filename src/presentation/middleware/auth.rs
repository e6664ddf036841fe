//! Authentication Middleware
//!
//! JWT validation for the admin routes. Tokens are HS256 and must carry
//! `admin: true`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    /// Subject (admin account id or email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Whether the bearer may use the admin panel
    #[serde(default)]
    pub admin: bool,
}

/// Authenticated admin extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub subject: String,
}

/// Decode a bearer token and require the admin claim.
pub fn authorize_admin(token: &str, secret: &str) -> Result<AdminUser, AppError> {
    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    if !token_data.claims.admin {
        return Err(AppError::Forbidden("Admin access required".into()));
    }

    Ok(AdminUser {
        subject: token_data.claims.sub,
    })
}

/// Authentication middleware for the admin routes
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    // Check for Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    let admin = authorize_admin(token, &state.settings.jwt.secret)?;
    tracing::debug!(subject = %admin.subject, "Admin request authorized");

    request.extensions_mut().insert(admin);

    Ok(next.run(request).await)
}
