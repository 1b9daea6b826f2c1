//! Bearer token authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shared::jwt::JwtError;
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// The authenticated caller.
///
/// Handlers that take this extractor never run for unauthenticated requests:
/// a missing, malformed, expired or forged token is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAuth {
    /// User ID from the token's subject claim.
    pub user_id: Uuid,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let user_id = state.jwt.verify_caller(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            match e {
                JwtError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
                _ => ApiError::Unauthorized("Invalid or expired token".to_string()),
            }
        })?;

        Ok(UserAuth { user_id })
    }
}
