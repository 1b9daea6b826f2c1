//! Registration and login.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user::UserProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::services::auth::{AuthError, AuthService, AuthSession};

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(min = 2, max = 100, message = "Name must be 2-100 characters")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: UserProfile::from_user(session.user, None),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => {
                ApiError::Conflict("Email already registered".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::Database(db_err) => ApiError::from(db_err),
            AuthError::Password(e) => ApiError::Internal(format!("Password error: {}", e)),
            AuthError::Token(e) => ApiError::Internal(format!("Token error: {}", e)),
        }
    }
}

/// Register a new user with name, email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let session = AuthService::new(state.pool.clone(), &state.jwt)
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Login with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let session = AuthService::new(state.pool.clone(), &state.jwt)
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(session.into()))
}
