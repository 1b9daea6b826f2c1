//! Authentication service: registration and email/password login.

use domain::models::user::User;
use persistence::repositories::UserRepository;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError, MIN_PASSWORD_LENGTH};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::middleware::metrics::record_user_registered;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password does not meet requirements")]
    WeakPassword(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A signed-in user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

pub struct AuthService<'a> {
    users: UserRepository,
    jwt: &'a JwtConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: PgPool, jwt: &'a JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    /// Registers a user and signs them in.
    ///
    /// Emails are stored lowercased. A fresh account gets an OFF summary status.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let entity = self
            .users
            .create_user(name.trim(), &email, &password_hash)
            .await
            .map_err(|e| match &e {
                // Lost a race with a concurrent registration.
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    AuthError::EmailAlreadyExists
                }
                _ => AuthError::Database(e),
            })?;

        let user: User = entity.into();
        let (token, _jti) = self.jwt.issue_token(user.id)?;

        record_user_registered();
        info!(user_id = %user.id, "User registered");

        Ok(AuthSession { token, user })
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        let entity = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let user: User = entity.into();
        let (token, _jti) = self.jwt.issue_token(user.id)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { token, user })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
