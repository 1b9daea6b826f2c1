//! The caller's own profile.

use axum::{extract::State, Json};
use domain::models::status::{StatusView, UserStatus};
use domain::models::user::{UpdateProfileRequest, User, UserProfile, UserProfileResponse};
use persistence::repositories::{ProfileUpdate, UserRepository, UserStatusRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, UserAuth};

/// Current user with their summary status.
///
/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user: User = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    let user = with_status(&state, user).await?;
    Ok(Json(UserProfileResponse { user }))
}

/// Update profile fields. Absent fields keep their value.
///
/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    request.validate()?;

    let update = ProfileUpdate {
        bio: request.bio.as_deref().map(str::trim),
        avatar_url: request.avatar_url.as_deref().map(str::trim),
        home_location: request.home_location.as_deref().map(str::trim),
        custom_location: request.custom_location.as_deref().map(str::trim),
        use_custom_location: request.use_custom_location,
    };

    let user: User = UserRepository::new(state.pool.clone())
        .update_profile(auth.user_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    info!(user_id = %auth.user_id, "Profile updated");

    let user = with_status(&state, user).await?;
    Ok(Json(UserProfileResponse { user }))
}

async fn with_status(state: &AppState, user: User) -> Result<UserProfile, ApiError> {
    let status = load_status(state, user.id).await?;
    Ok(UserProfile::from_user(user, status))
}

async fn load_status(state: &AppState, user_id: Uuid) -> Result<Option<StatusView>, ApiError> {
    let status = UserStatusRepository::new(state.pool.clone())
        .find_by_user_id(user_id)
        .await?;
    Ok(status.map(|s| StatusView::from(UserStatus::from(s))))
}
