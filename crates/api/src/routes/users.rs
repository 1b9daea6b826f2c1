//! User search.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::user::{UserSearchQuery, UserSearchResponse, UserSummary};
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Live search by name or email. Queries shorter than three characters
/// return nothing.
///
/// GET /api/v1/users/search?q=
pub async fn search_users(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<UserSearchResponse>, ApiError> {
    let Some(q) = query.effective_query() else {
        return Ok(Json(UserSearchResponse { users: Vec::new() }));
    };

    let users = UserRepository::new(state.pool.clone())
        .search(q, auth.user_id, state.config.limits.user_search_limit)
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(UserSearchResponse { users }))
}
