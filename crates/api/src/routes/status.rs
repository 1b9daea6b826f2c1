//! The caller's availability calendar and summary status.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::availability::{
    AvailabilityDay, AvailabilityResponse, OkResponse, UpdateAvailabilityRequest,
};
use domain::models::status::{SetSummaryRequest, SetSummaryResponse, StatusView, UserStatus};
use domain::services::timeline::materialize_one;
use domain::services::{check_revision, resolve_summary, CalendarWindow};
use persistence::repositories::{AvailabilityRepository, UserStatusRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, UserAuth};
use crate::middleware::metrics::record_availability_days_written;

/// The caller's own 28-day calendar starting today (UTC).
///
/// GET /api/v1/status/availability
pub async fn get_availability(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let window = CalendarWindow::starting_today(Utc::now());

    let rows: Vec<AvailabilityDay> = AvailabilityRepository::new(state.pool.clone())
        .find_in_range(&[auth.user_id], window.start, window.end())
        .await?
        .into_iter()
        .map(AvailabilityDay::from)
        .collect();

    Ok(Json(AvailabilityResponse {
        start: window.start_instant(),
        days: materialize_one(auth.user_id, &rows, window),
    }))
}

/// Upsert a batch of days. Either every day is written or none is.
///
/// PUT /api/v1/status/availability
pub async fn update_availability(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<UpdateAvailabilityRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    request.validate()?;

    let rows = request.into_rows(auth.user_id);
    AvailabilityRepository::new(state.pool.clone())
        .upsert_days(&rows)
        .await?;

    record_availability_days_written(rows.len());
    info!(user_id = %auth.user_id, days = rows.len(), "Availability updated");

    Ok(Json(OkResponse { ok: true }))
}

/// Replace the caller's summary status.
///
/// PUT /api/v1/status/summary
pub async fn set_summary(
    State(state): State<AppState>,
    auth: UserAuth,
    AppJson(request): AppJson<SetSummaryRequest>,
) -> Result<Json<SetSummaryResponse>, ApiError> {
    let resolved = resolve_summary(request.mode, request.text.as_deref())?;
    let statuses = UserStatusRepository::new(state.pool.clone());

    if request.expected_revision.is_some() {
        let stored = statuses.find_by_user_id(auth.user_id).await?;
        check_revision(stored.map(|s| s.revision), request.expected_revision)?;
    }

    let status: UserStatus = statuses
        .replace(
            auth.user_id,
            resolved.mode,
            resolved.text.as_deref(),
            request.expected_revision,
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Status was modified concurrently".to_string()))?
        .into();

    info!(
        user_id = %auth.user_id,
        mode = %status.mode,
        revision = status.revision,
        "Summary status updated"
    );

    Ok(Json(SetSummaryResponse {
        status: StatusView::from(status),
    }))
}
