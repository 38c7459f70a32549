use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    api::{auth::RequireUser, error::ApiError, handlers::calendar::EventView},
    app::AppState,
    services,
};

#[derive(Serialize)]
pub struct DashboardSummary {
    pub display_name: String,
    pub course_count: usize,
    pub next_event: Option<EventView>,
    pub onboarding_completed: bool,
}

pub async fn dashboard_summary(
    RequireUser(account): RequireUser,
    State(app): State<AppState>,
) -> Result<Response, ApiError> {
    let directory = app.directory.as_ref();

    let courses = services::courses_for_account(account.id(), directory)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load courses for the dashboard");
            ApiError::internal()
        })?;

    let next_event = directory
        .next_event_after(account.id(), OffsetDateTime::now_utc())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load the next event");
            ApiError::internal()
        })?
        .map(super::calendar::event_view)
        .transpose()?;

    let onboarding = services::onboarding_status(account.id(), directory)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load onboarding status");
            ApiError::internal()
        })?;

    let summary = DashboardSummary {
        display_name: account.display_name().to_string(),
        course_count: courses.len(),
        next_event,
        onboarding_completed: onboarding.completed,
    };

    Ok((StatusCode::OK, Json(summary)).into_response())
}
