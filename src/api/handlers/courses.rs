use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{auth::RequireUser, error::ApiError},
    app::AppState,
    services,
};

pub async fn list_courses(
    RequireUser(account): RequireUser,
    State(app): State<AppState>,
) -> Result<Response, ApiError> {
    let courses = services::courses_for_account(account.id(), app.directory.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to list courses");
            ApiError::internal()
        })?;

    Ok((StatusCode::OK, Json(courses)).into_response())
}
