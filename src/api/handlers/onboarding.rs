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

pub async fn onboarding_status(
    RequireUser(account): RequireUser,
    State(app): State<AppState>,
) -> Result<Response, ApiError> {
    let status = services::onboarding_status(account.id(), app.directory.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load onboarding status");
            ApiError::internal()
        })?;

    Ok((StatusCode::OK, Json(status)).into_response())
}

pub async fn complete_onboarding(
    RequireUser(account): RequireUser,
    State(app): State<AppState>,
) -> Result<Response, ApiError> {
    let status = services::complete_onboarding(account.id(), app.directory.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to complete onboarding");
            ApiError::internal()
        })?;

    Ok((StatusCode::OK, Json(status)).into_response())
}
