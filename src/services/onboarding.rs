use serde::Serialize;
use time::OffsetDateTime;

use crate::{db::Directory, domain::UserId, services::ServiceError};

#[derive(Debug, Serialize)]
pub struct OnboardingStatus {
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

#[tracing::instrument(name = "services::onboarding_status", skip(directory))]
pub async fn onboarding_status(
    user_id: UserId,
    directory: &dyn Directory,
) -> Result<OnboardingStatus, ServiceError> {
    let completed_at = directory.onboarding_completed_at(user_id).await?;

    Ok(OnboardingStatus {
        completed: completed_at.is_some(),
        completed_at,
    })
}

/// Idempotent: completing twice keeps the first timestamp.
#[tracing::instrument(name = "services::complete_onboarding", skip(directory))]
pub async fn complete_onboarding(
    user_id: UserId,
    directory: &dyn Directory,
) -> Result<OnboardingStatus, ServiceError> {
    directory.complete_onboarding(user_id).await?;

    onboarding_status(user_id, directory).await
}
