use thiserror::Error;

mod accounts;
mod calendar;
mod courses;
mod onboarding;

pub use accounts::{authenticate, create_account};
pub use calendar::{events_in_window, format_when, week_window};
pub use courses::courses_for_account;
pub use onboarding::{OnboardingStatus, complete_onboarding, onboarding_status};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication failed")]
    AuthError,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
