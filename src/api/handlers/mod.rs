mod auth;
mod calendar;
mod courses;
mod dashboard;
mod onboarding;

pub(crate) use auth::{login, logout, me, register};
pub(crate) use calendar::list_events;
pub(crate) use courses::list_courses;
pub(crate) use dashboard::dashboard_summary;
pub(crate) use onboarding::{complete_onboarding, onboarding_status};

pub use auth::AuthResponse;
pub use calendar::EventView;
pub use dashboard::DashboardSummary;
