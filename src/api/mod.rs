mod auth;
mod error;
mod gate;
pub mod handlers;
mod router;
mod session;

pub use auth::{MaybeUser, RequireUser};
pub use router::build_router;
pub use session::{SessionError, SessionId, Sessions};
