mod email;
mod password;
mod user;

pub use email::{Email, EmailParseError};
pub use password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Password, PasswordParseError};
pub use user::{Account, UserId};
