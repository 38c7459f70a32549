use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{EmailParseError, PasswordParseError},
    services::ServiceError,
};

pub struct ApiError {
    status_code: StatusCode,
    reason: &'static str,
}

#[derive(Deserialize, Serialize)]
struct ApiErrorBody(&'static str);

impl ApiError {
    pub fn public(status_code: StatusCode, reason: &'static str) -> Self {
        Self {
            status_code,
            reason,
        }
    }

    pub fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            reason: "Internal server error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::AuthError => {
                Self::public(StatusCode::UNAUTHORIZED, "Failed to authenticate")
            }
            ServiceError::Other(e) => {
                tracing::error!(error = %e, "service error");
                Self::internal()
            }
        }
    }
}

impl From<EmailParseError> for ApiError {
    fn from(error: EmailParseError) -> Self {
        let reason = match error {
            EmailParseError::MissingAt | EmailParseError::MultipleAt => {
                "Email must contain exactly one @"
            }
            EmailParseError::EmptyLocal => "Email is missing the part before @",
            EmailParseError::InvalidDomain => "Email domain is not valid",
            EmailParseError::ContainsWhitespace => "Email contains whitespace",
            EmailParseError::TooLong => "Email is too long",
        };
        Self::public(StatusCode::BAD_REQUEST, reason)
    }
}

impl From<PasswordParseError> for ApiError {
    fn from(error: PasswordParseError) -> Self {
        let reason = match error {
            PasswordParseError::TooShort => "Password is too short",
            PasswordParseError::TooLong => "Password is too long",
            PasswordParseError::NoLowercase => "Password needs a lowercase letter",
            PasswordParseError::NoUppercase => "Password needs an uppercase letter",
            PasswordParseError::NoDigit => "Password needs a digit",
        };
        Self::public(StatusCode::BAD_REQUEST, reason)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(ApiErrorBody(self.reason))).into_response()
    }
}
