use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::{
    api::{
        auth::{CLEAR_COOKIE, MaybeUser, RequireUser, SESSION_COOKIE, parse_session_id},
        error::ApiError,
        session::SessionId,
    },
    app::AppState,
    domain::{Email, Password},
    services,
};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    display_name: String,
}

#[derive(Serialize, Deserialize)]
pub struct AuthResponse {
    pub email: String,
    pub display_name: String,
}

impl IntoResponse for AuthResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

fn with_session_cookie(mut response: Response, session_id: &SessionId) -> Response {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.as_str()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(false); // no https for now

    response.headers_mut().append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie.to_string()).unwrap(),
    );
    response
}

pub async fn login(
    State(app): State<AppState>,
    Json(LoginRequest { email, password }): Json<LoginRequest>,
) -> Result<Response<Body>, ApiError> {
    let email = Email::parse(&email)?;

    let account = services::authenticate(email, &password, &app.hasher, app.directory.as_ref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to authenticate");
            ApiError::from(e)
        })?;

    let response = AuthResponse {
        email: account.email().to_string(),
        display_name: account.display_name().to_string(),
    };
    let session_id = app.sessions.new_session(account);

    Ok(with_session_cookie(response.into_response(), &session_id))
}

pub async fn register(
    MaybeUser(user): MaybeUser,
    State(app): State<AppState>,
    Json(RegisterRequest {
        email,
        password,
        display_name,
    }): Json<RegisterRequest>,
) -> Result<Response<Body>, ApiError> {
    if user.is_some() {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Already signed in",
        ));
    }

    let email = Email::parse(&email)?;
    let password = Password::parse(&password)?;
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Display name is empty",
        ));
    }

    let Some(account) = services::create_account(
        email,
        password,
        display_name,
        &app.hasher,
        app.directory.as_ref(),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to create account");
        ApiError::internal()
    })?
    else {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Email is already registered",
        ));
    };

    let response = AuthResponse {
        email: account.email().to_string(),
        display_name: account.display_name().to_string(),
    };
    let session_id = app.sessions.new_session(account);

    Ok(with_session_cookie(response.into_response(), &session_id))
}

pub async fn logout(State(app): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(sid) = parse_session_id(&headers) {
        app.sessions.remove(&sid);
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
    response
}

pub async fn me(RequireUser(account): RequireUser) -> Result<Response<Body>, ApiError> {
    Ok(AuthResponse {
        email: account.email().to_string(),
        display_name: account.display_name().to_string(),
    }
    .into_response())
}
