use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use cookie::Cookie;

use crate::{app::AppState, domain::Account};

pub(crate) const SESSION_COOKIE: &str = "sid";
pub(crate) const CLEAR_COOKIE: &str = "sid=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax";

pub struct RequireUser(pub Account);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let sid = parse_session_id(&parts.headers).ok_or_else(not_logged_in)?;

        let account = state
            .sessions
            .account(&sid)
            .map_err(|_| not_logged_in())?;

        Ok(RequireUser(account))
    }
}

fn not_logged_in() -> Response {
    let mut res = (StatusCode::UNAUTHORIZED, "Not logged in").into_response();
    res.headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
    res
}

/// Like `RequireUser` but never rejects. A stale cookie counts as no
/// session; whatever the handler answers will overwrite or outlive it.
pub struct MaybeUser(pub Option<Account>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(sid) = parse_session_id(&parts.headers) else {
            return Ok(MaybeUser(None));
        };

        Ok(MaybeUser(state.sessions.account(&sid).ok()))
    }
}

pub(crate) fn parse_session_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    for part in raw.split(';') {
        let c = Cookie::parse(part.trim()).ok()?;

        if c.name() == SESSION_COOKIE {
            return Some(c.value().to_string());
        }
    }

    None
}
