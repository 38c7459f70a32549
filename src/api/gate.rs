use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    access::AccessDecision,
    api::auth::{CLEAR_COOKIE, parse_session_id},
    app::AppState,
};

/// Session gate over every page route.
///
/// Classifies the request path against the route map and either lets the
/// request through or answers with a redirect. A missing or dead session
/// on a protected page is not an error, just a bounce to the login page.
pub async fn session_gate(
    State(app): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    let sid = parse_session_id(req.headers());
    let has_session = sid
        .as_deref()
        .is_some_and(|sid| app.sessions.account(sid).is_ok());

    match app.routes.decide(path, has_session) {
        AccessDecision::Allow => next.run(req).await,
        AccessDecision::RedirectToLogin => {
            tracing::debug!(path, "no session on a protected page");
            let mut res = Redirect::to(app.routes.login_path()).into_response();

            // a cookie that did not resolve is dead, drop it on the way out
            if sid.is_some() {
                res.headers_mut()
                    .append(header::SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
            }
            res
        }
        AccessDecision::RedirectToDashboard => {
            tracing::debug!(path, "existing session on an auth page");
            Redirect::to(app.routes.dashboard_path()).into_response()
        }
    }
}
