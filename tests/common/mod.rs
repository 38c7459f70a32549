#![allow(dead_code)]

pub mod mock_directory;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

use campus_portal::{access::RouteMap, api, app};

use mock_directory::MockDirectory;

pub fn router_with(directory: Arc<MockDirectory>) -> Router {
    let state = app::build_app_state(directory, RouteMap::portal_defaults(), 1);
    api::build_router(state)
}

pub fn router() -> (Router, Arc<MockDirectory>) {
    let directory = Arc::new(MockDirectory::default());
    (router_with(directory.clone()), directory)
}

// Deserialize a Response into T
pub async fn json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers an account and returns the `sid=...` cookie pair.
pub async fn register(router: &Router, email: &str, display_name: &str) -> String {
    let request_body = Body::from(
        serde_json::to_vec(&json!({
            "email": email,
            "password": "Passw0rd-for-tests",
            "display_name": display_name,
        }))
        .unwrap(),
    );
    let request = Request::post("/api/auth/register")
        .header("content-type", "application/json")
        .body(request_body)
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.status(),
        StatusCode::OK,
        "Request to register {email} failed"
    );

    session_cookie(&response).expect("register response did not set a session cookie")
}

/// Pulls the `sid` pair out of a Set-Cookie header, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();

    pair.starts_with("sid=").then(|| pair.to_string())
}
