use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    api::{gate::session_gate, handlers},
    app::AppState,
};

const DIST_DIR: &str = "web/dist";

pub fn build_router(state: AppState) -> Router {
    let serve = ServeDir::new(DIST_DIR).fallback(ServeFile::new(format!("{DIST_DIR}/index.html")));

    let auth_api = Router::new()
        .route("/me", get(handlers::me))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/register", post(handlers::register));

    let portal_api = Router::new()
        .route("/dashboard", get(handlers::dashboard_summary))
        .route("/courses", get(handlers::list_courses))
        .route("/calendar", get(handlers::list_events))
        .route("/onboarding", get(handlers::onboarding_status))
        .route("/onboarding/complete", post(handlers::complete_onboarding));

    let api = Router::new()
        .nest("/auth", auth_api)
        .nest("/portal", portal_api)
        .route("/health", get(|| async { "ok" }));

    // the gate wraps the static pages too, that is where the
    // protected paths live
    Router::new()
        .nest("/api", api)
        .fallback_service(serve)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
}
