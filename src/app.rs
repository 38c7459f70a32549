use std::sync::Arc;

use anyhow::Result;
use argon2::Argon2;
use tokio::net::TcpListener;

use crate::{
    access::RouteMap,
    api::{self, Sessions},
    config::Settings,
    db::{Directory, PgDirectory, connect_to_db},
};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub sessions: Sessions,
    pub hasher: Argon2<'static>,
    pub routes: Arc<RouteMap>,
}

pub fn build_app_state(
    directory: Arc<dyn Directory>,
    routes: RouteMap,
    session_ttl_hours: u64,
) -> AppState {
    AppState {
        directory,
        sessions: Sessions::new(session_ttl_hours),
        hasher: Argon2::default(),
        routes: Arc::new(routes),
    }
}

pub async fn run(config: Settings) -> Result<()> {
    let pool = connect_to_db(config.database_url.as_str()).await?;
    let directory = Arc::new(PgDirectory::new(pool));

    let state = build_app_state(
        directory,
        RouteMap::portal_defaults(),
        config.session_ttl_hours,
    );
    let router = api::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("App running on {addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
