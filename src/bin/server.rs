use anyhow::Result;
use campus_portal::{app, config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::load()?;

    app::run(config).await
}
