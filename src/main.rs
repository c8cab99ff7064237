//! devbot - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the code and GitHub endpoints.

use devbot::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devbot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials are fatal before anything binds
    let config = Config::from_env()?;
    info!(
        model = %config.deepseek.model,
        committer = %config.github.committer.name,
        "Loaded configuration"
    );

    api::serve(config).await?;

    Ok(())
}
