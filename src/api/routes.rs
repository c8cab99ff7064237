//! Router assembly and server startup.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{chat, handlers};
use crate::config::Config;
use crate::github::{GitHubClient, SourceControl};
use crate::llm::{CompletionClient, DeepSeekClient};

/// Shared state for all handlers.
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn CompletionClient>,
    pub github: Arc<dyn SourceControl>,
}

impl AppState {
    /// Build the production clients from `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        let llm = Arc::new(DeepSeekClient::new(http.clone(), config.deepseek.clone()));
        let github = Arc::new(GitHubClient::new(http, config.github.clone()));
        Ok(Self {
            config,
            llm,
            github,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/generate-code", post(handlers::generate_code))
        .route("/fix-code", post(handlers::fix_code))
        .route("/analyze-code", post(handlers::analyze_code))
        .route("/analyze-repository", post(handlers::analyze_repository))
        .route("/create-repo", post(handlers::create_repo))
        .route("/push-code", post(handlers::push_code))
        .route("/create-branch", post(handlers::create_branch))
        .route("/create-issue", post(handlers::create_issue))
        .route("/create-github-action", post(handlers::create_github_action))
        .route("/trigger-github-action", post(handlers::trigger_github_action))
        .route("/chat", post(chat::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the first available port from the configured candidates.
pub async fn bind(config: &Config) -> anyhow::Result<TcpListener> {
    bind_first(&config.host, &config.candidate_ports()).await
}

/// Try `ports` on `host` in order; an occupied port is logged and skipped.
pub async fn bind_first(host: &str, ports: &[u16]) -> anyhow::Result<TcpListener> {
    for port in ports {
        let addr = format!("{}:{}", host, port);
        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) => tracing::warn!(addr = %addr, error = %e, "Port unavailable, trying next"),
        }
    }
    anyhow::bail!("No available port among {:?} on {}", ports, host)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let listener = bind(&config).await?;
    let state = Arc::new(AppState::from_config(config)?);

    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
