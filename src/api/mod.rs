//! HTTP API for devbot.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness text
//! - `GET /health` - Service status, version and model
//! - `POST /generate-code`, `/fix-code`, `/analyze-code` - Language-model calls
//! - `POST /analyze-repository` - Per-file analysis of a GitHub repository
//! - `POST /create-repo`, `/push-code`, `/create-branch`, `/create-issue` - GitHub writes
//! - `POST /create-github-action`, `/trigger-github-action` - GitHub Actions
//! - `POST /chat` - Keyword-routed chat commands

mod chat;
pub mod error;
mod handlers;
mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{bind, bind_first, router, serve, AppState};
