//! # devbot
//!
//! A small HTTP bridge between a code-generation language model and GitHub.
//!
//! This library provides:
//! - An HTTP API that forwards code generation, fixing and analysis requests
//!   to DeepSeek, and repository, branch, file, issue and workflow operations
//!   to the GitHub REST API
//! - A keyword-based chat router on top of those operations
//! - A client for the API, used by the `devbot-chat` REPL
//!
//! ## Example
//!
//! ```rust,ignore
//! use devbot::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod analysis;
pub mod api;
pub mod chat_client;
pub mod config;
pub mod error;
pub mod github;
pub mod llm;
pub mod router;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::ClientError;
