//! Language-model access.
//!
//! Endpoints only need one capability from the model: turn a prompt into a
//! completion. [`CompletionClient`] is that seam; [`DeepSeekClient`] is the
//! production implementation.

mod deepseek;
pub mod prompts;

pub use deepseek::DeepSeekClient;

use async_trait::async_trait;

use crate::error::ClientError;

/// Trait for text-completion providers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt` and return the trimmed text of the first choice.
    async fn complete(&self, prompt: &str) -> Result<String, ClientError>;
}
