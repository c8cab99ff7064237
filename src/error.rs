//! Failure type shared by the outbound API clients.

use thiserror::Error;

/// Outcome of a failed call to DeepSeek or GitHub.
///
/// The variant records where the call broke down so callers can tell a
/// rejected request apart from an unreachable service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("Exception: {0}")]
    Transport(String),

    /// The response (or a payload inside it) could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Nothing in devbot retries; this only surfaces the distinction.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::Transport(_) => true,
            Self::Decode(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
