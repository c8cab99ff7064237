//! API request and response types.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::analysis::RepositoryAnalysis;

/// Fields of an inbound JSON body.
///
/// Identifier fields (names, branches, ids) must be non-blank strings.
/// Content fields (code, file bodies) only need to be non-empty, since
/// whitespace there is real content.
#[derive(Debug, Clone)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ApiError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// A present, non-blank string field.
    pub fn required(&self, key: &str) -> Result<String, ApiError> {
        match self.string(key)? {
            Some(v) if !v.trim().is_empty() => Ok(v),
            Some(_) => Err(not_a_string(key)),
            None => Err(missing(key)),
        }
    }

    /// A present, non-empty string field whose whitespace is kept.
    pub fn required_content(&self, key: &str) -> Result<String, ApiError> {
        match self.string(key)? {
            Some(v) if !v.is_empty() => Ok(v),
            Some(_) => Err(not_a_string(key)),
            None => Err(missing(key)),
        }
    }

    /// The first of `keys` that holds a non-blank string.
    pub fn required_any(&self, keys: &[&str]) -> Result<String, ApiError> {
        for key in keys {
            if let Some(v) = self.string(key)? {
                if !v.trim().is_empty() {
                    return Ok(v);
                }
            }
        }
        Err(missing(&keys.join(" or ")))
    }

    pub fn optional(&self, key: &str, default: &str) -> String {
        self.string(key)
            .ok()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// `None` when absent or null; an error when present with another JSON type.
    fn string(&self, key: &str) -> Result<Option<String>, ApiError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(v)) => Ok(Some(v.clone())),
            Some(_) => Err(not_a_string(key)),
        }
    }
}

fn missing(key: &str) -> ApiError {
    ApiError::Validation(format!("Missing required field: {}", key))
}

fn not_a_string(key: &str) -> ApiError {
    ApiError::Validation(format!("Field {} must be a non-empty string", key))
}

#[derive(Debug, Serialize)]
pub struct CodeResponse {
    /// Generated code
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct FixedCodeResponse {
    /// Corrected version of the submitted code
    pub fixed_code: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// Review and improvement suggestions
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct RepositoryAnalysisResponse {
    /// Per-file results for the whole repository
    pub analysis: RepositoryAnalysis,
}

#[derive(Debug, Serialize)]
pub struct RepoUrlResponse {
    /// Web URL of the new repository
    pub repo_url: String,
}

#[derive(Debug, Serialize)]
pub struct IssueUrlResponse {
    /// Web URL of the new issue
    pub issue_url: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true`; failures use the error body instead
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Reply text for the routed command
    pub response: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Completion model requests are sent to
    pub model: String,
}
