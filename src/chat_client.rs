//! Client for the devbot HTTP API, used by the `devbot-chat` REPL.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::error::ClientError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5001";

/// A line typed at the REPL prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Exit,
    Empty,
    AnalyzeCode(String),
    CreateRepo(String),
    /// Repository, title and body are asked for interactively.
    CreateIssue,
    /// Anything else goes to the server's chat router.
    Chat(String),
}

pub fn parse_command(line: &str) -> ClientCommand {
    let line = line.trim();
    if line.is_empty() {
        return ClientCommand::Empty;
    }
    if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
        return ClientCommand::Exit;
    }
    if let Some(code) = line.strip_prefix("analyze code:") {
        return ClientCommand::AnalyzeCode(code.trim().to_string());
    }
    if let Some(name) = line.strip_prefix("create repo:") {
        return ClientCommand::CreateRepo(name.trim().to_string());
    }
    if line.starts_with("create issue:") {
        return ClientCommand::CreateIssue;
    }
    ClientCommand::Chat(line.to_string())
}

/// Thin wrapper over the server endpoints the REPL uses.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn analyze_code(&self, code: &str) -> Result<String, ClientError> {
        self.post("/analyze-code", json!({ "code": code }), &["analysis"])
            .await
    }

    pub async fn create_repo(&self, repo_name: &str, description: &str) -> Result<String, ClientError> {
        self.post(
            "/create-repo",
            json!({ "repo_name": repo_name, "description": description }),
            &["repo_url", "result"],
        )
        .await
    }

    pub async fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<String, ClientError> {
        self.post(
            "/create-issue",
            json!({ "repo": repo, "title": title, "body": body }),
            &["issue_url", "result"],
        )
        .await
    }

    pub async fn chat(&self, message: &str) -> Result<String, ClientError> {
        self.post("/chat", json!({ "message": message }), &["response"])
            .await
    }

    /// POST `body` and return the first of `keys` present in the reply.
    async fn post(&self, path: &str, body: Value, keys: &[&str]) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let reply: Option<Value> = response.json().await.ok();

        if status != StatusCode::OK {
            let detail = reply
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str);
            let message = match detail {
                Some(detail) => format!("Error: {} ({})", status.as_u16(), detail),
                None => format!("Error: {}", status.as_u16()),
            };
            return Err(ClientError::upstream(status.as_u16(), message));
        }

        let reply = reply.ok_or_else(|| ClientError::Decode("reply is not JSON".to_string()))?;
        keys.iter()
            .find_map(|key| reply.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::Decode(format!("reply has none of: {}", keys.join(", ")))
            })
    }
}
