//! GitHub REST API client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::SourceControl;
use crate::config::GitHubConfig;
use crate::error::ClientError;

const USER_AGENT: &str = concat!("devbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct HtmlUrl {
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Branch {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FileContent {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// Client for `api.github.com` (or a compatible host).
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(http: reqwest::Client, config: GitHubConfig) -> Self {
        Self { http, config }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        self.http
            .request(method, url)
            .header("Authorization", format!("token {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    /// Send a request and fail on any non-2xx status.
    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(upstream_error(status, response).await)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        self.send(req)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Resolve `repo` to `owner/name`.
    async fn full_name(&self, repo: &str) -> Result<String, ClientError> {
        let repo = repo.trim().trim_matches('/');
        if repo.contains('/') {
            return Ok(repo.to_string());
        }
        let user: AuthenticatedUser = self.send_json(self.request(Method::GET, "/user")).await?;
        Ok(format!("{}/{}", user.login, repo))
    }
}

async fn upstream_error(status: StatusCode, response: Response) -> ClientError {
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));

    tracing::warn!(status = %status, detail = ?detail, "GitHub returned an error status");

    let message = match detail {
        Some(detail) => format!("GitHub API error {}: {}", status.as_u16(), detail),
        None => format!("GitHub API error {}", status.as_u16()),
    };
    ClientError::upstream(status.as_u16(), message)
}

/// Percent-encode each segment of a repository path, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn decode_content(file: FileContent) -> Result<String, ClientError> {
    match file.encoding.as_deref() {
        Some("base64") => {}
        other => {
            return Err(ClientError::Decode(format!(
                "unsupported content encoding: {}",
                other.unwrap_or("none")
            )))
        }
    }
    let packed: String = file
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = BASE64
        .decode(packed)
        .map_err(|e| ClientError::Decode(format!("invalid base64 content: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Decode(format!("content is not UTF-8: {}", e)))
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn create_repository(&self, name: &str, description: &str) -> Result<String, ClientError> {
        let req = self
            .request(Method::POST, "/user/repos")
            .json(&json!({ "name": name, "description": description }));
        let repo: HtmlUrl = self.send_json(req).await?;
        tracing::info!(repo = %name, url = %repo.html_url, "Created repository");
        Ok(repo.html_url)
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), ClientError> {
        let full = self.full_name(repo).await?;
        let committer = &self.config.committer;
        let req = self
            .request(
                Method::PUT,
                &format!("/repos/{}/contents/{}", full, encode_path(path)),
            )
            .json(&json!({
                "message": message,
                "content": BASE64.encode(content.as_bytes()),
                "branch": branch,
                "committer": { "name": committer.name, "email": committer.email },
            }));
        self.send(req).await?;
        tracing::info!(repo = %full, path = %path, branch = %branch, "Committed file");
        Ok(())
    }

    async fn create_branch(&self, repo: &str, branch: &str, base_branch: &str) -> Result<(), ClientError> {
        let full = self.full_name(repo).await?;
        let base: Branch = self
            .send_json(self.request(
                Method::GET,
                &format!("/repos/{}/branches/{}", full, encode_path(base_branch)),
            ))
            .await?;
        let req = self
            .request(Method::POST, &format!("/repos/{}/git/refs", full))
            .json(&json!({
                "ref": format!("refs/heads/{}", branch),
                "sha": base.commit.sha,
            }));
        self.send(req).await?;
        tracing::info!(repo = %full, branch = %branch, base = %base_branch, "Created branch");
        Ok(())
    }

    async fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<String, ClientError> {
        let full = self.full_name(repo).await?;
        let req = self
            .request(Method::POST, &format!("/repos/{}/issues", full))
            .json(&json!({ "title": title, "body": body }));
        let issue: HtmlUrl = self.send_json(req).await?;
        tracing::info!(repo = %full, url = %issue.html_url, "Created issue");
        Ok(issue.html_url)
    }

    async fn dispatch_workflow(&self, repo: &str, workflow_id: &str, git_ref: &str) -> Result<(), ClientError> {
        let full = self.full_name(repo).await?;
        let req = self
            .request(
                Method::POST,
                &format!(
                    "/repos/{}/actions/workflows/{}/dispatches",
                    full,
                    urlencoding::encode(workflow_id)
                ),
            )
            .json(&json!({ "ref": git_ref }));
        let response = req.send().await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            tracing::warn!(repo = %full, workflow = %workflow_id, status = %status, "Workflow dispatch rejected");
            return Err(ClientError::upstream(
                status.as_u16(),
                format!("Failed to trigger workflow. Status code: {}", status.as_u16()),
            ));
        }
        tracing::info!(repo = %full, workflow = %workflow_id, git_ref = %git_ref, "Dispatched workflow");
        Ok(())
    }

    async fn resolve_repo(&self, repo: &str) -> Result<String, ClientError> {
        self.full_name(repo).await
    }

    async fn list_files(&self, repo: &str) -> Result<Vec<String>, ClientError> {
        let full = self.full_name(repo).await?;
        let entries: Vec<ContentEntry> = self
            .send_json(self.request(Method::GET, &format!("/repos/{}/contents", full)))
            .await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.kind == "file")
            .map(|e| e.path)
            .collect())
    }

    async fn file_content(&self, repo: &str, path: &str) -> Result<String, ClientError> {
        let full = self.full_name(repo).await?;
        let file: FileContent = self
            .send_json(self.request(
                Method::GET,
                &format!("/repos/{}/contents/{}", full, encode_path(path)),
            ))
            .await?;
        decode_content(file)
    }
}
