//! In-memory stand-ins for the outbound clients, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::github::SourceControl;
use crate::llm::CompletionClient;

/// Completion client that echoes prompts back, optionally failing on a marker.
#[derive(Default)]
pub struct StubLlm {
    fail_on: Option<(String, ClientError)>,
    calls: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn failing_on(marker: &str, error: ClientError) -> Self {
        Self {
            fail_on: Some((marker.to_string(), error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubLlm {
    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        if let Some((marker, error)) = &self.fail_on {
            if prompt.contains(marker.as_str()) {
                return Err(error.clone());
            }
        }
        Ok(format!("completion for: {}", prompt))
    }
}

/// Source-control stub with a fixed file listing and a log of write calls.
#[derive(Default)]
pub struct StubScm {
    files: Vec<(String, Result<String, ClientError>)>,
    listing_error: Option<ClientError>,
    write_error: Option<ClientError>,
    issues: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl StubScm {
    pub fn with_file(mut self, path: &str, content: Result<&str, ClientError>) -> Self {
        self.files
            .push((path.to_string(), content.map(str::to_string)));
        self
    }

    pub fn with_listing_error(mut self, error: ClientError) -> Self {
        self.listing_error = Some(error);
        self
    }

    pub fn with_write_error(mut self, error: ClientError) -> Self {
        self.write_error = Some(error);
        self
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) -> Result<(), ClientError> {
        self.log.lock().unwrap().push(entry);
        match &self.write_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SourceControl for StubScm {
    async fn create_repository(&self, name: &str, description: &str) -> Result<String, ClientError> {
        self.record(format!("create_repository {} {:?}", name, description))?;
        Ok(format!("https://github.com/octocat/{}", name))
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), ClientError> {
        self.record(format!(
            "create_file {} {} {:?} {:?} {}",
            repo, path, message, content, branch
        ))
    }

    async fn create_branch(&self, repo: &str, branch: &str, base_branch: &str) -> Result<(), ClientError> {
        self.record(format!("create_branch {} {} {}", repo, branch, base_branch))
    }

    async fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<String, ClientError> {
        self.record(format!("create_issue {} {:?} {:?}", repo, title, body))?;
        let number = self.issues.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://github.com/octocat/{}/issues/{}", repo, number))
    }

    async fn dispatch_workflow(&self, repo: &str, workflow_id: &str, git_ref: &str) -> Result<(), ClientError> {
        self.record(format!("dispatch_workflow {} {} {}", repo, workflow_id, git_ref))
    }

    async fn resolve_repo(&self, repo: &str) -> Result<String, ClientError> {
        if repo.contains('/') {
            Ok(repo.to_string())
        } else {
            Ok(format!("octocat/{}", repo))
        }
    }

    async fn list_files(&self, _repo: &str) -> Result<Vec<String>, ClientError> {
        if let Some(error) = &self.listing_error {
            return Err(error.clone());
        }
        Ok(self.files.iter().map(|(path, _)| path.clone()).collect())
    }

    async fn file_content(&self, _repo: &str, path: &str) -> Result<String, ClientError> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
            .unwrap_or_else(|| Err(ClientError::upstream(404, "GitHub API error 404: Not Found")))
    }
}
