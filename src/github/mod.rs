//! GitHub access.
//!
//! Every GitHub call the endpoints make goes through [`SourceControl`], so
//! handlers and the repository analysis can be exercised without a network.

mod client;

pub use client::GitHubClient;

use async_trait::async_trait;

use crate::error::ClientError;

/// Operations the service performs against a source-control host.
///
/// `repo` arguments accept either `owner/name` or a bare `name`, which is
/// resolved against the authenticated account.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Create a repository owned by the authenticated user. Returns its web URL.
    async fn create_repository(&self, name: &str, description: &str) -> Result<String, ClientError>;

    /// Commit a new file on `branch`.
    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), ClientError>;

    /// Create `branch` pointing at the head commit of `base_branch`.
    async fn create_branch(&self, repo: &str, branch: &str, base_branch: &str) -> Result<(), ClientError>;

    /// Open an issue. Returns its web URL.
    async fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<String, ClientError>;

    /// Fire a `workflow_dispatch` event for `workflow_id` on `git_ref`.
    async fn dispatch_workflow(&self, repo: &str, workflow_id: &str, git_ref: &str) -> Result<(), ClientError>;

    /// Full `owner/name` form of `repo`, resolving a bare name against the
    /// authenticated account.
    async fn resolve_repo(&self, repo: &str) -> Result<String, ClientError>;

    /// Paths of the files at the top level of the default branch.
    async fn list_files(&self, repo: &str) -> Result<Vec<String>, ClientError>;

    /// Decoded UTF-8 content of one file.
    async fn file_content(&self, repo: &str, path: &str) -> Result<String, ClientError>;
}

/// Path of the workflow file committed for `workflow_name`.
pub fn workflow_path(workflow_name: &str) -> String {
    format!(".github/workflows/{}.yml", workflow_name)
}
