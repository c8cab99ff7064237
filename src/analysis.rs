//! Repository-wide code analysis.
//!
//! Lists the files of a repository and asks the model about each one in
//! turn. A file that cannot be fetched, decoded, or analyzed gets an inline
//! error and the loop moves on; only a failed listing aborts the run.

use serde::Serialize;

use crate::error::ClientError;
use crate::github::SourceControl;
use crate::llm::{prompts, CompletionClient};

/// Result for a single file. Exactly one of `analysis` / `error` is set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileAnalysis {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileAnalysis {
    fn analyzed(path: String, analysis: String) -> Self {
        Self {
            path,
            analysis: Some(analysis),
            error: None,
        }
    }

    fn failed(path: String, error: &ClientError) -> Self {
        Self {
            path,
            analysis: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepositoryAnalysis {
    pub repository: String,
    pub files: Vec<FileAnalysis>,
}

impl RepositoryAnalysis {
    /// Plain-text rendering used for chat replies.
    pub fn summary(&self) -> String {
        if self.files.is_empty() {
            return format!("No files found in {}.", self.repository);
        }
        let mut out = format!("Analysis of {}:", self.repository);
        for file in &self.files {
            out.push_str("\n\n## ");
            out.push_str(&file.path);
            out.push('\n');
            match (&file.analysis, &file.error) {
                (Some(analysis), _) => out.push_str(analysis),
                (None, Some(error)) => {
                    out.push_str("Error: ");
                    out.push_str(error);
                }
                (None, None) => {}
            }
        }
        out
    }
}

/// Analyze every top-level file of `repo`, one call at a time.
///
/// The repository name is resolved once up front; every later lookup uses
/// the full `owner/name`.
pub async fn analyze_repository(
    scm: &dyn SourceControl,
    llm: &dyn CompletionClient,
    repo: &str,
) -> Result<RepositoryAnalysis, ClientError> {
    let full = scm.resolve_repo(repo).await?;
    let repo = full.as_str();
    let paths = scm.list_files(repo).await?;
    tracing::info!(repo = %repo, files = paths.len(), "Analyzing repository");

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = match scm.file_content(repo, &path).await {
            Ok(content) => llm.complete(&prompts::analyze_file(&path, &content)).await,
            Err(e) => Err(e),
        };
        let entry = match outcome {
            Ok(analysis) => FileAnalysis::analyzed(path, analysis),
            Err(e) => {
                tracing::warn!(repo = %repo, path = %path, error = %e, "File analysis failed");
                FileAnalysis::failed(path, &e)
            }
        };
        files.push(entry);
    }

    Ok(RepositoryAnalysis {
        repository: repo.to_string(),
        files,
    })
}
