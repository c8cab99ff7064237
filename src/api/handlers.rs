//! Endpoint adapters.
//!
//! Each handler reads its fields from the request envelope, makes one
//! outbound call (or one repository analysis run), and wraps the payload
//! under the endpoint's reply key.

use std::sync::Arc;

use axum::{extract::State, Json};
use bytes::Bytes;

use super::error::ApiError;
use super::routes::AppState;
use super::types::*;
use crate::analysis;
use crate::github::workflow_path;
use crate::llm::prompts;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// GET / - liveness text.
pub async fn index() -> &'static str {
    "Hello, World! The bot is running."
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.deepseek.model.clone(),
    })
}

/// POST /generate-code
pub async fn generate_code(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<CodeResponse> {
    let prompt = Envelope::parse(&body)?.required("prompt")?;
    let code = state.llm.complete(&prompt).await?;
    Ok(Json(CodeResponse { code }))
}

/// POST /fix-code
pub async fn fix_code(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<FixedCodeResponse> {
    let code = Envelope::parse(&body)?.required_content("code")?;
    let fixed_code = state.llm.complete(&prompts::fix_code(&code)).await?;
    Ok(Json(FixedCodeResponse { fixed_code }))
}

/// POST /analyze-code
pub async fn analyze_code(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<AnalysisResponse> {
    let code = Envelope::parse(&body)?.required_content("code")?;
    let analysis = state.llm.complete(&prompts::analyze_code(&code)).await?;
    Ok(Json(AnalysisResponse { analysis }))
}

/// POST /analyze-repository
pub async fn analyze_repository(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<RepositoryAnalysisResponse> {
    let repo = Envelope::parse(&body)?.required_any(&["repo", "repo_name"])?;
    let analysis =
        analysis::analyze_repository(state.github.as_ref(), state.llm.as_ref(), &repo).await?;
    Ok(Json(RepositoryAnalysisResponse { analysis }))
}

/// POST /create-repo
pub async fn create_repo(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<RepoUrlResponse> {
    let env = Envelope::parse(&body)?;
    let repo_name = env.required("repo_name")?;
    let description = env.optional("description", "");
    let repo_url = state
        .github
        .create_repository(&repo_name, &description)
        .await?;
    Ok(Json(RepoUrlResponse { repo_url }))
}

/// POST /push-code
pub async fn push_code(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<SuccessResponse> {
    let env = Envelope::parse(&body)?;
    let repo_name = env.required("repo_name")?;
    let branch_name = env.required("branch_name")?;
    let file_name = env.required("file_name")?;
    let file_content = env.required_content("file_content")?;

    state
        .github
        .create_file(
            &repo_name,
            &file_name,
            &format!("Add {}", file_name),
            &file_content,
            &branch_name,
        )
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /create-branch
pub async fn create_branch(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<SuccessResponse> {
    let env = Envelope::parse(&body)?;
    let repo_name = env.required("repo_name")?;
    let branch_name = env.required("branch_name")?;
    let base_branch = env.required("base_branch")?;

    state
        .github
        .create_branch(&repo_name, &branch_name, &base_branch)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /create-issue
///
/// Accepts `repo` as an alias for `repo_name`. Issues are never deduplicated.
pub async fn create_issue(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<IssueUrlResponse> {
    let env = Envelope::parse(&body)?;
    let repo = env.required_any(&["repo_name", "repo"])?;
    let title = env.required("title")?;
    let issue_body = env.required_content("body")?;

    let issue_url = state.github.create_issue(&repo, &title, &issue_body).await?;
    Ok(Json(IssueUrlResponse { issue_url }))
}

/// POST /create-github-action
pub async fn create_github_action(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SuccessResponse> {
    let env = Envelope::parse(&body)?;
    let repo_name = env.required("repo_name")?;
    let workflow_name = env.required("workflow_name")?;
    let workflow_content = env.required_content("workflow_content")?;

    state
        .github
        .create_file(
            &repo_name,
            &workflow_path(&workflow_name),
            &format!("Add {} workflow", workflow_name),
            &workflow_content,
            "main",
        )
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /trigger-github-action
pub async fn trigger_github_action(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SuccessResponse> {
    let env = Envelope::parse(&body)?;
    let repo_name = env.required("repo_name")?;
    let workflow_id = env.required("workflow_id")?;
    let git_ref = env.optional("ref", "main");

    state
        .github
        .dispatch_workflow(&repo_name, &workflow_id, &git_ref)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
