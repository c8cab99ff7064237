//! Chat command routing.
//!
//! Free-text messages are matched against a short ordered list of keyword
//! patterns; the first match wins. Argument extraction is plain substring
//! splitting with no quoting or escaping. [`route`] is the only place that
//! interprets message text, so a real parser can replace it without touching
//! [`dispatch`] or the HTTP layer.

use crate::analysis::analyze_repository;
use crate::error::ClientError;
use crate::github::SourceControl;
use crate::llm::{prompts, CompletionClient};

pub const HELP_TEXT: &str = "I can help with the following commands:\n\
- analyze repository <owner/repo>\n\
- improve: <code>\n\
- generate: <description of the code you want>";

pub const MISSING_REPOSITORY_TEXT: &str =
    "Please specify the repository to analyze as owner/repo, e.g. 'analyze repository octocat/hello-world'.";

pub const MISSING_CODE_TEXT: &str =
    "Please provide the code to improve after a colon, e.g. 'improve: def f(): pass'.";

pub const MISSING_PROMPT_TEXT: &str =
    "Please describe the code to generate after a colon, e.g. 'generate: a function that reverses a string'.";

/// Action derived from a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedCommand {
    AnalyzeRepository(String),
    ImproveCode(String),
    GenerateCode(String),
    MissingRepository,
    MissingCode,
    MissingPrompt,
    Unrecognized,
}

/// Classify `message`.
///
/// Keywords are matched case-insensitively; extracted arguments keep the
/// original casing.
pub fn route(message: &str) -> RoutedCommand {
    let lower = message.to_ascii_lowercase();

    if lower.contains("analyze") && lower.contains("repository") {
        return message
            .split_whitespace()
            .find(|token| token.contains('/'))
            .map(|repo| RoutedCommand::AnalyzeRepository(repo.to_string()))
            .unwrap_or(RoutedCommand::MissingRepository);
    }

    if let Some(idx) = lower.find("improve") {
        return match text_after_colon(message, idx) {
            Some(code) => RoutedCommand::ImproveCode(code),
            None => RoutedCommand::MissingCode,
        };
    }

    if let Some(idx) = lower.find("generate") {
        return match text_after_colon(message, idx) {
            Some(prompt) => RoutedCommand::GenerateCode(prompt),
            None => RoutedCommand::MissingPrompt,
        };
    }

    RoutedCommand::Unrecognized
}

/// Everything after the first `:` at or past `from`, trimmed; `None` if empty.
fn text_after_colon(message: &str, from: usize) -> Option<String> {
    let rest = &message[from..];
    let colon = rest.find(':')?;
    let text = rest[colon + 1..].trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Execute `command` and produce the reply text.
pub async fn dispatch(
    command: RoutedCommand,
    llm: &dyn CompletionClient,
    scm: &dyn SourceControl,
) -> Result<String, ClientError> {
    match command {
        RoutedCommand::AnalyzeRepository(repo) => {
            let analysis = analyze_repository(scm, llm, &repo).await?;
            Ok(analysis.summary())
        }
        RoutedCommand::ImproveCode(code) => llm.complete(&prompts::improve_code(&code)).await,
        RoutedCommand::GenerateCode(prompt) => llm.complete(&prompt).await,
        RoutedCommand::MissingRepository => Ok(MISSING_REPOSITORY_TEXT.to_string()),
        RoutedCommand::MissingCode => Ok(MISSING_CODE_TEXT.to_string()),
        RoutedCommand::MissingPrompt => Ok(MISSING_PROMPT_TEXT.to_string()),
        RoutedCommand::Unrecognized => Ok(HELP_TEXT.to_string()),
    }
}
