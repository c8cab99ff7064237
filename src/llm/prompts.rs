//! Prompt templates sent to the completion endpoint.

pub fn fix_code(code: &str) -> String {
    format!("Fix the following code: {}", code)
}

pub fn analyze_code(code: &str) -> String {
    format!(
        "Analyze the following code and provide suggestions for improvement:\n\n{}",
        code
    )
}

/// Prompt for one file of a repository-wide analysis.
pub fn analyze_file(path: &str, content: &str) -> String {
    format!(
        "File: {}\n\nAnalyze the following code and provide suggestions for improvement:\n\n{}",
        path, content
    )
}

pub fn improve_code(code: &str) -> String {
    format!(
        "Improve the following code and return the improved version:\n\n{}",
        code
    )
}
