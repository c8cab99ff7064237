//! Configuration management for devbot.
//!
//! Configuration can be set via environment variables:
//! - `DEEPSEEK_API_KEY` - Required. DeepSeek API key (`DEEPISEEK_API_KEY` is accepted as a legacy alias).
//! - `GITHUB_TOKEN` - Required. Personal access token used for every GitHub call.
//! - `COMMITTER_NAME` - Required. Display name recorded on commits made by the bot.
//! - `COMMITTER_EMAIL` - Required. Email recorded on commits made by the bot.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. When unset, ports 5001-5005 are tried in order.
//! - `DEEPSEEK_BASE_URL` - Optional. Defaults to `https://api.deepseek.com`.
//! - `DEEPSEEK_MODEL` - Optional. Defaults to `deepseek-chat`.
//! - `DEEPSEEK_MAX_TOKENS` - Optional. Defaults to `500`.
//! - `GITHUB_API_URL` - Optional. Defaults to `https://api.github.com`.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Ports tried in order when `PORT` is not set.
pub const FALLBACK_PORTS: RangeInclusive<u16> = 5001..=5005;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Language-model endpoint settings.
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// Bearer token (`DEEPSEEK_API_KEY`)
    pub api_key: String,

    /// API root without trailing slash; completions go to `{base_url}/beta/completions`
    pub base_url: String,

    /// Model name sent with every completion
    pub model: String,

    /// Completion length cap (`DEEPSEEK_MAX_TOKENS`, default 500)
    pub max_tokens: u32,
}

/// Identity recorded on commits created through the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committer {
    /// `COMMITTER_NAME`
    pub name: String,
    /// `COMMITTER_EMAIL`
    pub email: String,
}

/// GitHub endpoint settings.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Personal access token, sent as `Authorization: token ...`
    pub token: String,

    /// REST root, `https://api.github.com` unless `GITHUB_API_URL` is set
    pub api_url: String,

    pub committer: Committer,
}

/// Process-wide configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion backend
    pub deepseek: DeepSeekConfig,

    /// Source-control backend
    pub github: GitHubConfig,

    /// Server host
    pub host: String,

    /// Fixed server port; `None` means try each of [`FALLBACK_PORTS`].
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the first required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let api_key = get("DEEPSEEK_API_KEY")
            .or_else(|| get("DEEPISEEK_API_KEY"))
            .ok_or_else(|| ConfigError::MissingEnvVar("DEEPSEEK_API_KEY".to_string()))?;
        let token = require("GITHUB_TOKEN")?;
        let committer = Committer {
            name: require("COMMITTER_NAME")?,
            email: require("COMMITTER_EMAIL")?,
        };

        let max_tokens = get("DEEPSEEK_MAX_TOKENS")
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|e| ConfigError::InvalidValue("DEEPSEEK_MAX_TOKENS".to_string(), format!("{}", e)))
            })
            .transpose()?
            .unwrap_or(500);

        let port = get("PORT")
            .map(|v| {
                v.parse::<u16>()
                    .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))
            })
            .transpose()?;

        Ok(Self {
            deepseek: DeepSeekConfig {
                api_key,
                base_url: get("DEEPSEEK_BASE_URL")
                    .unwrap_or_else(|| "https://api.deepseek.com".to_string()),
                model: get("DEEPSEEK_MODEL").unwrap_or_else(|| "deepseek-chat".to_string()),
                max_tokens,
            },
            github: GitHubConfig {
                token,
                api_url: get("GITHUB_API_URL")
                    .unwrap_or_else(|| "https://api.github.com".to_string()),
                committer,
            },
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Create a config pointing both clients at custom base URLs (useful for testing).
    pub fn new(deepseek_base_url: String, github_api_url: String) -> Self {
        Self {
            deepseek: DeepSeekConfig {
                api_key: "test-deepseek-key".to_string(),
                base_url: deepseek_base_url,
                model: "deepseek-chat".to_string(),
                max_tokens: 500,
            },
            github: GitHubConfig {
                token: "test-github-token".to_string(),
                api_url: github_api_url,
                committer: Committer {
                    name: "Devbot".to_string(),
                    email: "devbot@example.com".to_string(),
                },
            },
            host: "127.0.0.1".to_string(),
            port: None,
        }
    }

    /// Ports the server should attempt to bind, in order.
    pub fn candidate_ports(&self) -> Vec<u16> {
        match self.port {
            Some(port) => vec![port],
            None => FALLBACK_PORTS.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("GITHUB_TOKEN", "ghp_test"),
            ("COMMITTER_NAME", "Octo Cat"),
            ("COMMITTER_EMAIL", "octo@example.com"),
        ])
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).expect("config");
        assert_eq!(config.deepseek.api_key, "sk-test");
        assert_eq!(config.deepseek.model, "deepseek-chat");
        assert_eq!(config.deepseek.max_tokens, 500);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.committer.name, "Octo Cat");
        assert_eq!(config.port, None);
        assert_eq!(config.candidate_ports(), vec![5001, 5002, 5003, 5004, 5005]);
    }

    #[test]
    fn missing_committer_email_is_fatal() {
        let mut vars = full_env();
        vars.remove("COMMITTER_EMAIL");
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "COMMITTER_EMAIL"));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let mut vars = full_env();
        vars.insert("GITHUB_TOKEN".to_string(), "  ".to_string());
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GITHUB_TOKEN"));
    }

    #[test]
    fn legacy_api_key_name_is_accepted() {
        let mut vars = full_env();
        vars.remove("DEEPSEEK_API_KEY");
        vars.insert("DEEPISEEK_API_KEY".to_string(), "sk-legacy".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).expect("config");
        assert_eq!(config.deepseek.api_key, "sk-legacy");
    }

    #[test]
    fn explicit_port_disables_probing() {
        let mut vars = full_env();
        vars.insert("PORT".to_string(), "8080".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).expect("config");
        assert_eq!(config.candidate_ports(), vec![8080]);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut vars = full_env();
        vars.insert("PORT".to_string(), "eighty".to_string());
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k, _) if k == "PORT"));
    }
}
