//! DeepSeek completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CompletionClient;
use crate::config::DeepSeekConfig;
use crate::error::ClientError;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: Option<String>,
}

/// Client for the DeepSeek `/beta/completions` endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: reqwest::Client,
    config: DeepSeekConfig,
}

impl DeepSeekClient {
    pub fn new(http: reqwest::Client, config: DeepSeekConfig) -> Self {
        Self { http, config }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/beta/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for DeepSeekClient {
    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let body = CompletionRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "DeepSeek returned an error status");
            return Err(ClientError::upstream(
                status.as_u16(),
                format!("Error: {}", status.as_u16()),
            ));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ClientError::Decode("response has no choices[0].text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DeepSeekClient {
        DeepSeekClient::new(
            reqwest::Client::new(),
            DeepSeekConfig {
                api_key: "sk-test".to_string(),
                base_url: server.uri(),
                model: "deepseek-chat".to_string(),
                max_tokens: 500,
            },
        )
    }

    #[tokio::test]
    async fn extracts_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/beta/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "prompt": "write hello world",
                "max_tokens": 500
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "text": "\n  print('hello world')  \n" }, { "text": "ignored" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete("write hello world")
            .await
            .expect("completion");
        assert_eq!(text, "print('hello world')");
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/beta/completions"))
            .respond_with(ResponseTemplate::new(402))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("anything").await.unwrap_err();
        assert_eq!(err, ClientError::upstream(402, "Error: 402"));
    }

    #[tokio::test]
    async fn empty_choices_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/beta/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let client = DeepSeekClient::new(
            reqwest::Client::new(),
            DeepSeekConfig {
                api_key: "sk-test".to_string(),
                base_url: "http://127.0.0.1:1".to_string(),
                model: "deepseek-chat".to_string(),
                max_tokens: 500,
            },
        );
        let err = client.complete("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
