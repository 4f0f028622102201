use crate::config::ProviderConfig;
use crate::error::{RecommendError, Result};
use crate::providers::{CompletionOptions, CompletionProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    ///
    /// A missing credential is not an error here; it is reported by
    /// [`CompletionProvider::complete`] before any request is sent.
    pub fn new(config: &ProviderConfig) -> Self {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout_duration(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        OpenAIProvider::new(&ProviderConfig {
            api_key,
            base_url,
            ..Default::default()
        })
    }

    /// Override the default per-call deadline with sub-second precision
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(
        &self,
        api_key: &str,
        system_role: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_role},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": options.temperature.unwrap_or(self.temperature),
                "max_tokens": options.max_tokens.unwrap_or(self.max_tokens)
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("OpenAI error body: {}", body);
            return Err(RecommendError::Transport {
                status: Some(status.as_u16()),
                reason: format!("OpenAI API error: {}", status),
            });
        }

        let response_body: Value = response.json().await.map_err(|e| {
            RecommendError::MalformedResponse(format!("completion body is not JSON: {}", e))
        })?;
        debug!("{:?}", response_body);

        response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                RecommendError::MalformedResponse(
                    "Failed to extract content from response".to_string(),
                )
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        system_role: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            RecommendError::Configuration("OpenAI API key not configured".to_string())
        })?;

        if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            return Err(RecommendError::Cancelled);
        }

        let deadline = options.deadline.unwrap_or(self.timeout);
        let request = tokio::time::timeout(
            deadline,
            self.send(api_key, system_role, user_prompt, options),
        );

        let outcome = match &options.cancel {
            Some(cancel) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(RecommendError::Cancelled),
                    outcome = request => outcome,
                }
            }
            None => request.await,
        };

        outcome.unwrap_or_else(|_| {
            Err(RecommendError::Transport {
                status: None,
                reason: format!("OpenAI request timed out after {:?}", deadline),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancel_pair;
    use mockito::{Matcher, Server};

    fn completion_body(content: &str) -> String {
        json!({"choices": [{"message": {"content": content}}]}).to_string()
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "be a chef"},
                    {"role": "user", "content": "eggs?"}
                ],
                "max_tokens": 1500
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(r#"[{"title": "Omelette"}]"#))
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(Some("fake_api_key".to_string()), server.url());
        let result = provider
            .complete("be a chef", "eggs?", &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(result, r#"[{"title": "Omelette"}]"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(Some("fake_api_key".to_string()), server.url());
        let result = provider
            .complete("system", "user", &CompletionOptions::default())
            .await;

        match result {
            Err(RecommendError::Transport { status, reason }) => {
                assert_eq!(status, Some(400));
                assert!(reason.contains("400 Bad Request"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(Some("   ".to_string()), server.url());
        let result = provider
            .complete("system", "user", &CompletionOptions::default())
            .await;

        assert!(matches!(result, Err(RecommendError::Configuration(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_body_without_content_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(Some("key".to_string()), server.url());
        let result = provider
            .complete("system", "user", &CompletionOptions::default())
            .await;

        assert!(matches!(result, Err(RecommendError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_already_cancelled_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let (handle, signal) = cancel_pair();
        handle.cancel();

        let provider = OpenAIProvider::with_base_url(Some("key".to_string()), server.url());
        let result = provider
            .complete(
                "system",
                "user",
                &CompletionOptions::default().with_cancel(signal),
            )
            .await;

        assert!(matches!(result, Err(RecommendError::Cancelled)));
        mock.assert_async().await;
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider =
            OpenAIProvider::with_base_url(Some("sk-secret".to_string()), "http://x".to_string());
        let rendered = format!("{:?}", provider);
        assert!(!rendered.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = OpenAIProvider::new(&ProviderConfig::default());
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model(), "gpt-3.5-turbo");
    }
}
