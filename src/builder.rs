use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::providers::{CompletionProvider, OpenAIProvider};
use crate::{RecipeRecommender, RecommendError};

/// Builder for configuring a [`RecipeRecommender`]
#[derive(Default)]
pub struct RecipeRecommenderBuilder {
    config: Option<ProviderConfig>,
    provider: Option<Arc<dyn CompletionProvider>>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl RecipeRecommenderBuilder {
    /// Start from a loaded provider configuration
    ///
    /// Individual setters called afterwards override the matching fields.
    ///
    /// # Example
    /// ```
    /// use pantry_chef::{config::ProviderConfig, RecipeRecommender};
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .config(ProviderConfig::default());
    /// ```
    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom completion backend instead of OpenAI
    ///
    /// Cannot be combined with the OpenAI-specific setters.
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the completion endpoint
    ///
    /// # Example
    /// ```
    /// use pantry_chef::RecipeRecommender;
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name
    ///
    /// # Example
    /// ```
    /// use pantry_chef::RecipeRecommender;
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .model("gpt-4o-mini");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the client at a proxy or compatible endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the deadline for each completion call
    ///
    /// # Example
    /// ```
    /// use pantry_chef::RecipeRecommender;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Assemble the recommender
    ///
    /// # Errors
    /// Returns [`RecommendError::Configuration`] if a custom provider is combined
    /// with OpenAI-specific settings, or the timeout is zero.
    pub fn build(self) -> Result<RecipeRecommender, RecommendError> {
        let has_openai_settings = self.config.is_some()
            || self.api_key.is_some()
            || self.model.is_some()
            || self.base_url.is_some()
            || self.temperature.is_some()
            || self.max_tokens.is_some()
            || self.timeout.is_some();

        if let Some(provider) = self.provider {
            if has_openai_settings {
                return Err(RecommendError::Configuration(
                    "A custom provider cannot be combined with OpenAI settings".to_string(),
                ));
            }
            return Ok(RecipeRecommender::new(provider));
        }

        let mut config = self.config.unwrap_or_default();
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        let mut provider = OpenAIProvider::new(&config);
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(RecommendError::Configuration(
                    "Timeout must be greater than zero".to_string(),
                ));
            }
            provider = provider.with_timeout(timeout);
        }

        Ok(RecipeRecommender::new(Arc::new(provider)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::providers::CompletionOptions;
    use async_trait::async_trait;

    struct Silent;

    #[async_trait]
    impl CompletionProvider for Silent {
        fn provider_name(&self) -> &str {
            "silent"
        }

        async fn complete(&self, _: &str, _: &str, _: &CompletionOptions) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_default_builds_openai() {
        let recommender = RecipeRecommender::builder().build().unwrap();
        assert_eq!(recommender.provider_name(), "openai");
    }

    #[test]
    fn test_custom_provider() {
        let recommender = RecipeRecommender::builder()
            .provider(Arc::new(Silent))
            .build()
            .unwrap();
        assert_eq!(recommender.provider_name(), "silent");
    }

    #[test]
    fn test_custom_provider_with_api_key_is_rejected() {
        let result = RecipeRecommender::builder()
            .provider(Arc::new(Silent))
            .api_key("key")
            .build();
        assert!(matches!(result, Err(RecommendError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = RecipeRecommender::builder()
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(RecommendError::Configuration(_))));
    }
}
