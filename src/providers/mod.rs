mod open_ai;
mod prompt;

pub use open_ai::OpenAIProvider;
pub use prompt::{
    build_analysis_prompt, build_generation_prompt, ANALYSIS_SCHEMA, RECIPES_PER_REQUEST,
    RECIPE_SCHEMA, SYSTEM_PROMPT,
};

use crate::cancel::CancelSignal;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Per-call generation parameters
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Overrides the provider's configured temperature
    pub temperature: Option<f32>,
    /// Overrides the provider's configured token ceiling
    pub max_tokens: Option<u32>,
    /// Overrides the provider's configured deadline
    pub deadline: Option<Duration>,
    /// Aborts the call when fired
    pub cancel: Option<CancelSignal>,
}

impl CompletionOptions {
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A chat-completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Send one system + user exchange and return the first completion's text verbatim
    async fn complete(
        &self,
        system_role: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String>;
}
