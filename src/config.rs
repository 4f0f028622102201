use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main recommender configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecommenderConfig {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Ingredient analysis scheduling
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Configuration for the chat-completion provider
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    /// Bearer credential for the completion endpoint
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier (e.g., "gpt-3.5-turbo")
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate, sized for three full recipes
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request deadline in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Configuration for background ingredient analysis
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Quiet period before an analysis request is actually sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    60
}

fn default_debounce_ms() -> u64 {
    500
}

impl RecommenderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY__ prefix
    /// 2. pantry.toml file in current directory
    /// 3. Default values
    ///
    /// When no API key is configured, `OPENAI_API_KEY` is used if set.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: PANTRY__PROVIDER__API_KEY
pub fn load_config() -> Result<RecommenderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("pantry").required(false))
        // Use double underscore for nested: PANTRY__PROVIDER__MODEL
        .add_source(
            Environment::with_prefix("PANTRY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: RecommenderConfig = settings.try_deserialize()?;
    if config.provider.api_key.is_none() {
        config.provider.api_key = std::env::var("OPENAI_API_KEY").ok();
    }
    Ok(config)
}
