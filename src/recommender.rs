use crate::builder::RecipeRecommenderBuilder;
use crate::config::ProviderConfig;
use crate::error::{RecommendError, Result};
use crate::model::{IngredientAnalysis, IngredientSet, Recipe, RecipeRequest};
use crate::normalize::{normalize_recipes, try_normalize_analysis};
use crate::providers::{
    build_analysis_prompt, build_generation_prompt, CompletionOptions, CompletionProvider,
    OpenAIProvider, SYSTEM_PROMPT,
};
use log::{error, info, warn};
use std::sync::Arc;

/// Caller-facing entry point: one prompt, one completion, one normalized result.
#[derive(Clone)]
pub struct RecipeRecommender {
    provider: Arc<dyn CompletionProvider>,
}

impl std::fmt::Debug for RecipeRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeRecommender")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl RecipeRecommender {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Recommender backed by the OpenAI chat-completion endpoint.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(Arc::new(OpenAIProvider::new(config)))
    }

    pub fn builder() -> RecipeRecommenderBuilder {
        RecipeRecommenderBuilder::default()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate a batch of recipes from the request.
    ///
    /// Every failure is returned to the caller with its kind intact. Use
    /// [`RecommendError::user_message`] for what to show an end user.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Vec<Recipe>> {
        self.generate_with(request, &CompletionOptions::default())
            .await
    }

    pub async fn generate_with(
        &self,
        request: &RecipeRequest,
        options: &CompletionOptions,
    ) -> Result<Vec<Recipe>> {
        let result = self.try_generate(request, options).await;
        if let Err(e) = &result {
            error!("Recipe generation failed ({}): {}", e.kind(), e);
        }
        result
    }

    async fn try_generate(
        &self,
        request: &RecipeRequest,
        options: &CompletionOptions,
    ) -> Result<Vec<Recipe>> {
        if request.ingredients.is_empty() {
            return Err(RecommendError::InvalidRequest(
                "Please add at least one ingredient".to_string(),
            ));
        }

        info!(
            "Generating recipes for {} ingredients using {}",
            request.ingredients.len(),
            self.provider.provider_name()
        );
        let prompt = build_generation_prompt(request);
        let raw = self
            .provider
            .complete(SYSTEM_PROMPT, &prompt, options)
            .await?;
        let recipes = normalize_recipes(&raw)?;
        info!("Generated {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Suggest complementary ingredients, missing staples and cuisines.
    ///
    /// Never fails: any problem yields an empty analysis.
    pub async fn analyze(&self, ingredients: &IngredientSet) -> IngredientAnalysis {
        self.try_analyze_with(ingredients, &CompletionOptions::default())
            .await
            .unwrap_or_else(|e| {
                warn!("Ingredient analysis failed ({}): {}", e.kind(), e);
                IngredientAnalysis::default()
            })
    }

    /// Strict variant of [`RecipeRecommender::analyze`] that reports what went wrong.
    pub async fn try_analyze_with(
        &self,
        ingredients: &IngredientSet,
        options: &CompletionOptions,
    ) -> Result<IngredientAnalysis> {
        if ingredients.is_empty() {
            return Ok(IngredientAnalysis::default());
        }

        let prompt = build_analysis_prompt(ingredients);
        let raw = self
            .provider
            .complete(SYSTEM_PROMPT, &prompt, options)
            .await?;
        try_normalize_analysis(&raw)
    }
}
