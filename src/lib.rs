//! Turn pantry ingredients into LLM-generated recipe recommendations.
//!
//! A [`RecipeRecommender`] renders a prompt from the user's ingredients and
//! preferences, sends it to a chat-completion endpoint and normalizes the
//! model's JSON reply into typed [`Recipe`] values.
//!
//! # Example
//! ```no_run
//! use pantry_chef::{IngredientSet, PreferenceProfile, RecipeRecommender, RecipeRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recommender = RecipeRecommender::builder().api_key("sk-...").build()?;
//! let ingredients: IngredientSet = ["chicken", "rice"].into_iter().collect();
//! let request = RecipeRequest::new(ingredients, PreferenceProfile::new().with_servings(2));
//!
//! for recipe in recommender.generate(&request).await? {
//!     println!("{} ({} min)", recipe.title, recipe.cook_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cancel;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod recommender;
pub mod scheduler;

pub use builder::RecipeRecommenderBuilder;
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use crate::config::RecommenderConfig;
pub use error::{RecommendError, Result};
pub use model::{
    Difficulty, IngredientAnalysis, IngredientSet, NutritionalInfo, PreferenceProfile, Recipe,
    RecipeRequest,
};
pub use recommender::RecipeRecommender;
pub use scheduler::AnalysisScheduler;

use log::warn;

/// Generate recipes using configuration from `pantry.toml` and the environment.
///
/// # Example
/// ```no_run
/// # use pantry_chef::{generate_recipes, IngredientSet, PreferenceProfile, RecipeRequest};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = RecipeRequest::new(
///     ["egg", "spinach"].into_iter().collect(),
///     PreferenceProfile::default(),
/// );
/// let recipes = generate_recipes(&request).await?;
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipes(request: &RecipeRequest) -> Result<Vec<Recipe>> {
    let config = RecommenderConfig::load()?;
    RecipeRecommender::from_config(&config.provider)
        .generate(request)
        .await
}

/// Analyze ingredients using configuration from `pantry.toml` and the environment.
///
/// Never fails; configuration problems yield an empty analysis.
pub async fn analyze_ingredients(ingredients: &IngredientSet) -> IngredientAnalysis {
    match RecommenderConfig::load() {
        Ok(config) => {
            RecipeRecommender::from_config(&config.provider)
                .analyze(ingredients)
                .await
        }
        Err(e) => {
            warn!("Skipping ingredient analysis, configuration failed to load: {}", e);
            IngredientAnalysis::default()
        }
    }
}
