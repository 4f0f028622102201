use crate::model::{IngredientSet, RecipeRequest};

/// The system-role message sent with every completion request.
///
/// Fixes the assistant's persona and asks for JSON-only answers. Loaded from
/// `system_prompt.txt` at compile time so it can be edited as plain text.
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

/// Output contract for recipe generation, embedded verbatim in the prompt.
pub const RECIPE_SCHEMA: &str = include_str!("recipe_schema.txt");

/// Output contract for ingredient analysis, embedded verbatim in the prompt.
pub const ANALYSIS_SCHEMA: &str = include_str!("analysis_schema.txt");

/// Number of recipes requested per generation call.
pub const RECIPES_PER_REQUEST: usize = 3;

const RECIPE_FIELDS: &str = "For each recipe, provide:
1. A creative, appetizing title
2. Brief description (1-2 sentences)
3. Complete ingredient list with quantities
4. Step-by-step instructions
5. Estimated cooking time in minutes
6. Number of servings
7. Difficulty level (Easy/Medium/Hard)
8. Cuisine type
9. Dietary tags (vegetarian, vegan, gluten-free, etc.)
10. Basic nutritional information (calories, protein, carbs, fat per serving)";

const ANALYSIS_TASKS: &str = "Provide suggestions for:
1. Additional ingredients that would complement these well
2. Essential cooking ingredients that might be missing (salt, oil, etc.)
3. Cuisine types that work best with these ingredients";

/// Render the recipe generation prompt.
///
/// Requirement lines appear only for preferences that are set. Cooking time and
/// servings always carry a value, so their lines are always present.
pub fn build_generation_prompt(request: &RecipeRequest) -> String {
    let prefs = &request.preferences;

    let mut requirements = Vec::new();
    if !prefs.dietary_restrictions().is_empty() {
        requirements.push(format!(
            "- Dietary restrictions: {}",
            prefs.dietary_restrictions().join(", ")
        ));
    }
    if let Some(cuisine) = prefs.cuisine_preference() {
        requirements.push(format!("- Cuisine preference: {cuisine}"));
    }
    requirements.push(format!(
        "- Maximum cooking time: {} minutes",
        prefs.cooking_time_minutes()
    ));
    requirements.push(format!("- Servings: {}", prefs.servings()));

    format!(
        "Generate {RECIPES_PER_REQUEST} unique recipes using these available ingredients: {}.\n\nRequirements:\n{}\n\n{RECIPE_FIELDS}\n\n{RECIPE_SCHEMA}",
        quoted_list(&request.ingredients),
        requirements.join("\n"),
    )
}

/// Render the ingredient analysis prompt.
pub fn build_analysis_prompt(ingredients: &IngredientSet) -> String {
    format!(
        "Analyze these ingredients: {}.\n\n{ANALYSIS_TASKS}\n\n{ANALYSIS_SCHEMA}",
        quoted_list(ingredients)
    )
}

/// Single-quote each ingredient so it stays distinguishable from template text.
fn quoted_list(ingredients: &IngredientSet) -> String {
    ingredients
        .iter()
        .map(|ingredient| format!("'{ingredient}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
