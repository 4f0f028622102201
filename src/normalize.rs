//! Turns the model's free-text JSON into validated domain records.

use crate::error::{RecommendError, Result};
use crate::model::{Difficulty, IngredientAnalysis, NutritionalInfo, Recipe};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static BATCH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Recipe as the model is asked to produce it: no `id`, loosely typed numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    title: String,
    #[serde(default)]
    description: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    cook_time: f64,
    servings: f64,
    difficulty: String,
    #[serde(default)]
    cuisine: String,
    #[serde(default)]
    dietary_tags: Vec<String>,
    #[serde(default)]
    nutritional_info: Option<NutritionalInfo>,
}

/// Parse a recipe batch, assigning every recipe a fresh id.
///
/// Any failure rejects the whole batch.
pub fn normalize_recipes(raw_text: &str) -> Result<Vec<Recipe>> {
    let value = parse_json(raw_text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(RecommendError::MalformedResponse(format!(
                "expected a JSON array of recipes, found {}",
                json_kind(&other)
            )))
        }
    };

    let token = batch_token();
    debug!("Normalizing {} recipes (batch {})", items.len(), token);

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawRecipe = serde_json::from_value(item).map_err(|e| {
                RecommendError::MalformedResponse(format!("recipe {}: {}", index, e))
            })?;
            validate_recipe(raw, format!("ai-recipe-{}-{}", token, index)).map_err(|reason| {
                RecommendError::MalformedResponse(format!("recipe {}: {}", index, reason))
            })
        })
        .collect()
}

/// Parse an ingredient analysis, failing on any deviation from the three-array shape.
pub fn try_normalize_analysis(raw_text: &str) -> Result<IngredientAnalysis> {
    let value = parse_json(raw_text)?;
    if !value.is_object() {
        return Err(RecommendError::MalformedResponse(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| RecommendError::MalformedResponse(e.to_string()))
}

/// Best-effort analysis parsing: anything unusable becomes an empty analysis.
pub fn normalize_analysis(raw_text: &str) -> IngredientAnalysis {
    try_normalize_analysis(raw_text).unwrap_or_else(|e| {
        warn!("Discarding ingredient analysis: {}", e);
        IngredientAnalysis::default()
    })
}

fn parse_json(raw_text: &str) -> Result<Value> {
    serde_json::from_str(raw_text.trim()).map_err(|e| {
        debug!("Unparseable model output: {}", raw_text);
        RecommendError::MalformedResponse(format!("model output is not valid JSON: {}", e))
    })
}

fn validate_recipe(raw: RawRecipe, id: String) -> std::result::Result<Recipe, String> {
    let title = raw.title.trim().to_string();
    if title.is_empty() {
        return Err("title is empty".to_string());
    }
    if raw.ingredients.is_empty() {
        return Err("ingredients list is empty".to_string());
    }
    if raw.instructions.is_empty() {
        return Err("instructions list is empty".to_string());
    }

    let cook_time = positive_whole(raw.cook_time, "cookTime")?;
    let servings = positive_whole(raw.servings, "servings")?;
    let difficulty = Difficulty::parse(&raw.difficulty)
        .ok_or_else(|| format!("unknown difficulty '{}'", raw.difficulty))?;

    if let Some(info) = &raw.nutritional_info {
        for (name, amount) in [
            ("calories", info.calories),
            ("protein", info.protein),
            ("carbs", info.carbs),
            ("fat", info.fat),
        ] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("nutritionalInfo.{} must be non-negative", name));
            }
        }
    }

    let mut dietary_tags: Vec<String> = Vec::with_capacity(raw.dietary_tags.len());
    for tag in raw.dietary_tags {
        if !dietary_tags.contains(&tag) {
            dietary_tags.push(tag);
        }
    }

    Ok(Recipe {
        id,
        title,
        description: raw.description,
        ingredients: raw.ingredients,
        instructions: raw.instructions,
        cook_time,
        servings,
        difficulty,
        cuisine: raw.cuisine,
        dietary_tags,
        nutritional_info: raw.nutritional_info,
    })
}

fn positive_whole(value: f64, field: &str) -> std::result::Result<u32, String> {
    if value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(format!("{} must be a positive whole number, got {}", field, value))
    }
}

fn batch_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let sequence = BATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", millis, sequence)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
