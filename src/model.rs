use serde::{Deserialize, Serialize};
use std::fmt;

/// Dietary options offered to users. Free-form restrictions are accepted too.
pub const DIETARY_OPTIONS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "nut-free",
    "low-carb",
    "keto",
    "paleo",
];

/// Cuisines offered to users. Any other cuisine string is accepted too.
pub const CUISINE_OPTIONS: &[&str] = &[
    "Italian",
    "Mexican",
    "Asian",
    "Mediterranean",
    "Indian",
    "American",
    "French",
    "Thai",
    "Japanese",
];

pub const MIN_COOKING_TIME: u32 = 10;
pub const MAX_COOKING_TIME: u32 = 180;
pub const DEFAULT_COOKING_TIME: u32 = 30;
pub const MIN_SERVINGS: u32 = 1;
pub const MAX_SERVINGS: u32 = 12;
pub const DEFAULT_SERVINGS: u32 = 4;

/// Pantry ingredients in the order the user entered them.
///
/// Names are stored lowercase and never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngredientSet {
    items: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient, returning `false` if it was blank or already present.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let name = ingredient.trim().to_lowercase();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Remove the ingredient at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove an ingredient by name (case-insensitive).
    pub fn remove_named(&mut self, ingredient: &str) -> bool {
        let name = ingredient.trim().to_lowercase();
        match self.items.iter().position(|i| *i == name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        let name = ingredient.trim().to_lowercase();
        self.items.iter().any(|i| *i == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = IngredientSet::new();
        for ingredient in iter {
            set.add(ingredient.as_ref());
        }
        set
    }
}

impl<'de> Deserialize<'de> for IngredientSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<String>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

/// User preferences that shape the generation prompt
///
/// Deserialized values go through the same normalization as the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    dietary_restrictions: Vec<String>,
    cuisine_preference: Option<String>,
    cooking_time_minutes: u32,
    servings: u32,
}

/// Preferences exactly as received on the wire.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPreferences {
    dietary_restrictions: Vec<String>,
    cuisine_preference: Option<String>,
    #[serde(alias = "cookingTime")]
    cooking_time_minutes: u32,
    servings: u32,
}

impl Default for RawPreferences {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            cuisine_preference: None,
            cooking_time_minutes: DEFAULT_COOKING_TIME,
            servings: DEFAULT_SERVINGS,
        }
    }
}

impl<'de> Deserialize<'de> for PreferenceProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPreferences::deserialize(deserializer)?;
        let mut prefs = PreferenceProfile::new()
            .with_cooking_time(raw.cooking_time_minutes)
            .with_servings(raw.servings);
        for restriction in raw.dietary_restrictions {
            prefs = prefs.with_restriction(restriction);
        }
        if let Some(cuisine) = raw.cuisine_preference {
            prefs = prefs.with_cuisine(cuisine);
        }
        Ok(prefs)
    }
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            cuisine_preference: None,
            cooking_time_minutes: DEFAULT_COOKING_TIME,
            servings: DEFAULT_SERVINGS,
        }
    }
}

impl PreferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dietary restriction. Duplicates are ignored.
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        let restriction = restriction.into().trim().to_lowercase();
        if !restriction.is_empty() && !self.dietary_restrictions.contains(&restriction) {
            self.dietary_restrictions.push(restriction);
        }
        self
    }

    /// Set the cuisine preference. A blank value clears it.
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        let cuisine = cuisine.into();
        let trimmed = cuisine.trim();
        self.cuisine_preference = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set the maximum cooking time, clamped to 10..=180 minutes.
    pub fn with_cooking_time(mut self, minutes: u32) -> Self {
        self.cooking_time_minutes = minutes.clamp(MIN_COOKING_TIME, MAX_COOKING_TIME);
        self
    }

    /// Set the number of servings, clamped to 1..=12.
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings.clamp(MIN_SERVINGS, MAX_SERVINGS);
        self
    }

    /// Add the restriction when absent, remove it when present.
    pub fn toggle_restriction(&mut self, restriction: &str) {
        let restriction = restriction.trim().to_lowercase();
        if let Some(index) = self
            .dietary_restrictions
            .iter()
            .position(|r| *r == restriction)
        {
            self.dietary_restrictions.remove(index);
        } else if !restriction.is_empty() {
            self.dietary_restrictions.push(restriction);
        }
    }

    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    pub fn cuisine_preference(&self) -> Option<&str> {
        self.cuisine_preference.as_deref()
    }

    pub fn cooking_time_minutes(&self) -> u32 {
        self.cooking_time_minutes
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }
}

/// Everything needed to ask for a batch of recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: IngredientSet,
    #[serde(default)]
    pub preferences: PreferenceProfile,
}

impl RecipeRequest {
    pub fn new(ingredients: IngredientSet, preferences: PreferenceProfile) -> Self {
        Self {
            ingredients,
            preferences,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Look up a difficulty by its exact label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-serving nutrition estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    /// Steps in display order
    pub instructions: Vec<String>,
    /// Minutes
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    pub dietary_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Suggestions for a set of pantry ingredients. Empty lists mean "nothing to suggest".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAnalysis {
    pub suggestions: Vec<String>,
    pub missing_essentials: Vec<String>,
    pub cuisine_recommendations: Vec<String>,
}

impl IngredientAnalysis {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
            && self.missing_essentials.is_empty()
            && self.cuisine_recommendations.is_empty()
    }
}
