//! Recipe, ingredient, and cuisine entities owned by the [`RecipeIndex`].
//!
//! [`RecipeIndex`]: crate::index::RecipeIndex

use crate::taxonomy::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a recipe in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipeId(pub u64);

/// Stable handle to a deduplicated ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub u32);

/// Stable handle to a cuisine tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CuisineId(pub u32);

/// A cuisine tag, such as "Indian" or "Italian".  Matched by normalized
/// name; `name` keeps the canonical capitalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cuisine {
    pub id: CuisineId,
    pub name: String,
}

/// Raw recipe data handed to ingestion, e.g. produced by a scraper or read
/// from a data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeData {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// A single ingredient as the food item itself: "apple", not "3/4 cup of
/// finely chopped apples".  Deduplicated by normalized name and optionally
/// linked to the most specific taxonomy concept found in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub taxonomy_node: Option<NodeId>,
}

/// One parsed ingredient line of a recipe: an ingredient plus how much of
/// it and in what form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient: IngredientId,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub modifiers: Option<String>,
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            self.quantity.as_deref(),
            self.unit.as_deref(),
            self.modifiers.as_deref(),
            Some(self.name.as_str()),
        ];
        let line: Vec<&str> = parts.into_iter().flatten().collect();
        write!(f, "{}", line.join(" "))
    }
}

/// A stored recipe.  `num_ingredients` and `num_steps` are computed once at
/// ingestion and cached; `num_ingredients` counts parsed ingredient lines
/// only, so section headings do not inflate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub url: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub servings: String,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub num_steps: u32,
    pub num_ingredients: u32,
    pub ingredients: Vec<IngredientLine>,
    /// Canonical names of every cuisine tied at the maximum classifier
    /// score, sorted.
    pub cuisines: Vec<String>,
    pub ingredients_text: String,
    pub steps_text: String,
}

impl Recipe {
    /// Reconstruct the raw data this recipe was ingested from.  Used by
    /// snapshotting.
    #[must_use]
    pub fn to_data(&self) -> RecipeData {
        let split_lines = |text: &str| -> Vec<String> {
            text.lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        };
        RecipeData {
            url: self.url.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            servings: self.servings.clone(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            ingredients: split_lines(&self.ingredients_text),
            steps: split_lines(&self.steps_text),
        }
    }
}
