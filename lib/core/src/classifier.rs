//! Weighted cuisine classification, run once per recipe at ingestion time.

use crate::lexicon;
use crate::normalize::normalize_name;
use std::collections::HashMap;

/// Relative weights for classification hits in the title, description, and
/// ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub title: u32,
    pub description: u32,
    pub ingredient: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            title: 10,
            description: 5,
            ingredient: 1,
        }
    }
}

fn score_tokens(text: &str, weight: u32, scores: &mut HashMap<String, u32>) {
    for token in text.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric());
        if let Some(cuisine) = lexicon::adjectival_cuisine(token) {
            *scores.entry(cuisine.to_string()).or_insert(0) += weight;
        }
    }
}

/// Score candidate cuisines for a recipe.  Pure: identical inputs always
/// produce identical scores, and calls share no state.
///
/// Title and description tokens hit the nationality-adjective list;
/// ingredient names hit the static ingredient→cuisine mapping.  Cuisines
/// absent from the returned map implicitly score 0.  Ties are preserved for
/// the caller to resolve.
pub fn classify(
    title: &str,
    description: &str,
    ingredient_names: &[String],
    weights: &Weights,
) -> HashMap<String, u32> {
    let mut scores = HashMap::new();
    score_tokens(title, weights.title, &mut scores);
    score_tokens(description, weights.description, &mut scores);
    for name in ingredient_names {
        for cuisine in lexicon::cuisines_for_ingredient(&normalize_name(name)) {
            *scores.entry((*cuisine).to_string()).or_insert(0) += weights.ingredient;
        }
    }
    scores
}

/// Every cuisine achieving the maximum score, sorted by name.  Empty when
/// the classifier found nothing.
pub fn top_cuisines(scores: &HashMap<String, u32>) -> Vec<String> {
    let Some(max) = scores.values().copied().max() else {
        return Vec::new();
    };
    let mut top: Vec<String> = scores
        .iter()
        .filter(|(_, &score)| score == max)
        .map(|(cuisine, _)| cuisine.clone())
        .collect();
    top.sort();
    top
}
