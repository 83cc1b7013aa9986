//! Parsing for the ingredient lines of a recipe.
//!
//! A line like `1 (12 ounce) package tofu` is split into a quantity, a unit,
//! optional modifiers, and the base ingredient.  Lines that do not name an
//! ingredient at all (section headings such as `CRUST:`, or bare quantities)
//! parse to `None` and are excluded from a recipe's ingredient count.

use crate::lexicon::{is_food_adjective, is_unit_of_measure};
use crate::normalize::normalize_name;

/// The structured parts of one ingredient line.  `base_ingredient` is
/// normalized; the other parts keep their original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientParts {
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub modifiers: Option<String>,
    pub base_ingredient: String,
}

fn is_quantity_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '/' || c == '.' || c == '-')
}

fn normalized_word(token: &str) -> String {
    normalize_name(token.trim_matches(|c: char| !c.is_alphanumeric()))
}

/// Parse one ingredient line.  Returns `None` when no base ingredient
/// remains after stripping quantity, unit, and modifiers.
///
/// ```
/// use cookdex_core::ingredient_line::parse_ingredient_line;
///
/// let parts = parse_ingredient_line("12 cups lettuce").unwrap();
/// assert_eq!(parts.quantity.as_deref(), Some("12"));
/// assert_eq!(parts.unit.as_deref(), Some("cups"));
/// assert_eq!(parts.base_ingredient, "lettuce");
///
/// assert!(parse_ingredient_line("1 1/2").is_none());
/// ```
pub fn parse_ingredient_line(line: &str) -> Option<IngredientParts> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    // Leading quantity: digits, fractions, decimals ("1", "1 1/2", "2.5").
    let mut quantity_tokens = Vec::new();
    while !tokens.is_empty() && is_quantity_token(tokens[0]) {
        quantity_tokens.push(tokens.remove(0));
    }

    // Unit of measure, possibly with a parenthesized size prefix,
    // e.g. "(12 ounce) package".
    let mut unit_tokens: Vec<&str> = Vec::new();
    if !tokens.is_empty() && tokens[0].starts_with('(') {
        while !tokens.is_empty() {
            let token = tokens.remove(0);
            unit_tokens.push(token);
            if token.ends_with(')') {
                break;
            }
        }
    }
    while !tokens.is_empty() && is_unit_of_measure(&normalized_word(tokens[0])) {
        unit_tokens.push(tokens.remove(0));
    }

    // Modifiers before the ingredient name: "large, fresh eggs".
    let mut modifier_tokens: Vec<&str> = Vec::new();
    while !tokens.is_empty() && is_food_adjective(&normalized_word(tokens[0])) {
        modifier_tokens.push(tokens.remove(0));
    }

    if tokens.is_empty() {
        return None;
    }

    // Whatever is left names the ingredient, possibly followed by
    // comma-separated modifiers: "apple, cored, peeled".
    let remainder = tokens.join(" ");
    let (base, post_modifiers) = match remainder.split_once(',') {
        Some((base, post)) => (base.trim(), Some(post.trim())),
        None => (remainder.as_str(), None),
    };
    if base.ends_with(':') {
        return None;
    }
    let base_ingredient = normalize_name(base);
    if base_ingredient.is_empty() {
        return None;
    }

    let mut modifiers = modifier_tokens.join(" ");
    if let Some(post) = post_modifiers {
        if modifiers.is_empty() {
            modifiers = post.to_string();
        } else {
            modifiers = format!("{}, {}", modifiers.trim_end_matches(','), post);
        }
    }

    Some(IngredientParts {
        quantity: (!quantity_tokens.is_empty()).then(|| quantity_tokens.join(" ")),
        unit: (!unit_tokens.is_empty()).then(|| unit_tokens.join(" ")),
        modifiers: (!modifiers.is_empty()).then_some(modifiers),
        base_ingredient,
    })
}
