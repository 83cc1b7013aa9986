//! The recipe index: ingestion, filtered queries, and reverse lookups.

use crate::classifier::{self, Weights};
use crate::criteria::Criteria;
use crate::error::{Error, Result};
use crate::ingredient_line::parse_ingredient_line;
use crate::normalize::normalize_name;
use crate::recipe::{Cuisine, CuisineId, Ingredient, IngredientId, IngredientLine, Recipe, RecipeData, RecipeId};
use crate::taxonomy::TaxonomyStore;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct Tables {
    recipes: Vec<Recipe>,
    by_url: HashMap<String, RecipeId>,
    ingredients: Vec<Ingredient>,
    ingredient_by_name: HashMap<String, IngredientId>,
    cuisines: Vec<Cuisine>,
    cuisine_by_name: HashMap<String, CuisineId>,
    recipes_by_ingredient: HashMap<IngredientId, HashSet<RecipeId>>,
    recipes_by_cuisine: HashMap<CuisineId, HashSet<RecipeId>>,
}

impl Tables {
    fn ingredient_id(&mut self, name: &str, taxonomy: &TaxonomyStore) -> IngredientId {
        if let Some(&id) = self.ingredient_by_name.get(name) {
            return id;
        }
        let id = IngredientId(self.ingredients.len() as u32);
        let taxonomy_node = taxonomy.link_ingredient(name).map(|n| n.id);
        self.ingredients.push(Ingredient {
            id,
            name: name.to_string(),
            taxonomy_node,
        });
        self.ingredient_by_name.insert(name.to_string(), id);
        id
    }

    fn cuisine_id(&mut self, canonical_name: &str) -> CuisineId {
        let key = normalize_name(canonical_name);
        if let Some(&id) = self.cuisine_by_name.get(&key) {
            return id;
        }
        let id = CuisineId(self.cuisines.len() as u32);
        self.cuisines.push(Cuisine {
            id,
            name: canonical_name.to_string(),
        });
        self.cuisine_by_name.insert(key, id);
        id
    }
}

/// Owns all recipes, ingredients, and cuisine tags.  Ingestion is
/// serialized by the inner lock; queries run concurrently.
///
/// The index holds a non-owning reference to the [`TaxonomyStore`] for
/// linking ingredients to concepts at ingestion time.
pub struct RecipeIndex {
    taxonomy: Arc<TaxonomyStore>,
    weights: Weights,
    tables: RwLock<Tables>,
}

impl RecipeIndex {
    #[must_use]
    pub fn new(taxonomy: Arc<TaxonomyStore>) -> Self {
        Self::with_weights(taxonomy, Weights::default())
    }

    #[must_use]
    pub fn with_weights(taxonomy: Arc<TaxonomyStore>, weights: Weights) -> Self {
        Self {
            taxonomy,
            weights,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Add one recipe.  Rejects a url already present in the index and
    /// leaves the index unmodified in that case.
    ///
    /// Each raw ingredient line is parsed into (quantity, unit, modifiers,
    /// ingredient); lines that fail to parse (section headings and the
    /// like) are skipped and excluded from `num_ingredients`.  The cuisine
    /// classifier runs over the title, description and parsed ingredient
    /// names, and the recipe is tagged with every cuisine tied at the
    /// maximum score.
    pub fn ingest(&self, data: &RecipeData) -> Result<RecipeId> {
        let mut tables = self.tables.write();
        if tables.by_url.contains_key(&data.url) {
            return Err(Error::DuplicateRecipe(data.url.clone()));
        }

        let mut lines = Vec::new();
        for raw in &data.ingredients {
            let Some(parts) = parse_ingredient_line(raw) else {
                debug!(line = %raw, "skipping unparseable ingredient line");
                continue;
            };
            let ingredient = tables.ingredient_id(&parts.base_ingredient, &self.taxonomy);
            lines.push(IngredientLine {
                ingredient,
                name: parts.base_ingredient,
                quantity: parts.quantity,
                unit: parts.unit,
                modifiers: parts.modifiers,
            });
        }

        let ingredient_names: Vec<String> = lines.iter().map(|l| l.name.clone()).collect();
        let scores = classifier::classify(
            &data.title,
            &data.description,
            &ingredient_names,
            &self.weights,
        );
        let cuisines = classifier::top_cuisines(&scores);

        let id = RecipeId(tables.recipes.len() as u64);
        for line in &lines {
            tables
                .recipes_by_ingredient
                .entry(line.ingredient)
                .or_default()
                .insert(id);
        }
        for cuisine in &cuisines {
            let cuisine_id = tables.cuisine_id(cuisine);
            tables
                .recipes_by_cuisine
                .entry(cuisine_id)
                .or_default()
                .insert(id);
        }

        let num_ingredients = lines.len() as u32;
        let recipe = Recipe {
            id,
            url: data.url.clone(),
            title: data.title.clone(),
            author: data.author.clone(),
            description: data.description.clone(),
            servings: data.servings.clone(),
            prep_time: data.prep_time,
            cook_time: data.cook_time,
            total_time: data.total_time,
            num_steps: data.steps.len() as u32,
            num_ingredients,
            ingredients: lines,
            cuisines: cuisines.clone(),
            ingredients_text: data.ingredients.join("\n"),
            steps_text: data.steps.join("\n"),
        };
        tables.by_url.insert(data.url.clone(), id);
        tables.recipes.push(recipe);
        debug!(
            url = %data.url,
            num_ingredients,
            cuisines = ?cuisines,
            "ingested recipe"
        );
        Ok(id)
    }

    /// Recipes matching the criteria, in ingestion order.  An empty
    /// criteria object matches all recipes; no match is an empty result,
    /// never an error.
    pub fn query(&self, criteria: &Criteria) -> Vec<Recipe> {
        let tables = self.tables.read();

        // Resolve criteria names up front.  An include term naming an
        // unknown ingredient or cuisine can never match; unknown exclude
        // terms exclude nothing.
        let mut include_ingredients = Vec::new();
        for name in &criteria.include_ingredients {
            match tables.ingredient_by_name.get(&normalize_name(name)) {
                Some(&id) => include_ingredients.push(id),
                None => return Vec::new(),
            }
        }
        let exclude_ingredients: Vec<IngredientId> = criteria
            .exclude_ingredients
            .iter()
            .filter_map(|name| tables.ingredient_by_name.get(&normalize_name(name)).copied())
            .collect();
        let mut include_cuisines = Vec::new();
        for name in &criteria.include_cuisines {
            match tables.cuisine_by_name.get(&normalize_name(name)) {
                Some(&id) => include_cuisines.push(id),
                None => return Vec::new(),
            }
        }
        let exclude_cuisines: Vec<CuisineId> = criteria
            .exclude_cuisines
            .iter()
            .filter_map(|name| tables.cuisine_by_name.get(&normalize_name(name)).copied())
            .collect();

        fn uses<K: Eq + std::hash::Hash>(
            postings: &HashMap<K, HashSet<RecipeId>>,
            key: K,
            id: RecipeId,
        ) -> bool {
            postings.get(&key).map_or(false, |set| set.contains(&id))
        }

        tables
            .recipes
            .iter()
            .filter(|recipe| {
                include_ingredients
                    .iter()
                    .all(|&i| uses(&tables.recipes_by_ingredient, i, recipe.id))
                    && !exclude_ingredients
                        .iter()
                        .any(|&i| uses(&tables.recipes_by_ingredient, i, recipe.id))
                    && include_cuisines
                        .iter()
                        .all(|&c| uses(&tables.recipes_by_cuisine, c, recipe.id))
                    && !exclude_cuisines
                        .iter()
                        .any(|&c| uses(&tables.recipes_by_cuisine, c, recipe.id))
                    && criteria
                        .prep_time
                        .map_or(true, |r| r.matches(recipe.prep_time))
                    && criteria
                        .cook_time
                        .map_or(true, |r| r.matches(recipe.cook_time))
                    && criteria
                        .total_time
                        .map_or(true, |r| r.matches(recipe.total_time))
                    && criteria
                        .num_steps
                        .map_or(true, |r| r.contains(recipe.num_steps))
                    && criteria
                        .num_ingredients
                        .map_or(true, |r| r.contains(recipe.num_ingredients))
            })
            .cloned()
            .collect()
    }

    /// Recipe by id.
    pub fn recipe(&self, id: RecipeId) -> Option<Recipe> {
        self.tables.read().recipes.get(id.0 as usize).cloned()
    }

    /// Recipe by url.
    pub fn recipe_by_url(&self, url: &str) -> Option<Recipe> {
        let tables = self.tables.read();
        tables
            .by_url
            .get(url)
            .and_then(|&id| tables.recipes.get(id.0 as usize))
            .cloned()
    }

    /// The parsed ingredient lines of a recipe, in original order.
    pub fn ingredient_lines(&self, id: RecipeId) -> Vec<IngredientLine> {
        self.tables
            .read()
            .recipes
            .get(id.0 as usize)
            .map(|r| r.ingredients.clone())
            .unwrap_or_default()
    }

    /// Deduplicated ingredient entity by name, if any recipe uses it.
    pub fn ingredient(&self, name: &str) -> Option<Ingredient> {
        let tables = self.tables.read();
        tables
            .ingredient_by_name
            .get(&normalize_name(name))
            .map(|&id| tables.ingredients[id.0 as usize].clone())
    }

    /// Every recipe using the named ingredient, in ingestion order.
    pub fn recipes_using(&self, ingredient_name: &str) -> Vec<Recipe> {
        let tables = self.tables.read();
        let Some(&id) = tables.ingredient_by_name.get(&normalize_name(ingredient_name)) else {
            return Vec::new();
        };
        let Some(postings) = tables.recipes_by_ingredient.get(&id) else {
            return Vec::new();
        };
        let mut ids: Vec<RecipeId> = postings.iter().copied().collect();
        ids.sort();
        ids.iter()
            .map(|&rid| tables.recipes[rid.0 as usize].clone())
            .collect()
    }

    /// Every cuisine tag any recipe carries, sorted by name.
    pub fn cuisines(&self) -> Vec<Cuisine> {
        let mut cuisines = self.tables.read().cuisines.clone();
        cuisines.sort_by(|a, b| a.name.cmp(&b.name));
        cuisines
    }

    pub fn recipe_count(&self) -> usize {
        self.tables.read().recipes.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.tables.read().ingredients.len()
    }

    /// Reconstruct the raw data of every recipe, in ingestion order.  Used
    /// by snapshotting.
    pub fn export(&self) -> Vec<RecipeData> {
        self.tables
            .read()
            .recipes
            .iter()
            .map(Recipe::to_data)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::RangeBound;

    fn recipe(url: &str, title: &str, ingredients: &[&str]) -> RecipeData {
        RecipeData {
            url: url.to_string(),
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec!["Combine".to_string(), "Serve".to_string()],
            ..RecipeData::default()
        }
    }

    fn sample_index() -> RecipeIndex {
        let taxonomy = Arc::new(TaxonomyStore::new());
        taxonomy
            .insert_path(&["ingredient", "meat", "bacon"])
            .unwrap();
        let index = RecipeIndex::new(taxonomy);
        index
            .ingest(&recipe(
                "choc_bacon",
                "Chocolate Bacon",
                &["1 slice bacon", "1 package chocolate"],
            ))
            .unwrap();
        index
            .ingest(&recipe(
                "carbonara",
                "Italian Carbonara",
                &["2 slices bacon", "1 pound spaghetti", "3 large eggs"],
            ))
            .unwrap();
        index
    }

    #[test]
    fn include_requires_all_ingredients() {
        let index = sample_index();
        let found = index.query(&Criteria {
            include_ingredients: vec!["bacon".to_string(), "chocolate".to_string()],
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "choc_bacon");

        let found = index.query(&Criteria {
            include_ingredients: vec![
                "bacon".to_string(),
                "chocolate".to_string(),
                "avocado".to_string(),
            ],
            ..Criteria::default()
        });
        assert!(found.is_empty());
    }

    #[test]
    fn exclude_removes_matching_recipes() {
        let index = sample_index();
        let found = index.query(&Criteria {
            include_ingredients: vec!["bacon".to_string()],
            exclude_ingredients: vec!["chocolate".to_string()],
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "carbonara");
    }

    #[test]
    fn query_names_are_normalized() {
        let index = sample_index();
        let found = index.query(&Criteria {
            include_ingredients: vec!["Eggs".to_string()],
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "carbonara");
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let index = sample_index();
        assert_eq!(index.query(&Criteria::default()).len(), 2);
    }

    #[test]
    fn duplicate_url_is_rejected_and_index_unchanged() {
        let index = sample_index();
        let err = index
            .ingest(&recipe("choc_bacon", "Another", &["1 cup sugar"]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRecipe(_)));
        assert_eq!(index.recipe_count(), 2);
        assert_eq!(
            index.recipe_by_url("choc_bacon").unwrap().title,
            "Chocolate Bacon"
        );
        // The rejected recipe's ingredients were not interned either.
        assert!(index.ingredient("sugar").is_none());
    }

    #[test]
    fn heading_lines_do_not_count_as_ingredients() {
        let taxonomy = Arc::new(TaxonomyStore::new());
        let index = RecipeIndex::new(taxonomy);
        index
            .ingest(&recipe(
                "pie",
                "Pie",
                &["CRUST:", "2 cups flour", "FILLING:", "3 apples"],
            ))
            .unwrap();
        let pie = index.recipe_by_url("pie").unwrap();
        assert_eq!(pie.num_ingredients, 2);
    }

    #[test]
    fn numeric_criteria_filter_on_cached_counts() {
        let index = sample_index();
        let found = index.query(&Criteria {
            num_ingredients: Some(RangeBound::Exact(3)),
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "carbonara");

        let found = index.query(&Criteria {
            num_steps: Some(RangeBound::at_least(3)),
            ..Criteria::default()
        });
        assert!(found.is_empty());
    }

    #[test]
    fn missing_time_never_matches_a_time_predicate() {
        let index = sample_index();
        let found = index.query(&Criteria {
            prep_time: Some(RangeBound::at_most(120)),
            ..Criteria::default()
        });
        assert!(found.is_empty());
    }

    #[test]
    fn cuisine_tags_from_classifier_are_queryable() {
        let index = sample_index();
        let found = index.query(&Criteria {
            include_cuisines: vec!["italian".to_string()],
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "carbonara");
        assert_eq!(found[0].cuisines, vec!["Italian"]);

        let found = index.query(&Criteria {
            exclude_cuisines: vec!["Italian".to_string()],
            ..Criteria::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "choc_bacon");
    }

    #[test]
    fn adding_terms_never_grows_the_result_set() {
        let index = sample_index();
        let mut criteria = Criteria::default();
        let mut last = index.query(&criteria).len();
        for term in ["bacon", "egg", "spaghetti"] {
            criteria.include_ingredients.push(term.to_string());
            let size = index.query(&criteria).len();
            assert!(size <= last);
            last = size;
        }

        let mut criteria = Criteria::default();
        let mut last = index.query(&criteria).len();
        for term in ["chocolate", "egg"] {
            criteria.exclude_ingredients.push(term.to_string());
            let size = index.query(&criteria).len();
            assert!(size <= last);
            last = size;
        }
    }

    #[test]
    fn ingredients_link_to_the_taxonomy() {
        let index = sample_index();
        let bacon = index.ingredient("bacon").unwrap();
        assert!(bacon.taxonomy_node.is_some());
        let chocolate = index.ingredient("chocolate").unwrap();
        assert!(chocolate.taxonomy_node.is_none());
    }

    #[test]
    fn ingredient_lines_render_back_to_text() {
        let index = sample_index();
        let id = index.recipe_by_url("choc_bacon").unwrap().id;
        let lines: Vec<String> = index
            .ingredient_lines(id)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(lines, vec!["1 slice bacon", "1 package chocolate"]);
        assert!(index.ingredient_lines(RecipeId(99)).is_empty());
    }

    #[test]
    fn reverse_lookup_by_ingredient() {
        let index = sample_index();
        let recipes = index.recipes_using("bacon");
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].url, "choc_bacon");
        assert!(index.recipes_using("durian").is_empty());
    }
}
