//! # cookdex Core
//!
//! Core library for the cookdex recipe knowledge base.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`TaxonomyStore`] - rooted trees of ingredient/cuisine concepts
//! - [`RecipeIndex`] - recipes with filtered search over ingredients,
//!   cuisines, and numeric attributes
//! - [`classifier`] - weighted cuisine classification at ingestion time
//! - [`relax`] - taxonomy-driven query relaxation for empty results
//!
//! ## Example
//!
//! ```rust
//! use cookdex_core::{Criteria, RecipeData, RecipeIndex, TaxonomyStore};
//! use std::sync::Arc;
//!
//! let taxonomy = Arc::new(TaxonomyStore::new());
//! taxonomy.insert_path(&["ingredient", "fruit", "apple"]).unwrap();
//!
//! let index = RecipeIndex::new(taxonomy);
//! index.ingest(&RecipeData {
//!     url: "http://example.com/pie.html".to_string(),
//!     title: "Apple Pie".to_string(),
//!     ingredients: vec!["6 apples".to_string(), "2 cups flour".to_string()],
//!     ..RecipeData::default()
//! }).unwrap();
//!
//! let results = index.query(&Criteria {
//!     include_ingredients: vec!["apples".to_string()],
//!     ..Criteria::default()
//! });
//! assert_eq!(results.len(), 1);
//! ```

pub mod classifier;
pub mod criteria;
pub mod error;
pub mod index;
pub mod ingredient_line;
pub mod lexicon;
pub mod normalize;
pub mod recipe;
pub mod relax;
pub mod taxonomy;

pub use classifier::{classify, top_cuisines, Weights};
pub use criteria::{Criteria, RangeBound};
pub use error::{Error, Result};
pub use index::RecipeIndex;
pub use ingredient_line::{parse_ingredient_line, IngredientParts};
pub use recipe::{
    Cuisine, CuisineId, Ingredient, IngredientId, IngredientLine, Recipe, RecipeData, RecipeId,
};
pub use relax::{relax, Relaxation};
pub use taxonomy::{NodeId, TaxonomyNode, TaxonomyStore};
