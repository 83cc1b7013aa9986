//! # cookdex
//!
//! An in-memory recipe knowledge base with taxonomy-driven query
//! relaxation.
//!
//! cookdex indexes recipes together with a concept taxonomy of their
//! ingredients.  Searches are structured criteria (ingredient and cuisine
//! inclusion/exclusion, numeric ranges); when a refined search comes back
//! empty, the taxonomy is walked sideways to suggest sibling ingredients
//! that would succeed.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookdex::prelude::*;
//! use std::sync::Arc;
//!
//! let taxonomy = Arc::new(TaxonomyStore::new());
//! taxonomy
//!     .insert_path(&["ingredient", "protein substitute", "tofu"])
//!     .unwrap();
//!
//! let index = RecipeIndex::new(taxonomy);
//! index.ingest(&RecipeData {
//!     url: "http://example.com/stir_fry.html".to_string(),
//!     title: "Tofu Stir Fry".to_string(),
//!     ingredients: vec!["1 package tofu".to_string()],
//!     ..RecipeData::default()
//! }).unwrap();
//!
//! let results = index.query(&Criteria {
//!     include_ingredients: vec!["tofu".to_string()],
//!     ..Criteria::default()
//! });
//! assert_eq!(results[0].title, "Tofu Stir Fry");
//! ```
//!
//! ## Crate Structure
//!
//! - [`cookdex-core`](https://docs.rs/cookdex-core) - taxonomy, index,
//!   classifier, relaxation
//! - [`cookdex-storage`](https://docs.rs/cookdex-storage) - snapshots and
//!   data file loaders

// Re-export core types
pub use cookdex_core::{
    classify, parse_ingredient_line, relax, top_cuisines, Criteria, Cuisine, CuisineId, Error,
    Ingredient, IngredientId, IngredientLine, IngredientParts, NodeId, RangeBound, Recipe,
    RecipeData, RecipeId, RecipeIndex, Relaxation, Result, TaxonomyNode, TaxonomyStore, Weights,
};

// Re-export storage
pub use cookdex_storage::{load_recipes_file, load_taxonomy_file, Snapshot};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        relax, Criteria, Cuisine, Error, Ingredient, IngredientLine, RangeBound, Recipe,
        RecipeData, RecipeId, RecipeIndex, Relaxation, Result, Snapshot, TaxonomyNode,
        TaxonomyStore, Weights,
    };
}
