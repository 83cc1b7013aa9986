//! Query relaxation: when a refined search comes back empty, walk the
//! taxonomy sideways to find a sibling ingredient that would succeed.

use crate::criteria::Criteria;
use crate::error::{Error, Result};
use crate::index::RecipeIndex;
use crate::normalize::normalize_name;
use crate::taxonomy::TaxonomyStore;
use tracing::{debug, info};

/// A suggested relaxation of a failed query: sibling ingredients that
/// restore a non-empty result, plus their common parent concept for
/// phrasing ("did you mean another kind of `parent`?").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relaxation {
    pub parent: String,
    pub alternatives: Vec<String>,
}

/// Relax a failed query.
///
/// `prev` is the last query that returned results; `failed` must add
/// exactly one `include_ingredients` term on top of it and have returned
/// zero recipes.  The new term is resolved to its taxonomy concept, and
/// each sibling concept is probed against the index with the prior query;
/// siblings whose substituted query is non-empty are returned in taxonomy
/// order.
///
/// Errors with [`Error::UnresolvableIngredient`] when the delta is not a
/// single term or the term has no taxonomy node, and with
/// [`Error::NoAlternatives`] when no sibling substitution succeeds.  Both
/// are recoverable: the caller falls back to a generic "no results"
/// message.
pub fn relax(
    index: &RecipeIndex,
    taxonomy: &TaxonomyStore,
    prev: &Criteria,
    failed: &Criteria,
) -> Result<Relaxation> {
    let prior_terms: Vec<String> = prev
        .include_ingredients
        .iter()
        .map(|n| normalize_name(n))
        .collect();
    let new_terms: Vec<String> = failed
        .include_ingredients
        .iter()
        .map(|n| normalize_name(n))
        .filter(|n| !prior_terms.contains(n))
        .collect();
    let [ingredient] = new_terms.as_slice() else {
        return Err(Error::UnresolvableIngredient(new_terms.join(", ")));
    };

    let Some(node) = taxonomy.resolve(ingredient) else {
        debug!(%ingredient, "no taxonomy node; relaxation not possible");
        return Err(Error::UnresolvableIngredient(ingredient.clone()));
    };
    let siblings = taxonomy.siblings(node.id);
    debug!(
        %ingredient,
        candidates = ?siblings.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        "probing sibling concepts"
    );

    let alternatives: Vec<String> = siblings
        .into_iter()
        .filter(|sibling| {
            let mut probe = prev.clone();
            probe.include_ingredients.push(sibling.name.clone());
            !index.query(&probe).is_empty()
        })
        .map(|sibling| sibling.name)
        .collect();
    if alternatives.is_empty() {
        return Err(Error::NoAlternatives(ingredient.clone()));
    }

    let parent = node
        .supertype
        .and_then(|pid| taxonomy.node(pid))
        .map(|n| n.name)
        .unwrap_or_default();
    info!(%ingredient, %parent, ?alternatives, "found searchable alternatives");
    Ok(Relaxation {
        parent,
        alternatives,
    })
}
