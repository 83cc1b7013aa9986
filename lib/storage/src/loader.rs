//! Loaders for the taxonomy and recipe data files consumed at startup.

use cookdex_core::{Error, RecipeData, RecipeIndex, Result, TaxonomyStore};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Load a taxonomy data file into the store.
///
/// One root-to-leaf path per line, names separated by commas or tabs;
/// `#` starts a comment and blank lines are skipped.  Duplicate paths are
/// skipped with a warning, matching re-runs over the same data file.
/// Returns the number of paths inserted.
pub fn load_taxonomy_file<P: AsRef<Path>>(path: P, store: &TaxonomyStore) -> Result<usize> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut inserted = 0;
    for line in reader.lines() {
        let line = line?;
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let names: Vec<&str> = line
            .split(|c| c == ',' || c == '\t')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        match store.insert_path(&names) {
            Ok(()) => inserted += 1,
            Err(Error::DuplicatePath(p)) => {
                warn!(path = %p, "skipping duplicate taxonomy line");
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        file = %path.as_ref().display(),
        inserted,
        nodes = store.node_count(),
        "loaded taxonomy"
    );
    Ok(inserted)
}

/// Load a recipes file into the index: one JSON object per line, in the
/// [`RecipeData`] shape.  Duplicate urls are skipped with a warning;
/// malformed JSON is an error.  Returns the number of recipes ingested.
pub fn load_recipes_file<P: AsRef<Path>>(path: P, index: &RecipeIndex) -> Result<usize> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut ingested = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let data: RecipeData =
            serde_json::from_str(&line).map_err(|e| Error::Serialization(e.to_string()))?;
        match index.ingest(&data) {
            Ok(_) => ingested += 1,
            Err(Error::DuplicateRecipe(url)) => {
                warn!(%url, "skipping duplicate recipe");
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        file = %path.as_ref().display(),
        ingested,
        "loaded recipes"
    );
    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[test]
    fn taxonomy_file_with_comments_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "# ingredient taxonomy").unwrap();
        writeln!(file, "ingredient, vegetable, root_vegetable, potato").unwrap();
        writeln!(file, "ingredient, vegetable, root_vegetable, yam").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "ingredient, vegetable, root_vegetable, yam  # dup").unwrap();
        drop(file);

        let store = TaxonomyStore::new();
        let inserted = load_taxonomy_file(&path, &store).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(store.node_count(), 5);

        let yam = store.resolve("yam").unwrap();
        let siblings: Vec<_> = store.siblings(yam.id).into_iter().map(|n| n.name).collect();
        assert_eq!(siblings, vec!["potato"]);
    }

    #[test]
    fn recipes_file_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{"url":"pbj","title":"Peanut Butter and Jelly","ingredients":["1 cup peanut butter","1 tablespoon jelly"],"steps":["Spread","Combine"]}}"#
        )
        .unwrap();
        writeln!(file, r#"{{"url":"pbj","title":"Duplicate"}}"#).unwrap();
        drop(file);

        let index = RecipeIndex::new(Arc::new(TaxonomyStore::new()));
        let ingested = load_recipes_file(&path, &index).unwrap();
        assert_eq!(ingested, 1);
        assert_eq!(index.recipe_by_url("pbj").unwrap().num_ingredients, 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.jsonl");
        std::fs::write(&path, "not json\n").unwrap();
        let index = RecipeIndex::new(Arc::new(TaxonomyStore::new()));
        assert!(matches!(
            load_recipes_file(&path, &index),
            Err(Error::Serialization(_))
        ));
    }
}
