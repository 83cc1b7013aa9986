//! Snapshot persistence for the knowledge base.
//!
//! A snapshot is a replayable description of the stores - taxonomy paths
//! and raw recipe data - rather than a dump of their internal tables.
//! Restoring replays the data through the normal ingestion paths, so every
//! ingestion-time invariant (normalization, classification, taxonomy
//! linking) holds for restored data too.

use atomicwrites::{AtomicFile, OverwriteBehavior::AllowOverwrite};
use cookdex_core::{Error, RecipeData, RecipeIndex, Result, TaxonomyStore};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub taxonomy_paths: Vec<Vec<String>>,
    pub recipes: Vec<RecipeData>,
}

impl Snapshot {
    /// Capture the current contents of the stores.
    #[must_use]
    pub fn capture(taxonomy: &TaxonomyStore, index: &RecipeIndex) -> Self {
        Self {
            taxonomy_paths: taxonomy.paths(),
            recipes: index.export(),
        }
    }

    /// Write the snapshot atomically: the file at `path` is either the old
    /// snapshot or the complete new one, never a partial write.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes =
            bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))?;
        let file = AtomicFile::new(path.as_ref(), AllowOverwrite);
        file.write(|f| f.write_all(&bytes))
            .map_err(|e| Error::Storage(e.to_string()))?;
        info!(path = %path.as_ref().display(), recipes = self.recipes.len(), "saved snapshot");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Replay the snapshot into the given stores.  Entries already present
    /// are skipped with a warning, so restoring into a non-empty store is
    /// safe.  Returns (taxonomy paths inserted, recipes ingested).
    pub fn restore(
        &self,
        taxonomy: &TaxonomyStore,
        index: &RecipeIndex,
    ) -> Result<(usize, usize)> {
        let mut paths = 0;
        for path in &self.taxonomy_paths {
            match taxonomy.insert_path(path) {
                Ok(()) => paths += 1,
                Err(Error::DuplicatePath(p)) => {
                    warn!(path = %p, "skipping duplicate taxonomy path");
                }
                Err(e) => return Err(e),
            }
        }
        let mut recipes = 0;
        for recipe in &self.recipes {
            match index.ingest(recipe) {
                Ok(_) => recipes += 1,
                Err(Error::DuplicateRecipe(url)) => {
                    warn!(%url, "skipping duplicate recipe");
                }
                Err(e) => return Err(e),
            }
        }
        info!(paths, recipes, "restored snapshot");
        Ok((paths, recipes))
    }
}
