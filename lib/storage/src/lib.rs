//! # cookdex Storage
//!
//! Persistence layer for the cookdex recipe knowledge base: replayable
//! snapshots written atomically, plus loaders for the taxonomy and recipe
//! data files fed to the stores at startup.

pub mod loader;
pub mod snapshot;

pub use loader::{load_recipes_file, load_taxonomy_file};
pub use snapshot::Snapshot;
