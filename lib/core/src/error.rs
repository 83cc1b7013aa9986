use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Taxonomy path already exists: {0}")]
    DuplicatePath(String),

    #[error("Recipe with url {0} already exists")]
    DuplicateRecipe(String),

    #[error("Invalid range {0}; valid ranges are exact values or (min, max) pairs")]
    InvalidRange(String),

    #[error("No taxonomy entry for ingredient: {0}")]
    UnresolvableIngredient(String),

    #[error("No searchable alternative for ingredient: {0}")]
    NoAlternatives(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
