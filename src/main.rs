use clap::Parser;
use cookdex::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// An in-memory recipe knowledge base with taxonomy-driven query relaxation
#[derive(Parser, Debug)]
#[command(name = "cookdex")]
#[command(about = "Search a recipe knowledge base", long_about = None)]
struct Args {
    /// Taxonomy data file (one root-to-leaf path per line)
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,

    /// Recipes data file (one JSON recipe per line)
    #[arg(short, long)]
    recipes: Option<PathBuf>,

    /// Snapshot file to restore before loading data files
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write a snapshot of the loaded knowledge base to this file
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// Recipes must contain this ingredient (repeatable)
    #[arg(short = 'i', long = "include-ingredient")]
    include_ingredients: Vec<String>,

    /// Recipes must not contain this ingredient (repeatable)
    #[arg(short = 'x', long = "exclude-ingredient")]
    exclude_ingredients: Vec<String>,

    /// Recipes must carry this cuisine tag (repeatable)
    #[arg(short = 'c', long = "include-cuisine")]
    include_cuisines: Vec<String>,

    /// Recipes must not carry this cuisine tag (repeatable)
    #[arg(long = "exclude-cuisine")]
    exclude_cuisines: Vec<String>,

    /// Preparation time in minutes: N, MIN-MAX, MIN-, or -MAX
    #[arg(long)]
    prep_time: Option<RangeBound>,

    /// Cooking time in minutes: N, MIN-MAX, MIN-, or -MAX
    #[arg(long)]
    cook_time: Option<RangeBound>,

    /// Total time in minutes: N, MIN-MAX, MIN-, or -MAX
    #[arg(long)]
    total_time: Option<RangeBound>,

    /// Number of steps: N, MIN-MAX, MIN-, or -MAX
    #[arg(long)]
    num_steps: Option<RangeBound>,

    /// Number of ingredients: N, MIN-MAX, MIN-, or -MAX
    #[arg(long)]
    num_ingredients: Option<RangeBound>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn criteria(&self) -> Criteria {
        Criteria {
            include_ingredients: self.include_ingredients.clone(),
            exclude_ingredients: self.exclude_ingredients.clone(),
            include_cuisines: self.include_cuisines.clone(),
            exclude_cuisines: self.exclude_cuisines.clone(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            num_steps: self.num_steps,
            num_ingredients: self.num_ingredients,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cookdex v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = Arc::new(TaxonomyStore::new());
    let index = RecipeIndex::new(taxonomy.clone());

    if let Some(path) = &args.snapshot {
        let snapshot = Snapshot::load(path)?;
        snapshot.restore(&taxonomy, &index)?;
    }
    if let Some(path) = &args.taxonomy {
        cookdex::load_taxonomy_file(path, &taxonomy)?;
    }
    if let Some(path) = &args.recipes {
        cookdex::load_recipes_file(path, &index)?;
    }
    info!(
        nodes = taxonomy.node_count(),
        recipes = index.recipe_count(),
        "knowledge base loaded"
    );

    if let Some(path) = &args.save_snapshot {
        Snapshot::capture(&taxonomy, &index).save(path)?;
    }

    let criteria = args.criteria();
    let results = index.query(&criteria);
    if !results.is_empty() {
        println!("Found {} recipes:", results.len());
        for recipe in &results {
            println!("  {}  ({})", recipe.title, recipe.url);
        }
        return Ok(());
    }

    println!("No recipes found.");
    // If the query added include ingredients, retry without the last one
    // and offer sibling concepts that would succeed.
    if !criteria.include_ingredients.is_empty() {
        let mut prev = criteria.clone();
        prev.include_ingredients.pop();
        match relax(&index, &taxonomy, &prev, &criteria) {
            Ok(Relaxation {
                parent,
                alternatives,
            }) => {
                println!("Maybe try another kind of {}:", parent);
                for name in alternatives {
                    println!("  {}", name);
                }
            }
            Err(Error::UnresolvableIngredient(_)) | Err(Error::NoAlternatives(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
