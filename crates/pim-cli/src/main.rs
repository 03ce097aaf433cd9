mod completeness;
mod index;
mod products;
mod search;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pim_index::FilterContext;
use tracing_subscriber::EnvFilter;

use crate::search::{FilterArg, SortArg};

#[derive(Debug, Parser)]
#[command(name = "pim")]
#[command(about = "Product catalog completeness and search tooling")]
struct Cli {
    /// Catalog file to use instead of `PIM_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show completeness per channel and locale for a products file
    Completeness {
        /// JSON file holding an array of product records
        #[arg(long)]
        products: PathBuf,
        /// Only show channel/locale pairs with missing attributes
        #[arg(long)]
        incomplete_only: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the bulk index body for a products file as NDJSON
    Index {
        /// JSON file holding an array of product records
        #[arg(long)]
        products: PathBuf,
    },
    /// Print the search request for a set of criteria
    Search {
        /// Criterion as FIELD:OPERATOR[:VALUE], e.g. name:CONTAINS:shirt
        #[arg(long = "filter")]
        filters: Vec<FilterArg>,
        /// Sort as FIELD[:ASC|DESC]
        #[arg(long = "sort")]
        sorts: Vec<SortArg>,
        /// Locale applied to localizable attributes (e.g., en_US)
        #[arg(long)]
        locale: Option<String>,
        /// Channel applied to scopable attributes (e.g., ecommerce)
        #[arg(long)]
        scope: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pim_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("pim: no command given, see --help");
        return Ok(());
    };

    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());
    let catalog = pim_core::load_catalog(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    tracing::info!(env = ?config.env, catalog = ?catalog, "catalog loaded");
    let catalog = Arc::new(catalog);

    match command {
        Commands::Completeness {
            products,
            incomplete_only,
            json,
        } => {
            completeness::run_completeness(
                catalog,
                &products,
                config.max_concurrent_products,
                incomplete_only,
                json,
            )
            .await?;
        }
        Commands::Index { products } => {
            index::run_index(
                catalog,
                &products,
                &config.index_name,
                config.max_concurrent_products,
            )
            .await?;
        }
        Commands::Search {
            filters,
            sorts,
            locale,
            scope,
        } => {
            let context = FilterContext {
                locale,
                scope,
                ..FilterContext::default()
            };
            search::run_search(catalog, &config.index_name, &filters, &sorts, &context)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
