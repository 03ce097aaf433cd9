//! `index` command: product documents in bulk-request form.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pim_core::{Catalog, Product, ProductCompletenesses};
use pim_index::ProductIndexNormalizer;
use serde_json::{json, Value};

use crate::completeness::load_and_calculate;

/// Action and source line pairs for a bulk index request, one pair per
/// product.
///
/// # Errors
///
/// Returns an error if a product's values cannot be normalized.
pub(crate) fn bulk_lines(
    index_name: &str,
    results: &[(Product, ProductCompletenesses)],
) -> anyhow::Result<Vec<Value>> {
    let normalizer = ProductIndexNormalizer::default();
    let mut lines = Vec::with_capacity(results.len() * 2);

    for (product, completenesses) in results {
        let document = normalizer
            .normalize(product, completenesses)
            .with_context(|| format!("product {}", product.identifier))?;
        lines.push(json!({"index": {"_index": index_name, "_id": product.identifier}}));
        lines.push(document);
    }

    Ok(lines)
}

/// Print the bulk body for every product in a file, as newline-delimited
/// JSON.
///
/// # Errors
///
/// Returns an error if the products cannot be loaded, calculated or
/// normalized.
pub(crate) async fn run_index(
    catalog: Arc<Catalog>,
    products_path: &Path,
    index_name: &str,
    max_concurrent: usize,
) -> anyhow::Result<()> {
    let results = load_and_calculate(catalog, products_path, max_concurrent).await?;
    let lines = bulk_lines(index_name, &results)?;

    for line in &lines {
        println!("{}", serde_json::to_string(line)?);
    }
    tracing::info!(documents = results.len(), index = index_name, "index body written");

    Ok(())
}
