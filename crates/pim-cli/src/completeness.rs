//! `completeness` command: per-channel, per-locale fill ratios.

use std::path::Path;
use std::sync::Arc;

use pim_completeness::{calculate_batch, BackendChecker, CompletenessCalculator};
use pim_core::{Catalog, Product, ProductCompletenesses};
use serde_json::json;

use crate::products::ProductLoader;

/// Load a products file and compute every product's completeness, in file
/// order.
///
/// # Errors
///
/// Returns an error if the products cannot be loaded or a calculation task
/// fails.
pub(crate) async fn load_and_calculate(
    catalog: Arc<Catalog>,
    products_path: &Path,
    max_concurrent: usize,
) -> anyhow::Result<Vec<(Product, ProductCompletenesses)>> {
    let products = ProductLoader::new(catalog).load_file(products_path)?;
    let calculator = Arc::new(CompletenessCalculator::<BackendChecker>::default());
    Ok(calculate_batch(calculator, products, max_concurrent).await?)
}

/// Print completeness for every product in a file.
///
/// Products without a family have no requirements and print a single
/// placeholder row. With `incomplete_only`, complete pairs are left out.
///
/// # Errors
///
/// Returns an error if the products cannot be loaded or calculated, or the
/// JSON output cannot be serialized.
pub(crate) async fn run_completeness(
    catalog: Arc<Catalog>,
    products_path: &Path,
    max_concurrent: usize,
    incomplete_only: bool,
    as_json: bool,
) -> anyhow::Result<()> {
    let results = load_and_calculate(catalog, products_path, max_concurrent).await?;

    if as_json {
        let report = completeness_report(&results, incomplete_only);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("no products in {}", products_path.display());
        return Ok(());
    }

    let header = format!(
        "{:<22}{:<12}{:<8}{:>6}  MISSING",
        "PRODUCT", "CHANNEL", "LOCALE", "RATIO"
    );
    println!("{header}");
    for (product, completenesses) in &results {
        if completenesses.is_empty() {
            if !incomplete_only {
                println!("{:<22}(no family requirements)", product.identifier);
            }
            continue;
        }
        for completeness in completenesses.iter() {
            if incomplete_only && completeness.missing_count() == 0 {
                continue;
            }
            let missing: Vec<&str> = completeness
                .missing_attribute_codes()
                .iter()
                .map(String::as_str)
                .collect();
            println!(
                "{:<22}{:<12}{:<8}{:>5}%  {}",
                product.identifier,
                completeness.channel(),
                completeness.locale(),
                completeness.ratio(),
                missing.join(", ")
            );
        }
    }

    Ok(())
}

/// JSON form of the results: one entry per product with its pairs.
pub(crate) fn completeness_report(
    results: &[(Product, ProductCompletenesses)],
    incomplete_only: bool,
) -> serde_json::Value {
    let products: Vec<serde_json::Value> = results
        .iter()
        .map(|(product, completenesses)| {
            let pairs: Vec<serde_json::Value> = completenesses
                .iter()
                .filter(|c| !incomplete_only || c.missing_count() > 0)
                .map(|c| {
                    json!({
                        "channel": c.channel(),
                        "locale": c.locale(),
                        "required": c.required_count(),
                        "missing": c.missing_attribute_codes(),
                        "ratio": c.ratio(),
                    })
                })
                .collect();
            json!({
                "identifier": product.identifier,
                "family": product.family_code(),
                "completenesses": pairs,
            })
        })
        .collect();
    serde_json::Value::Array(products)
}
