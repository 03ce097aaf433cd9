//! Completeness for many products at once.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pim_core::{Product, ProductCompletenesses};

use crate::calculator::CompletenessCalculator;
use crate::checker::ValueCompleteChecker;
use crate::error::CompletenessError;

/// Calculates every product's completeness on the blocking pool, with at most
/// `max_concurrent` calculations in flight (values below 1 are raised to 1).
///
/// Results come back in input order, each paired with its product.
///
/// # Errors
///
/// Returns [`CompletenessError::Task`] when a calculation task panics.
pub async fn calculate_batch<C>(
    calculator: Arc<CompletenessCalculator<C>>,
    products: Vec<Product>,
    max_concurrent: usize,
) -> Result<Vec<(Product, ProductCompletenesses)>, CompletenessError>
where
    C: ValueCompleteChecker + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let total = products.len();
    tracing::debug!(total, max_concurrent, "calculating completeness");

    let results: Vec<(usize, Result<(Product, ProductCompletenesses), CompletenessError>)> =
        stream::iter(products.into_iter().enumerate())
            .map(|(index, product)| {
                let calculator = Arc::clone(&calculator);
                let identifier = product.identifier.clone();
                async move {
                    let outcome = tokio::task::spawn_blocking(move || {
                        let completenesses = calculator.calculate(&product);
                        (product, completenesses)
                    })
                    .await
                    .map_err(|source| CompletenessError::Task { identifier, source });
                    (index, outcome)
                }
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    let mut ordered: Vec<Option<(Product, ProductCompletenesses)>> =
        (0..total).map(|_| None).collect();
    for (index, outcome) in results {
        ordered[index] = Some(outcome?);
    }

    let done: Vec<(Product, ProductCompletenesses)> = ordered.into_iter().flatten().collect();
    let incomplete = done
        .iter()
        .filter(|(_, completenesses)| completenesses.incomplete().next().is_some())
        .count();
    tracing::info!(total, incomplete, "completeness calculated");

    Ok(done)
}
