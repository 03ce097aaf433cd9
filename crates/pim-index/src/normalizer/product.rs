use pim_core::{Product, ProductCompletenesses};
use serde_json::{json, Value};

use super::ValueCollectionNormalizer;
use crate::IndexError;

/// Builds the whole document stored for a product:
/// `identifier`, `family`, `completeness` (`{channel: {locale: ratio}}`)
/// and `values`.
#[derive(Default)]
pub struct ProductIndexNormalizer {
    values: ValueCollectionNormalizer,
}

impl ProductIndexNormalizer {
    #[must_use]
    pub fn new(values: ValueCollectionNormalizer) -> Self {
        Self { values }
    }

    /// # Errors
    ///
    /// Propagates the first [`IndexError`] raised while normalizing values.
    pub fn normalize(
        &self,
        product: &Product,
        completenesses: &ProductCompletenesses,
    ) -> Result<Value, IndexError> {
        let values = self.values.normalize(product.values())?;

        Ok(json!({
            "identifier": product.identifier,
            "family": product.family_code(),
            "completeness": completenesses.ratios(),
            "values": values,
        }))
    }
}
