//! Product import from the JSON exchange format.
//!
//! A file holds an array of records; each attribute maps to a list of
//! `{locale, scope, data}` entries that go through the value factories.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use pim_core::{
    AttributeOptionRepository, CachedAttributeOptionRepository, Catalog, Product,
    ReferenceDataRepositoryResolver,
};
use pim_values::ProductValueFactory;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct ProductRecord {
    pub identifier: String,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, Vec<ValueRecord>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValueRecord {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Turns records into products against one catalog.
pub(crate) struct ProductLoader {
    catalog: Arc<Catalog>,
    factory: ProductValueFactory,
}

impl ProductLoader {
    pub(crate) fn new(catalog: Arc<Catalog>) -> Self {
        let options: Arc<dyn AttributeOptionRepository> = Arc::new(
            CachedAttributeOptionRepository::new(Arc::clone(&catalog)),
        );
        let reference_data: Arc<dyn ReferenceDataRepositoryResolver> = catalog.clone();
        Self {
            factory: ProductValueFactory::with_defaults(options, reference_data),
            catalog,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// product records, or if any record fails [`Self::build`].
    pub(crate) fn load_file(&self, path: &Path) -> anyhow::Result<Vec<Product>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read products file {}", path.display()))?;
        let records: Vec<ProductRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse products file {}", path.display()))?;

        tracing::info!(count = records.len(), path = %path.display(), "loaded product records");
        records.iter().map(|record| self.build(record)).collect()
    }

    /// # Errors
    ///
    /// Returns an error for an unknown family or attribute, for data a value
    /// factory rejects, and for two entries filling the same slot.
    pub(crate) fn build(&self, record: &ProductRecord) -> anyhow::Result<Product> {
        let mut product = Product::new(&record.identifier);

        if let Some(code) = &record.family {
            let family = self.catalog.family(code).with_context(|| {
                format!("product {}: unknown family \"{code}\"", record.identifier)
            })?;
            product = product.with_family(Arc::clone(family));
        }

        for (code, entries) in &record.values {
            let attribute = self.catalog.attribute(code).with_context(|| {
                format!("product {}: unknown attribute \"{code}\"", record.identifier)
            })?;

            for entry in entries {
                let value = self
                    .factory
                    .create(
                        attribute,
                        entry.scope.as_deref(),
                        entry.locale.as_deref(),
                        &entry.data,
                    )
                    .with_context(|| format!("product {}", record.identifier))?;

                if !product.add_value(value) {
                    bail!(
                        "product {}: duplicate value for {code} (locale {:?}, scope {:?})",
                        record.identifier,
                        entry.locale,
                        entry.scope
                    );
                }
            }
        }

        Ok(product)
    }
}
