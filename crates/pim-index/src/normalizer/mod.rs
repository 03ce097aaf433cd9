//! Product values to index document fragments.
//!
//! Each normalizer handles one group of backend types and emits
//! `{"<code>-<backend_type>": {<locale_token>: {<scope_token>: data}}}`.
//! Only the [`INDEXING_FORMAT`] is supported.

mod choice;
mod product;
mod scalar;
mod structured;

use pim_core::{scope, BackendType, ProductValue, ProductValueCollection};
use serde_json::{Map, Value};

use crate::document::IndexDocument;
use crate::error::IndexError;

pub use choice::{OptionNormalizer, OptionsNormalizer};
pub use product::ProductIndexNormalizer;
pub use scalar::{BooleanNormalizer, DateNormalizer, NumberNormalizer, TextNormalizer};
pub use structured::{MediaNormalizer, MetricNormalizer, PriceNormalizer};

pub const INDEXING_FORMAT: &str = "indexing";

pub trait IndexingNormalizer: Send + Sync {
    fn backend_types(&self) -> &'static [BackendType];

    /// The data leaf for `value`, without the path around it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedValue`] when the payload does not
    /// match the backend type.
    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError>;

    fn supports(&self, value: &ProductValue, format: &str) -> bool {
        format == INDEXING_FORMAT
            && self
                .backend_types()
                .contains(&value.attribute().backend_type())
    }

    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedFormat`] for any format other than
    /// [`INDEXING_FORMAT`], or the error of
    /// [`normalize_data`](Self::normalize_data).
    fn normalize(&self, value: &ProductValue, format: &str) -> Result<Map<String, Value>, IndexError> {
        if format != INDEXING_FORMAT {
            return Err(IndexError::UnsupportedFormat(format.to_string()));
        }
        Ok(fragment(value, self.normalize_data(value)?))
    }
}

/// Wraps `data` in the value's `code-backend / locale / scope` path.
#[must_use]
pub fn fragment(value: &ProductValue, data: Value) -> Map<String, Value> {
    let attribute = value.attribute();

    let mut by_scope = Map::new();
    by_scope.insert(scope::channel_token(value.scope()).to_string(), data);

    let mut by_locale = Map::new();
    by_locale.insert(
        scope::locale_token(value.locale()).to_string(),
        Value::Object(by_scope),
    );

    let mut root = Map::new();
    root.insert(
        scope::field_key(&attribute.code, attribute.backend_type().as_str()),
        Value::Object(by_locale),
    );
    root
}

pub(crate) fn unsupported(value: &ProductValue) -> IndexError {
    IndexError::UnsupportedValue {
        attribute: value.attribute_code().to_string(),
        backend_type: value.attribute().backend_type(),
    }
}

/// Routes each value to the first registered normalizer supporting it.
pub struct ValueCollectionNormalizer {
    normalizers: Vec<Box<dyn IndexingNormalizer>>,
}

impl Default for ValueCollectionNormalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ValueCollectionNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        let mut normalizer = Self::new();
        normalizer.register(Box::new(TextNormalizer));
        normalizer.register(Box::new(NumberNormalizer));
        normalizer.register(Box::new(BooleanNormalizer));
        normalizer.register(Box::new(DateNormalizer));
        normalizer.register(Box::new(MetricNormalizer));
        normalizer.register(Box::new(PriceNormalizer));
        normalizer.register(Box::new(OptionNormalizer));
        normalizer.register(Box::new(OptionsNormalizer));
        normalizer.register(Box::new(MediaNormalizer));
        normalizer
    }

    pub fn register(&mut self, normalizer: Box<dyn IndexingNormalizer>) {
        self.normalizers.push(normalizer);
    }

    /// # Errors
    ///
    /// Returns [`IndexError::NoNormalizer`] for a value nobody supports, or
    /// the first normalization or merge error.
    pub fn normalize(&self, values: &ProductValueCollection) -> Result<IndexDocument, IndexError> {
        let mut document = IndexDocument::new();
        for value in values {
            let normalizer = self
                .normalizers
                .iter()
                .find(|n| n.supports(value, INDEXING_FORMAT))
                .ok_or_else(|| IndexError::NoNormalizer {
                    attribute: value.attribute_code().to_string(),
                    backend_type: value.attribute().backend_type(),
                })?;
            document.merge(normalizer.normalize(value, INDEXING_FORMAT)?)?;
        }
        Ok(document)
    }
}
