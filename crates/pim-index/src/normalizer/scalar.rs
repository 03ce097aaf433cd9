use pim_core::{BackendType, ProductValue, ValueData};
use serde_json::Value;

use super::{unsupported, IndexingNormalizer};

/// Strings are indexed as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl IndexingNormalizer for TextNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Varchar, BackendType::Text]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, crate::IndexError> {
        match value.data() {
            ValueData::Text(text) => Ok(text.clone().map_or(Value::Null, Value::String)),
            _ => Err(unsupported(value)),
        }
    }
}

/// Decimals keep their scale: `12.50` is indexed as `"12.50"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberNormalizer;

impl IndexingNormalizer for NumberNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Decimal]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, crate::IndexError> {
        match value.data() {
            ValueData::Number(number) => {
                Ok(number.map_or(Value::Null, |n| Value::String(n.to_string())))
            }
            _ => Err(unsupported(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanNormalizer;

impl IndexingNormalizer for BooleanNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Boolean]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, crate::IndexError> {
        match value.data() {
            ValueData::Boolean(flag) => Ok(flag.map_or(Value::Null, Value::Bool)),
            _ => Err(unsupported(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer;

impl IndexingNormalizer for DateNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Date]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, crate::IndexError> {
        match value.data() {
            ValueData::Date(date) => Ok(date.map_or(Value::Null, |d| {
                Value::String(d.format("%Y-%m-%d").to_string())
            })),
            _ => Err(unsupported(value)),
        }
    }
}
