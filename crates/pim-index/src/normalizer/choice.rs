use pim_core::{BackendType, ProductValue, ValueData};
use serde_json::Value;

use super::{unsupported, IndexingNormalizer};
use crate::IndexError;

/// Simple selects and reference-data simple selects: the code.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionNormalizer;

impl IndexingNormalizer for OptionNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Option, BackendType::ReferenceDataOption]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError> {
        let code = match value.data() {
            ValueData::Option(option) => option.as_ref().map(|o| o.code.clone()),
            ValueData::ReferenceData(reference) => reference.as_ref().map(|r| r.code.clone()),
            _ => return Err(unsupported(value)),
        };
        Ok(code.map_or(Value::Null, Value::String))
    }
}

/// Multi selects and reference-data multi selects: the sorted codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsNormalizer;

impl IndexingNormalizer for OptionsNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Options, BackendType::ReferenceDataOptions]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError> {
        let mut codes: Vec<String> = match value.data() {
            ValueData::Options(options) => options.iter().map(|o| o.code.clone()).collect(),
            ValueData::ReferenceDataCollection(references) => {
                references.iter().map(|r| r.code.clone()).collect()
            }
            _ => return Err(unsupported(value)),
        };
        codes.sort();
        Ok(Value::from(codes))
    }
}
