use pim_core::{BackendType, ProductValue, ValueData};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use super::{unsupported, IndexingNormalizer};
use crate::IndexError;

fn decimal(amount: Option<Decimal>) -> Value {
    amount.map_or(Value::Null, |a| Value::String(a.to_string()))
}

/// `{"data": amount, "unit": unit}`; no unit conversion happens here.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricNormalizer;

impl IndexingNormalizer for MetricNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Metric]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError> {
        match value.data() {
            ValueData::Metric(None) => Ok(Value::Null),
            ValueData::Metric(Some(metric)) => Ok(json!({
                "data": decimal(metric.amount),
                "unit": metric.unit,
            })),
            _ => Err(unsupported(value)),
        }
    }
}

/// `{"<currency>": amount}` over every price of the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceNormalizer;

impl IndexingNormalizer for PriceNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Prices]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError> {
        let ValueData::Prices(prices) = value.data() else {
            return Err(unsupported(value));
        };

        let by_currency: Map<String, Value> = prices
            .iter()
            .map(|price| (price.currency.clone(), decimal(price.amount)))
            .collect();
        Ok(Value::Object(by_currency))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MediaNormalizer;

impl IndexingNormalizer for MediaNormalizer {
    fn backend_types(&self) -> &'static [BackendType] {
        &[BackendType::Media]
    }

    fn normalize_data(&self, value: &ProductValue) -> Result<Value, IndexError> {
        match value.data() {
            ValueData::Media(None) => Ok(Value::Null),
            ValueData::Media(Some(file)) => Ok(json!({
                "key": file.key,
                "original_filename": file.original_filename,
                "extension": file.extension(),
            })),
            _ => Err(unsupported(value)),
        }
    }
}
