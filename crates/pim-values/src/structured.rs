use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use pim_core::{
    json_type_name, Attribute, AttributeType, FileInfo, Metric, Price, ProductValue, PropertyError,
    ValueData,
};

use crate::factory::{build, optional_string, ValueFactory};
use crate::scalar::optional_decimal;

/// `{"amount": number|string|null, "unit": string}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricValueFactory;

impl ValueFactory for MetricValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Metric]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let metric = match data {
            Value::Null => None,
            Value::Object(fields) => Some(metric_from_object(attribute, fields)?),
            other => return Err(PropertyError::array_expected(&attribute.code, other)),
        };
        build(attribute, channel, locale, ValueData::Metric(metric))
    }
}

fn metric_from_object(attribute: &Attribute, fields: &Map<String, Value>) -> Result<Metric, PropertyError> {
    let amount = required_key(attribute, fields, "amount")?;
    let unit = match required_key(attribute, fields, "unit")? {
        Value::String(unit) => unit.clone(),
        other => {
            return Err(PropertyError::valid_array_structure_expected(
                &attribute.code,
                format!("key \"unit\" has to be a string, \"{}\" given", json_type_name(other)),
            ))
        }
    };

    Ok(Metric {
        amount: optional_decimal(attribute, amount)?,
        unit,
    })
}

/// `[{"amount": .., "currency": ".."}, ...]`. Prices are stored sorted by
/// currency; a currency may appear only once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCollectionValueFactory;

impl ValueFactory for PriceCollectionValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::PriceCollection]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let entries = match data {
            Value::Null => &[][..],
            Value::Array(entries) => entries.as_slice(),
            other => return Err(PropertyError::array_expected(&attribute.code, other)),
        };

        let mut by_currency = BTreeMap::new();
        for entry in entries {
            let price = price_from_entry(attribute, entry)?;
            if by_currency.contains_key(&price.currency) {
                return Err(PropertyError::valid_array_structure_expected(
                    &attribute.code,
                    format!("currency \"{}\" is given more than once", price.currency),
                ));
            }
            by_currency.insert(price.currency.clone(), price);
        }

        let prices = by_currency.into_values().collect();
        build(attribute, channel, locale, ValueData::Prices(prices))
    }
}

fn price_from_entry(attribute: &Attribute, entry: &Value) -> Result<Price, PropertyError> {
    let Value::Object(fields) = entry else {
        return Err(PropertyError::valid_array_structure_expected(
            &attribute.code,
            format!("one of the prices is not an array, \"{}\" given", json_type_name(entry)),
        ));
    };

    let amount = required_key(attribute, fields, "amount")?;
    let currency = match required_key(attribute, fields, "currency")? {
        Value::String(currency) if !currency.is_empty() => currency.clone(),
        other => {
            return Err(PropertyError::valid_array_structure_expected(
                &attribute.code,
                format!(
                    "key \"currency\" has to be a non-empty string, \"{}\" given",
                    json_type_name(other)
                ),
            ))
        }
    };

    Ok(Price::new(optional_decimal(attribute, amount)?, currency))
}

/// File and image values, given as a storage key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaValueFactory;

impl ValueFactory for MediaValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::File, AttributeType::Image]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let file = optional_string(attribute, data)?
            .filter(|key| !key.is_empty())
            .map(FileInfo::from_key);
        build(attribute, channel, locale, ValueData::Media(file))
    }
}

fn required_key<'a>(
    attribute: &Attribute,
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value, PropertyError> {
    fields.get(key).ok_or_else(|| {
        PropertyError::valid_array_structure_expected(
            &attribute.code,
            format!("the key \"{key}\" is missing"),
        )
    })
}
