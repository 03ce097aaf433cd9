//! Value shape checks shared by the filters.

use std::str::FromStr;

use chrono::NaiveDate;
use pim_core::{json_type_name, PropertyError};
use rust_decimal::Decimal;
use serde_json::Value;

pub(crate) fn string<'a>(property: &str, value: &'a Value) -> Result<&'a str, PropertyError> {
    value
        .as_str()
        .ok_or_else(|| PropertyError::string_expected(property, value))
}

pub(crate) fn string_array<'a>(
    property: &str,
    value: &'a Value,
) -> Result<Vec<&'a str>, PropertyError> {
    let Value::Array(items) = value else {
        return Err(PropertyError::array_expected(property, value));
    };

    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                PropertyError::valid_array_structure_expected(
                    property,
                    format!("one of the values is not a string, \"{}\" given", json_type_name(item)),
                )
            })
        })
        .collect()
}

pub(crate) fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            Decimal::from_str(s.trim()).is_ok() || Decimal::from_scientific(s.trim()).is_ok()
        }
        _ => false,
    }
}

/// A JSON number or numeric string, passed through unchanged.
pub(crate) fn numeric(property: &str, value: &Value) -> Result<Value, PropertyError> {
    if is_numeric(value) {
        Ok(value.clone())
    } else {
        Err(PropertyError::numeric_expected(property, value))
    }
}

pub(crate) fn boolean(property: &str, value: &Value) -> Result<bool, PropertyError> {
    value
        .as_bool()
        .ok_or_else(|| PropertyError::boolean_expected(property, value))
}

/// A `yyyy-mm-dd` string, normalized.
pub(crate) fn date(property: &str, value: &Value) -> Result<String, PropertyError> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        other => return Err(PropertyError::date_expected(property, json_type_name(other))),
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| PropertyError::date_expected(property, raw))
}

/// Exactly two dates, for `BETWEEN` / `NOT BETWEEN`.
pub(crate) fn date_pair(property: &str, value: &Value) -> Result<(String, String), PropertyError> {
    let Value::Array(items) = value else {
        return Err(PropertyError::array_expected(property, value));
    };

    match items.as_slice() {
        [from, to] => Ok((date(property, from)?, date(property, to)?)),
        _ => Err(PropertyError::valid_array_structure_expected(
            property,
            "should contain 2 strings with the format \"yyyy-mm-dd\"",
        )),
    }
}
