use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

use pim_core::{Attribute, AttributeType, ProductValue, PropertyError, ValueData};

use crate::factory::{build, optional_string, ValueFactory};

/// Identifier, text and textarea values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextValueFactory;

impl ValueFactory for TextValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[
            AttributeType::Identifier,
            AttributeType::Text,
            AttributeType::Textarea,
        ]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let text = optional_string(attribute, data)?.map(str::to_string);
        build(attribute, channel, locale, ValueData::Text(text))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValueFactory;

impl ValueFactory for NumberValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Number]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let number = optional_decimal(attribute, data)?;
        build(attribute, channel, locale, ValueData::Number(number))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValueFactory;

impl ValueFactory for BooleanValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Boolean]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let flag = match data {
            Value::Null => None,
            Value::Bool(b) => Some(*b),
            other => return Err(PropertyError::boolean_expected(&attribute.code, other)),
        };
        build(attribute, channel, locale, ValueData::Boolean(flag))
    }
}

/// Accepts `YYYY-MM-DD` and RFC 3339 strings; only the date part is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValueFactory;

impl ValueFactory for DateValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Date]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let date = optional_string(attribute, data)?
            .map(|raw| {
                parse_date(raw).ok_or_else(|| PropertyError::date_expected(&attribute.code, raw))
            })
            .transpose()?;
        build(attribute, channel, locale, ValueData::Date(date))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// `null`, a JSON number, or a numeric string.
pub(crate) fn optional_decimal(
    attribute: &Attribute,
    data: &Value,
) -> Result<Option<Decimal>, PropertyError> {
    let raw = match data {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(PropertyError::numeric_expected(&attribute.code, other)),
    };

    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|_| PropertyError::numeric_expected(&attribute.code, data))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn attr(code: &str, attribute_type: AttributeType) -> Arc<Attribute> {
        Arc::new(Attribute::new(code, attribute_type))
    }

    #[test]
    fn text_accepts_string_and_null() {
        let name = Arc::new(Attribute::new("name", AttributeType::Text).with_localizable(true));
        let value = TextValueFactory
            .create(&name, None, Some("en_US"), &json!("Red shirt"))
            .unwrap();
        assert_eq!(value.data(), &ValueData::Text(Some("Red shirt".to_string())));
        assert_eq!(value.locale(), Some("en_US"));

        let empty = TextValueFactory.create(&name, None, None, &json!(null)).unwrap();
        assert_eq!(empty.data(), &ValueData::Text(None));
    }

    #[test]
    fn text_rejects_non_string() {
        let err = TextValueFactory
            .create(&attr("name", AttributeType::Text), None, None, &json!(["a"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property \"name\" expects a string as data, \"array\" given."
        );
    }

    #[test]
    fn text_enforces_scope_invariant() {
        let err = TextValueFactory
            .create(&attr("sku", AttributeType::Identifier), Some("ecommerce"), None, &json!("x"))
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidProperty { .. }));
    }

    #[test]
    fn number_accepts_numbers_and_numeric_strings() {
        let weight = attr("stock_count", AttributeType::Number);
        for (raw, expected) in [
            (json!(12), "12"),
            (json!(12.5), "12.5"),
            (json!("0.250"), "0.250"),
            (json!(" 7 "), "7"),
        ] {
            let value = NumberValueFactory.create(&weight, None, None, &raw).unwrap();
            assert_eq!(
                value.data(),
                &ValueData::Number(Some(Decimal::from_str(expected).unwrap())),
                "raw {raw}"
            );
        }
    }

    #[test]
    fn number_rejects_non_numeric() {
        let weight = attr("stock_count", AttributeType::Number);
        for raw in [json!("twelve"), json!(true), json!({"amount": 1})] {
            let err = NumberValueFactory.create(&weight, None, None, &raw).unwrap_err();
            assert!(
                matches!(err, PropertyError::InvalidPropertyType { .. }),
                "raw {raw}: {err}"
            );
        }
    }

    #[test]
    fn boolean_accepts_bool_only() {
        let handmade = attr("handmade", AttributeType::Boolean);
        let value = BooleanValueFactory.create(&handmade, None, None, &json!(false)).unwrap();
        assert_eq!(value.data(), &ValueData::Boolean(Some(false)));

        let err = BooleanValueFactory
            .create(&handmade, None, None, &json!("true"))
            .unwrap_err();
        assert!(err.to_string().contains("expects a boolean"));
    }

    #[test]
    fn date_accepts_plain_and_rfc3339() {
        let release = attr("release_date", AttributeType::Date);
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        for raw in [json!("2024-03-09"), json!("2024-03-09T10:00:00+01:00")] {
            let value = DateValueFactory.create(&release, None, None, &raw).unwrap();
            assert_eq!(value.data(), &ValueData::Date(Some(expected)));
        }
    }

    #[test]
    fn date_rejects_bad_format() {
        let release = attr("release_date", AttributeType::Date);
        let err = DateValueFactory
            .create(&release, None, None, &json!("09/03/2024"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property \"release_date\" expects a string with the format \"yyyy-mm-dd\" as data, \"09/03/2024\" given."
        );
    }
}
