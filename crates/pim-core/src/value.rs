use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, BackendType};
use crate::collection::ValueKey;
use crate::error::PropertyError;
use crate::validator::check_value_context;

/// One price of a price collection, e.g. `12.50 EUR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Price {
    #[must_use]
    pub fn new(amount: Option<Decimal>, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub amount: Option<Decimal>,
    /// Measure unit code, e.g. `"KILOGRAM"`.
    pub unit: String,
}

/// An option of a simple/multi select attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeOption {
    pub attribute_code: String,
    pub code: String,
}

impl AttributeOption {
    #[must_use]
    pub fn new(attribute_code: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            attribute_code: attribute_code.into(),
            code: code.into(),
        }
    }

    /// Repository identifier: `<attribute_code>.<option_code>`.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.attribute_code, self.code)
    }
}

/// An entry of an externally defined reference-data catalog (e.g. a fabric).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceData {
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl ReferenceData {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: None,
        }
    }
}

/// A stored file attached to a media value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Storage key, e.g. `"a/b/c/1f2e_shirt.jpg"`.
    pub key: String,
    pub original_filename: String,
}

impl FileInfo {
    /// Builds file info from a storage key; the original filename is the last
    /// path segment.
    #[must_use]
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let original_filename = key.rsplit('/').next().unwrap_or(&key).to_string();
        Self {
            key,
            original_filename,
        }
    }

    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// Typed payload of a product value. The variant follows the attribute's
/// backend type; `None`/empty payloads are legal and mean "no data".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueData {
    Text(Option<String>),
    Number(Option<Decimal>),
    Boolean(Option<bool>),
    Date(Option<NaiveDate>),
    Metric(Option<Metric>),
    Prices(Vec<Price>),
    Option(Option<AttributeOption>),
    Options(Vec<AttributeOption>),
    Media(Option<FileInfo>),
    ReferenceData(Option<ReferenceData>),
    ReferenceDataCollection(Vec<ReferenceData>),
}

impl ValueData {
    /// The empty payload for a backend type.
    #[must_use]
    pub fn empty_for(backend_type: BackendType) -> Self {
        match backend_type {
            BackendType::Varchar | BackendType::Text => ValueData::Text(None),
            BackendType::Decimal => ValueData::Number(None),
            BackendType::Boolean => ValueData::Boolean(None),
            BackendType::Date => ValueData::Date(None),
            BackendType::Metric => ValueData::Metric(None),
            BackendType::Prices => ValueData::Prices(Vec::new()),
            BackendType::Option => ValueData::Option(None),
            BackendType::Options => ValueData::Options(Vec::new()),
            BackendType::Media => ValueData::Media(None),
            BackendType::ReferenceDataOption => ValueData::ReferenceData(None),
            BackendType::ReferenceDataOptions => ValueData::ReferenceDataCollection(Vec::new()),
        }
    }
}

/// A single attribute value of a product, for one optional channel and one
/// optional locale. `None` means the value applies regardless of that
/// dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductValue {
    attribute: Arc<Attribute>,
    scope: Option<String>,
    locale: Option<String>,
    data: ValueData,
}

impl ProductValue {
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidProperty`] when the scope/locale
    /// contradict the attribute (scope on a non-scopable attribute, locale on
    /// a non-localizable one, or a locale outside a locale-specific set).
    pub fn new(
        attribute: Arc<Attribute>,
        scope: Option<&str>,
        locale: Option<&str>,
        data: ValueData,
    ) -> Result<Self, PropertyError> {
        check_value_context(&attribute, scope, locale)
            .map_err(|e| PropertyError::from_validation(&attribute.code, e))?;

        Ok(Self {
            attribute,
            scope: scope.map(str::to_string),
            locale: locale.map(str::to_string),
            data,
        })
    }

    #[must_use]
    pub fn attribute(&self) -> &Arc<Attribute> {
        &self.attribute
    }

    #[must_use]
    pub fn attribute_code(&self) -> &str {
        &self.attribute.code
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    #[must_use]
    pub fn data(&self) -> &ValueData {
        &self.data
    }

    #[must_use]
    pub fn key(&self) -> ValueKey {
        ValueKey::new(&self.attribute.code, self.scope(), self.locale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeType;

    #[test]
    fn new_rejects_scope_on_global_attribute() {
        let sku = Arc::new(Attribute::new("sku", AttributeType::Identifier));
        let err = ProductValue::new(sku, Some("ecommerce"), None, ValueData::Text(None))
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidProperty { ref property, .. } if property == "sku"));
    }

    #[test]
    fn new_rejects_locale_outside_locale_specific_set() {
        let legal = Arc::new(
            Attribute::new("legal_notice", AttributeType::Textarea)
                .with_localizable(true)
                .with_available_locales(["fr_FR"]),
        );
        assert!(ProductValue::new(
            Arc::clone(&legal),
            None,
            Some("fr_FR"),
            ValueData::Text(Some("Mentions".to_string()))
        )
        .is_ok());
        assert!(ProductValue::new(legal, None, Some("en_US"), ValueData::Text(None)).is_err());
    }

    #[test]
    fn key_uses_attribute_scope_and_locale() {
        let name = Arc::new(
            Attribute::new("name", AttributeType::Text)
                .with_localizable(true)
                .with_scopable(true),
        );
        let value = ProductValue::new(name, Some("ecommerce"), Some("en_US"), ValueData::Text(None))
            .unwrap();
        assert_eq!(value.key(), ValueKey::new("name", Some("ecommerce"), Some("en_US")));
    }

    #[test]
    fn file_info_from_key_extracts_filename_and_extension() {
        let file = FileInfo::from_key("a/b/c/shirt_front.JPG");
        assert_eq!(file.original_filename, "shirt_front.JPG");
        assert_eq!(file.extension(), Some("JPG"));
        assert_eq!(FileInfo::from_key("README").extension(), None);
    }

    #[test]
    fn option_identifier_joins_attribute_and_code() {
        assert_eq!(AttributeOption::new("color", "red").identifier(), "color.red");
    }

    #[test]
    fn empty_payload_follows_backend_type() {
        assert_eq!(
            ValueData::empty_for(BackendType::Options),
            ValueData::Options(Vec::new())
        );
        assert_eq!(ValueData::empty_for(BackendType::Text), ValueData::Text(None));
    }
}
