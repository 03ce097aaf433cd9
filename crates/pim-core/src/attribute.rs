use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Catalog attribute type, as configured by the catalog administrator.
///
/// The serialized form is the type code used in catalog files and in the
/// query filters' field paths (e.g. `"pim_catalog_text"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "pim_catalog_identifier")]
    Identifier,
    #[serde(rename = "pim_catalog_text")]
    Text,
    #[serde(rename = "pim_catalog_textarea")]
    Textarea,
    #[serde(rename = "pim_catalog_number")]
    Number,
    #[serde(rename = "pim_catalog_boolean")]
    Boolean,
    #[serde(rename = "pim_catalog_date")]
    Date,
    #[serde(rename = "pim_catalog_metric")]
    Metric,
    #[serde(rename = "pim_catalog_price_collection")]
    PriceCollection,
    #[serde(rename = "pim_catalog_simpleselect")]
    SimpleSelect,
    #[serde(rename = "pim_catalog_multiselect")]
    MultiSelect,
    #[serde(rename = "pim_catalog_file")]
    File,
    #[serde(rename = "pim_catalog_image")]
    Image,
    #[serde(rename = "pim_reference_data_simpleselect")]
    ReferenceDataSimpleSelect,
    #[serde(rename = "pim_reference_data_multiselect")]
    ReferenceDataMultiSelect,
}

impl AttributeType {
    pub const ALL: [AttributeType; 14] = [
        AttributeType::Identifier,
        AttributeType::Text,
        AttributeType::Textarea,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Date,
        AttributeType::Metric,
        AttributeType::PriceCollection,
        AttributeType::SimpleSelect,
        AttributeType::MultiSelect,
        AttributeType::File,
        AttributeType::Image,
        AttributeType::ReferenceDataSimpleSelect,
        AttributeType::ReferenceDataMultiSelect,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Identifier => "pim_catalog_identifier",
            AttributeType::Text => "pim_catalog_text",
            AttributeType::Textarea => "pim_catalog_textarea",
            AttributeType::Number => "pim_catalog_number",
            AttributeType::Boolean => "pim_catalog_boolean",
            AttributeType::Date => "pim_catalog_date",
            AttributeType::Metric => "pim_catalog_metric",
            AttributeType::PriceCollection => "pim_catalog_price_collection",
            AttributeType::SimpleSelect => "pim_catalog_simpleselect",
            AttributeType::MultiSelect => "pim_catalog_multiselect",
            AttributeType::File => "pim_catalog_file",
            AttributeType::Image => "pim_catalog_image",
            AttributeType::ReferenceDataSimpleSelect => "pim_reference_data_simpleselect",
            AttributeType::ReferenceDataMultiSelect => "pim_reference_data_multiselect",
        }
    }

    /// Storage category of values for this attribute type.
    #[must_use]
    pub fn backend_type(self) -> BackendType {
        match self {
            AttributeType::Identifier | AttributeType::Text => BackendType::Varchar,
            AttributeType::Textarea => BackendType::Text,
            AttributeType::Number => BackendType::Decimal,
            AttributeType::Boolean => BackendType::Boolean,
            AttributeType::Date => BackendType::Date,
            AttributeType::Metric => BackendType::Metric,
            AttributeType::PriceCollection => BackendType::Prices,
            AttributeType::SimpleSelect => BackendType::Option,
            AttributeType::MultiSelect => BackendType::Options,
            AttributeType::File | AttributeType::Image => BackendType::Media,
            AttributeType::ReferenceDataSimpleSelect => BackendType::ReferenceDataOption,
            AttributeType::ReferenceDataMultiSelect => BackendType::ReferenceDataOptions,
        }
    }

    /// Parses a type code such as `"pim_catalog_number"`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage/representation category of an attribute's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    Varchar,
    Text,
    Decimal,
    Boolean,
    Date,
    Metric,
    Prices,
    Option,
    Options,
    Media,
    ReferenceDataOption,
    ReferenceDataOptions,
}

impl BackendType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BackendType::Varchar => "varchar",
            BackendType::Text => "text",
            BackendType::Decimal => "decimal",
            BackendType::Boolean => "boolean",
            BackendType::Date => "date",
            BackendType::Metric => "metric",
            BackendType::Prices => "prices",
            BackendType::Option => "option",
            BackendType::Options => "options",
            BackendType::Media => "media",
            BackendType::ReferenceDataOption => "reference_data_option",
            BackendType::ReferenceDataOptions => "reference_data_options",
        }
    }

    #[must_use]
    pub fn is_reference_data(self) -> bool {
        matches!(
            self,
            BackendType::ReferenceDataOption | BackendType::ReferenceDataOptions
        )
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog attribute. Immutable once the catalog is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub code: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default)]
    pub localizable: bool,
    #[serde(default)]
    pub scopable: bool,
    /// Locales the attribute is restricted to. Empty means every locale.
    #[serde(default)]
    pub available_locales: BTreeSet<String>,
    /// Name of the reference-data catalog, for reference-data types only.
    #[serde(default)]
    pub reference_data_name: Option<String>,
}

impl Attribute {
    #[must_use]
    pub fn new(code: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            code: code.into(),
            attribute_type,
            localizable: false,
            scopable: false,
            available_locales: BTreeSet::new(),
            reference_data_name: None,
        }
    }

    #[must_use]
    pub fn with_localizable(mut self, localizable: bool) -> Self {
        self.localizable = localizable;
        self
    }

    #[must_use]
    pub fn with_scopable(mut self, scopable: bool) -> Self {
        self.scopable = scopable;
        self
    }

    #[must_use]
    pub fn with_available_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_reference_data_name(mut self, name: impl Into<String>) -> Self {
        self.reference_data_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn backend_type(&self) -> BackendType {
        self.attribute_type.backend_type()
    }

    /// `true` when the attribute is only available for a subset of locales.
    #[must_use]
    pub fn is_locale_specific(&self) -> bool {
        !self.available_locales.is_empty()
    }

    #[must_use]
    pub fn has_locale_specific(&self, locale_code: &str) -> bool {
        self.available_locales.contains(locale_code)
    }

    #[must_use]
    pub fn is_backend_type_reference_data(&self) -> bool {
        self.backend_type().is_reference_data()
    }
}
