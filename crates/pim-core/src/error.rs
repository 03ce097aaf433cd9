use serde_json::Value;
use thiserror::Error;

use crate::validator::AttributeValidationError;

/// Errors raised by value factories and query filters.
///
/// These describe caller misuse or bad input and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The data has the wrong shape or primitive type for the property.
    #[error("Property \"{property}\" {reason}.")]
    InvalidPropertyType { property: String, reason: String },

    /// The locale/scope addressing is invalid for the attribute.
    #[error("{source}")]
    InvalidProperty {
        property: String,
        #[source]
        source: AttributeValidationError,
    },

    #[error(
        "Property \"{property}\" expects a valid option code. The options do not exist, \"{}\" given.",
        .codes.join(",")
    )]
    InvalidOption { property: String, codes: Vec<String> },

    #[error(
        "Property \"{property}\" expects a valid reference data code. The reference data \"{reference_data_name}\" do not exist, \"{}\" given.",
        .codes.join(",")
    )]
    InvalidReferenceData {
        property: String,
        reference_data_name: String,
        codes: Vec<String>,
    },

    /// A precondition of the component was not met.
    #[error("{0}")]
    Logic(String),

    /// Unsupported operator, field, or attribute type.
    #[error("{0}")]
    InvalidArgument(String),
}

impl PropertyError {
    #[must_use]
    pub fn type_expected(property: &str, expected: &str, given: &Value) -> Self {
        Self::InvalidPropertyType {
            property: property.to_string(),
            reason: format!(
                "expects {expected} as data, \"{}\" given",
                json_type_name(given)
            ),
        }
    }

    #[must_use]
    pub fn string_expected(property: &str, given: &Value) -> Self {
        Self::type_expected(property, "a string", given)
    }

    #[must_use]
    pub fn array_expected(property: &str, given: &Value) -> Self {
        Self::type_expected(property, "an array", given)
    }

    #[must_use]
    pub fn numeric_expected(property: &str, given: &Value) -> Self {
        Self::type_expected(property, "a numeric", given)
    }

    #[must_use]
    pub fn boolean_expected(property: &str, given: &Value) -> Self {
        Self::type_expected(property, "a boolean", given)
    }

    #[must_use]
    pub fn valid_array_structure_expected(property: &str, detail: impl AsRef<str>) -> Self {
        Self::InvalidPropertyType {
            property: property.to_string(),
            reason: format!("expects an array with valid data, {}", detail.as_ref()),
        }
    }

    #[must_use]
    pub fn date_expected(property: &str, given: &str) -> Self {
        Self::InvalidPropertyType {
            property: property.to_string(),
            reason: format!("expects a string with the format \"yyyy-mm-dd\" as data, \"{given}\" given"),
        }
    }

    #[must_use]
    pub fn from_validation(property: &str, source: AttributeValidationError) -> Self {
        Self::InvalidProperty {
            property: property.to_string(),
            source,
        }
    }

    #[must_use]
    pub fn operator_not_supported(operator: &str) -> Self {
        Self::InvalidArgument(format!(
            "This filter does not support operator \"{operator}\"."
        ))
    }

    #[must_use]
    pub fn query_builder_not_initialized() -> Self {
        Self::Logic("The search query builder is not initialized in the filter.".to_string())
    }

    /// Code of the property the error is about, when it names one.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::InvalidPropertyType { property, .. }
            | Self::InvalidProperty { property, .. }
            | Self::InvalidOption { property, .. }
            | Self::InvalidReferenceData { property, .. } => Some(property),
            Self::Logic(_) | Self::InvalidArgument(_) => None,
        }
    }
}

/// Name of a JSON value's runtime type, as reported in error messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
