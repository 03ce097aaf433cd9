use std::fmt;
use std::str::FromStr;

use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::json;

use crate::filter::{attribute_path, check_locale_and_scope};
use crate::search::SearchQueryBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Ascending),
            "DESC" => Ok(Direction::Descending),
            other => Err(PropertyError::InvalidArgument(format!(
                "Direction \"{other}\" is not supported, expected \"ASC\" or \"DESC\"."
            ))),
        }
    }
}

const SORTABLE_TYPES: &[AttributeType] = &[
    AttributeType::Identifier,
    AttributeType::Text,
    AttributeType::Textarea,
    AttributeType::Number,
    AttributeType::Boolean,
    AttributeType::Date,
    AttributeType::SimpleSelect,
    AttributeType::ReferenceDataSimpleSelect,
];

/// Sorts on single-valued attributes. Products without a value come first
/// when ascending, last when descending.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSorter;

impl AttributeSorter {
    #[must_use]
    pub fn supports_attribute(&self, attribute: &Attribute) -> bool {
        SORTABLE_TYPES.contains(&attribute.attribute_type)
    }

    /// # Errors
    ///
    /// `InvalidArgument` for an attribute type that cannot be sorted on,
    /// `InvalidProperty` for a locale or scope the attribute does not accept.
    pub fn add_attribute_sorter(
        &self,
        builder: &mut SearchQueryBuilder,
        attribute: &Attribute,
        direction: Direction,
        locale: Option<&str>,
        channel: Option<&str>,
    ) -> Result<(), PropertyError> {
        if !self.supports_attribute(attribute) {
            return Err(PropertyError::InvalidArgument(format!(
                "Sorting on attribute type \"{}\" is not supported.",
                attribute.attribute_type
            )));
        }
        check_locale_and_scope(attribute, locale, channel)?;

        let (order, missing) = match direction {
            Direction::Ascending => ("asc", "_first"),
            Direction::Descending => ("desc", "_last"),
        };
        let path = attribute_path(attribute, locale, channel);
        builder.add_sort(json!({path: {"order": order, "missing": missing}}));
        Ok(())
    }
}
