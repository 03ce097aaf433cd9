use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::Value;

use super::value::string_array;
use super::{
    apply_attribute_filter, emptiness, exists, terms, AttributeFilter, Clause, Filter,
    FilterOptions,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[
    Operator::In,
    Operator::NotIn,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const OPTION_TYPES: &[AttributeType] = &[AttributeType::SimpleSelect, AttributeType::MultiSelect];

const REFERENCE_DATA_TYPES: &[AttributeType] = &[
    AttributeType::ReferenceDataSimpleSelect,
    AttributeType::ReferenceDataMultiSelect,
];

/// Filters on option codes. One instance serves attribute options, another
/// reference data; both index codes the same way.
#[derive(Debug)]
pub struct OptionFilter {
    attribute_types: &'static [AttributeType],
    builder: Option<SearchQueryBuilder>,
}

impl Default for OptionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionFilter {
    /// Simple and multi selects.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attribute_types: OPTION_TYPES,
            builder: None,
        }
    }

    /// Reference-data simple and multi selects.
    #[must_use]
    pub fn reference_data() -> Self {
        Self {
            attribute_types: REFERENCE_DATA_TYPES,
            builder: None,
        }
    }
}

impl Filter for OptionFilter {
    fn operators(&self) -> &'static [Operator] {
        OPERATORS
    }

    fn set_query_builder(&mut self, builder: SearchQueryBuilder) {
        self.builder = Some(builder);
    }

    fn take_query_builder(&mut self) -> Option<SearchQueryBuilder> {
        self.builder.take()
    }
}

impl AttributeFilter for OptionFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        self.attribute_types
    }

    fn add_attribute_filter(
        &mut self,
        attribute: &Attribute,
        operator: Operator,
        value: &Value,
        locale: Option<&str>,
        channel: Option<&str>,
        _options: &FilterOptions,
    ) -> Result<(), PropertyError> {
        apply_attribute_filter(
            &mut self.builder,
            OPERATORS,
            attribute,
            operator,
            locale,
            channel,
            |path| {
                if let Some(clause) = emptiness(path, operator) {
                    return Ok(vec![clause]);
                }

                let codes = string_array(&attribute.code, value)?;
                match operator {
                    Operator::In => Ok(vec![Clause::Filter(terms(path, codes))]),
                    Operator::NotIn => Ok(vec![
                        Clause::MustNot(terms(path, codes)),
                        Clause::Filter(exists(path)),
                    ]),
                    other => Err(PropertyError::operator_not_supported(other.as_str())),
                }
            },
        )
    }
}
