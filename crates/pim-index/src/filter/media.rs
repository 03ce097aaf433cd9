use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::Value;

use super::string::string_clauses;
use super::{apply_attribute_filter, emptiness, AttributeFilter, Filter, FilterOptions};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::Equals,
    Operator::NotEqual,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

/// Files and images, matched on their original file name.
#[derive(Debug, Default)]
pub struct MediaFilter {
    builder: Option<SearchQueryBuilder>,
}

impl MediaFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for MediaFilter {
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

impl AttributeFilter for MediaFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::File, AttributeType::Image]
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
                let path = format!("{path}.original_filename");
                string_clauses(&attribute.code, &path, operator, value)
            },
        )
    }
}
