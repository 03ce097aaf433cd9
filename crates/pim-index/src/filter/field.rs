use pim_core::PropertyError;
use serde_json::Value;

use super::string::string_clauses;
use super::value::string_array;
use super::{apply_field_filter, emptiness, terms, Clause, FieldFilter, Filter, FilterOptions};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const IDENTIFIER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEqual,
    Operator::StartsWith,
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::In,
    Operator::NotIn,
];

const FAMILY_OPERATORS: &[Operator] = &[
    Operator::In,
    Operator::NotIn,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

/// The product identifier, indexed at the top-level `identifier` field.
#[derive(Debug, Default)]
pub struct IdentifierFilter {
    builder: Option<SearchQueryBuilder>,
}

impl IdentifierFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for IdentifierFilter {
    fn operators(&self) -> &'static [Operator] {
        IDENTIFIER_OPERATORS
    }

    fn set_query_builder(&mut self, builder: SearchQueryBuilder) {
        self.builder = Some(builder);
    }

    fn take_query_builder(&mut self) -> Option<SearchQueryBuilder> {
        self.builder.take()
    }
}

impl FieldFilter for IdentifierFilter {
    fn fields(&self) -> &'static [&'static str] {
        &["identifier"]
    }

    fn add_field_filter(
        &mut self,
        field: &str,
        operator: Operator,
        value: &Value,
        _locale: Option<&str>,
        _channel: Option<&str>,
        _options: &FilterOptions,
    ) -> Result<(), PropertyError> {
        apply_field_filter(&mut self.builder, IDENTIFIER_OPERATORS, operator, || {
            string_clauses(field, "identifier", operator, value)
        })
    }
}

/// Family codes, indexed at the top-level `family` field.
#[derive(Debug, Default)]
pub struct FamilyFilter {
    builder: Option<SearchQueryBuilder>,
}

impl FamilyFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for FamilyFilter {
    fn operators(&self) -> &'static [Operator] {
        FAMILY_OPERATORS
    }

    fn set_query_builder(&mut self, builder: SearchQueryBuilder) {
        self.builder = Some(builder);
    }

    fn take_query_builder(&mut self) -> Option<SearchQueryBuilder> {
        self.builder.take()
    }
}

impl FieldFilter for FamilyFilter {
    fn fields(&self) -> &'static [&'static str] {
        &["family"]
    }

    fn add_field_filter(
        &mut self,
        field: &str,
        operator: Operator,
        value: &Value,
        _locale: Option<&str>,
        _channel: Option<&str>,
        _options: &FilterOptions,
    ) -> Result<(), PropertyError> {
        apply_field_filter(&mut self.builder, FAMILY_OPERATORS, operator, || {
            if let Some(clause) = emptiness("family", operator) {
                return Ok(vec![clause]);
            }

            let codes = string_array(field, value)?;
            match operator {
                Operator::In => Ok(vec![Clause::Filter(terms("family", codes))]),
                Operator::NotIn => Ok(vec![Clause::MustNot(terms("family", codes))]),
                other => Err(PropertyError::operator_not_supported(other.as_str())),
            }
        })
    }
}
