use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::{json, Value};

use super::value::numeric;
use super::{
    apply_attribute_filter, emptiness, exists, range, term, AttributeFilter, Clause, Filter,
    FilterOptions,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[
    Operator::LowerThan,
    Operator::LowerOrEqualThan,
    Operator::Equals,
    Operator::NotEqual,
    Operator::GreaterOrEqualThan,
    Operator::GreaterThan,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

#[derive(Debug, Default)]
pub struct NumberFilter {
    builder: Option<SearchQueryBuilder>,
}

impl NumberFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for NumberFilter {
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

impl AttributeFilter for NumberFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Number]
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
            |path| comparison_clauses(&attribute.code, path, operator, value),
        )
    }
}

/// Range / term clauses of the comparison operators; shared with the price
/// filter.
pub(crate) fn comparison_clauses(
    property: &str,
    path: &str,
    operator: Operator,
    value: &Value,
) -> Result<Vec<Clause>, PropertyError> {
    if let Some(clause) = emptiness(path, operator) {
        return Ok(vec![clause]);
    }

    let number = numeric(property, value)?;
    let clauses = match operator {
        Operator::LowerThan => vec![Clause::Filter(range(path, json!({"lt": number})))],
        Operator::LowerOrEqualThan => vec![Clause::Filter(range(path, json!({"lte": number})))],
        Operator::GreaterThan => vec![Clause::Filter(range(path, json!({"gt": number})))],
        Operator::GreaterOrEqualThan => vec![Clause::Filter(range(path, json!({"gte": number})))],
        Operator::Equals => vec![Clause::Filter(term(path, number))],
        Operator::NotEqual => vec![
            Clause::MustNot(term(path, number)),
            Clause::Filter(exists(path)),
        ],
        other => return Err(PropertyError::operator_not_supported(other.as_str())),
    };
    Ok(clauses)
}
