use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::Value;

use super::value::{string, string_array};
use super::{
    apply_attribute_filter, emptiness, escape_query_string, query_string, term, terms,
    AttributeFilter, Clause, Filter, FilterOptions,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::DoesNotContain,
    Operator::Equals,
    Operator::NotEqual,
    Operator::In,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

/// Text and textarea attributes.
#[derive(Debug, Default)]
pub struct StringFilter {
    builder: Option<SearchQueryBuilder>,
}

impl StringFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for StringFilter {
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

impl AttributeFilter for StringFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Text, AttributeType::Textarea]
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
            |path| string_clauses(&attribute.code, path, operator, value),
        )
    }
}

/// Clauses of the string operators on `path`; shared with the media and
/// identifier filters.
pub(crate) fn string_clauses(
    property: &str,
    path: &str,
    operator: Operator,
    value: &Value,
) -> Result<Vec<Clause>, PropertyError> {
    if let Some(clause) = emptiness(path, operator) {
        return Ok(vec![clause]);
    }

    let clause = match operator {
        Operator::In => Clause::Filter(terms(path, string_array(property, value)?)),
        Operator::NotIn => Clause::MustNot(terms(path, string_array(property, value)?)),
        _ => {
            let text = string(property, value)?;
            let escaped = escape_query_string(text);
            match operator {
                Operator::Equals => Clause::Filter(term(path, text)),
                Operator::NotEqual => Clause::MustNot(term(path, text)),
                Operator::Contains => Clause::Filter(query_string(path, format!("*{escaped}*"))),
                Operator::DoesNotContain => {
                    Clause::MustNot(query_string(path, format!("*{escaped}*")))
                }
                Operator::StartsWith => Clause::Filter(query_string(path, format!("{escaped}*"))),
                Operator::EndsWith => Clause::Filter(query_string(path, format!("*{escaped}"))),
                other => return Err(PropertyError::operator_not_supported(other.as_str())),
            }
        }
    };
    Ok(vec![clause])
}

#[cfg(test)]
#[path = "string_test.rs"]
mod tests;
