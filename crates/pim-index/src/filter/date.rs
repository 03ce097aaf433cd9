use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::{json, Value};

use super::value::{date, date_pair};
use super::{
    apply_attribute_filter, emptiness, exists, range, term, AttributeFilter, Clause, Filter,
    FilterOptions,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[
    Operator::LowerThan,
    Operator::Equals,
    Operator::NotEqual,
    Operator::GreaterThan,
    Operator::Between,
    Operator::NotBetween,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

/// Dates as `yyyy-mm-dd` strings; `BETWEEN` bounds are inclusive.
#[derive(Debug, Default)]
pub struct DateFilter {
    builder: Option<SearchQueryBuilder>,
}

impl DateFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for DateFilter {
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

impl AttributeFilter for DateFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Date]
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
            |path| date_clauses(&attribute.code, path, operator, value),
        )
    }
}

fn date_clauses(
    property: &str,
    path: &str,
    operator: Operator,
    value: &Value,
) -> Result<Vec<Clause>, PropertyError> {
    if let Some(clause) = emptiness(path, operator) {
        return Ok(vec![clause]);
    }

    let clauses = match operator {
        Operator::Between => {
            let (from, to) = date_pair(property, value)?;
            vec![Clause::Filter(range(path, json!({"gte": from, "lte": to})))]
        }
        Operator::NotBetween => {
            let (from, to) = date_pair(property, value)?;
            vec![
                Clause::MustNot(range(path, json!({"gte": from, "lte": to}))),
                Clause::Filter(exists(path)),
            ]
        }
        Operator::LowerThan => vec![Clause::Filter(range(path, json!({"lt": date(property, value)?})))],
        Operator::GreaterThan => vec![Clause::Filter(range(path, json!({"gt": date(property, value)?})))],
        Operator::Equals => vec![Clause::Filter(term(path, date(property, value)?))],
        Operator::NotEqual => vec![
            Clause::MustNot(term(path, date(property, value)?)),
            Clause::Filter(exists(path)),
        ],
        other => return Err(PropertyError::operator_not_supported(other.as_str())),
    };
    Ok(clauses)
}
