use pim_core::{Attribute, AttributeType, PropertyError};
use serde_json::Value;

use super::value::boolean;
use super::{
    apply_attribute_filter, exists, term, AttributeFilter, Clause, Filter, FilterOptions,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

const OPERATORS: &[Operator] = &[Operator::Equals, Operator::NotEqual];

#[derive(Debug, Default)]
pub struct BooleanFilter {
    builder: Option<SearchQueryBuilder>,
}

impl BooleanFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for BooleanFilter {
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

impl AttributeFilter for BooleanFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::Boolean]
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
                let flag = boolean(&attribute.code, value)?;
                Ok(match operator {
                    Operator::NotEqual => vec![
                        Clause::MustNot(term(path, flag)),
                        Clause::Filter(exists(path)),
                    ],
                    _ => vec![Clause::Filter(term(path, flag))],
                })
            },
        )
    }
}
