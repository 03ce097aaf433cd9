use pim_core::{json_type_name, Attribute, AttributeType, PropertyError};
use serde_json::Value;

use super::number::comparison_clauses;
use super::value::is_numeric;
use super::{apply_attribute_filter, emptiness, AttributeFilter, Filter, FilterOptions};
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

/// Price collections. The value is `{"amount": .., "currency": ..}` and the
/// clause targets `<path>.<currency>`.
///
/// `EMPTY` / `NOT EMPTY` accept either no value (any currency) or
/// `{"currency": ..}`.
#[derive(Debug, Default)]
pub struct PriceFilter {
    builder: Option<SearchQueryBuilder>,
}

impl PriceFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for PriceFilter {
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

impl AttributeFilter for PriceFilter {
    fn attribute_types(&self) -> &'static [AttributeType] {
        &[AttributeType::PriceCollection]
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
        let property = attribute.code.as_str();
        apply_attribute_filter(
            &mut self.builder,
            OPERATORS,
            attribute,
            operator,
            locale,
            channel,
            |path| {
                if operator.is_emptiness() {
                    let path = match value {
                        Value::Null => path.to_string(),
                        _ => format!("{path}.{}", currency(property, value)?),
                    };
                    return Ok(emptiness(&path, operator).into_iter().collect());
                }

                let currency = currency(property, value)?;
                let amount = amount(property, value)?;
                comparison_clauses(property, &format!("{path}.{currency}"), operator, amount)
            },
        )
    }
}

fn currency<'a>(property: &str, value: &'a Value) -> Result<&'a str, PropertyError> {
    let Value::Object(price) = value else {
        return Err(PropertyError::array_expected(property, value));
    };

    match price.get("currency") {
        Some(Value::String(currency)) if !currency.is_empty() => Ok(currency),
        Some(other) => Err(PropertyError::valid_array_structure_expected(
            property,
            format!(
                "key \"currency\" has to be a non-empty string, \"{}\" given",
                json_type_name(other)
            ),
        )),
        None => Err(PropertyError::valid_array_structure_expected(
            property,
            "the key \"currency\" is missing",
        )),
    }
}

fn amount<'a>(property: &str, value: &'a Value) -> Result<&'a Value, PropertyError> {
    match value.get("amount") {
        Some(amount) if is_numeric(amount) => Ok(amount),
        Some(other) => Err(PropertyError::valid_array_structure_expected(
            property,
            format!(
                "key \"amount\" has to be a numeric, \"{}\" given",
                json_type_name(other)
            ),
        )),
        None => Err(PropertyError::valid_array_structure_expected(
            property,
            "the key \"amount\" is missing",
        )),
    }
}
