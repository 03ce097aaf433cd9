//! Query filters: `(attribute or field, operator, value)` to engine clauses.
//!
//! A filter works on the [`SearchQueryBuilder`] attached to it and checks,
//! in this order, that a builder is attached, that the locale and scope fit
//! the attribute, that the operator is supported and that the value has the
//! type the operator needs. Nothing is added to the builder unless every
//! check passes.

mod boolean;
mod date;
mod field;
mod media;
mod number;
mod option;
mod price;
mod string;
mod value;

use pim_core::validator::{validate_locale, validate_scope};
use pim_core::{scope, Attribute, AttributeType, PropertyError};
use serde_json::{json, Map, Value};

use crate::operator::Operator;
use crate::search::SearchQueryBuilder;

pub use boolean::BooleanFilter;
pub use date::DateFilter;
pub use field::{FamilyFilter, IdentifierFilter};
pub use media::MediaFilter;
pub use number::NumberFilter;
pub use option::OptionFilter;
pub use price::PriceFilter;
pub use string::StringFilter;

/// Free-form options passed along with a filter; none of the built-in
/// filters read them.
pub type FilterOptions = Map<String, Value>;

pub trait Filter: Send + Sync {
    fn operators(&self) -> &'static [Operator];

    fn supports_operator(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    fn set_query_builder(&mut self, builder: SearchQueryBuilder);

    fn take_query_builder(&mut self) -> Option<SearchQueryBuilder>;
}

pub trait AttributeFilter: Filter {
    fn attribute_types(&self) -> &'static [AttributeType];

    fn supports_attribute(&self, attribute: &Attribute) -> bool {
        self.attribute_types().contains(&attribute.attribute_type)
    }

    /// # Errors
    ///
    /// `Logic` without an attached builder, `InvalidProperty` for a locale
    /// or scope the attribute does not accept, `InvalidArgument` for an
    /// unsupported operator and `InvalidPropertyType` for a value of the
    /// wrong type.
    fn add_attribute_filter(
        &mut self,
        attribute: &Attribute,
        operator: Operator,
        value: &Value,
        locale: Option<&str>,
        channel: Option<&str>,
        options: &FilterOptions,
    ) -> Result<(), PropertyError>;
}

pub trait FieldFilter: Filter {
    fn fields(&self) -> &'static [&'static str];

    fn supports_field(&self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// # Errors
    ///
    /// Same as [`AttributeFilter::add_attribute_filter`], minus the locale
    /// and scope checks.
    fn add_field_filter(
        &mut self,
        field: &str,
        operator: Operator,
        value: &Value,
        locale: Option<&str>,
        channel: Option<&str>,
        options: &FilterOptions,
    ) -> Result<(), PropertyError>;
}

/// One clause and the bool section it goes to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Clause {
    Filter(Value),
    MustNot(Value),
}

impl Clause {
    fn add_to(self, builder: &mut SearchQueryBuilder) {
        match self {
            Clause::Filter(body) => builder.add_filter(body),
            Clause::MustNot(body) => builder.add_must_not(body),
        };
    }
}

pub(crate) fn term(path: &str, value: impl Into<Value>) -> Value {
    json!({"term": {path: value.into()}})
}

pub(crate) fn terms(path: &str, values: impl Into<Value>) -> Value {
    json!({"terms": {path: values.into()}})
}

pub(crate) fn exists(path: &str) -> Value {
    json!({"exists": {"field": path}})
}

pub(crate) fn range(path: &str, bounds: Value) -> Value {
    json!({"range": {path: bounds}})
}

pub(crate) fn query_string(path: &str, query: String) -> Value {
    json!({"query_string": {"default_field": path, "query": query}})
}

/// `EMPTY` / `NOT EMPTY` on `path`, or `None` for any other operator.
pub(crate) fn emptiness(path: &str, operator: Operator) -> Option<Clause> {
    match operator {
        Operator::IsEmpty => Some(Clause::MustNot(exists(path))),
        Operator::IsNotEmpty => Some(Clause::Filter(exists(path))),
        _ => None,
    }
}

/// Characters with a meaning in the engine's query-string syntax.
const QUERY_STRING_RESERVED: &[char] = &[
    '-', '+', '=', '|', '!', ' ', '&', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '<',
    '>', '?', ':', '/', '\\',
];

/// Backslash-escapes reserved characters so `value` is matched literally.
#[must_use]
pub fn escape_query_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if QUERY_STRING_RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Index path of an attribute slot, keyed by the attribute type.
#[must_use]
pub fn attribute_path(attribute: &Attribute, locale: Option<&str>, channel: Option<&str>) -> String {
    scope::field_path(
        &attribute.code,
        attribute.attribute_type.as_str(),
        locale,
        channel,
    )
}

pub(crate) fn check_locale_and_scope(
    attribute: &Attribute,
    locale: Option<&str>,
    channel: Option<&str>,
) -> Result<(), PropertyError> {
    validate_locale(attribute, locale)
        .and_then(|()| validate_scope(attribute, channel))
        .map_err(|e| PropertyError::from_validation(&attribute.code, e))
}

/// Runs the attribute filter checks, then adds what `build` returns for the
/// attribute's path.
pub(crate) fn apply_attribute_filter<F>(
    slot: &mut Option<SearchQueryBuilder>,
    operators: &[Operator],
    attribute: &Attribute,
    operator: Operator,
    locale: Option<&str>,
    channel: Option<&str>,
    build: F,
) -> Result<(), PropertyError>
where
    F: FnOnce(&str) -> Result<Vec<Clause>, PropertyError>,
{
    let builder = slot
        .as_mut()
        .ok_or_else(PropertyError::query_builder_not_initialized)?;

    check_locale_and_scope(attribute, locale, channel)?;

    if !operators.contains(&operator) {
        return Err(PropertyError::operator_not_supported(operator.as_str()));
    }

    let clauses = build(&attribute_path(attribute, locale, channel))?;
    for clause in clauses {
        clause.add_to(builder);
    }
    Ok(())
}

pub(crate) fn apply_field_filter<F>(
    slot: &mut Option<SearchQueryBuilder>,
    operators: &[Operator],
    operator: Operator,
    build: F,
) -> Result<(), PropertyError>
where
    F: FnOnce() -> Result<Vec<Clause>, PropertyError>,
{
    let builder = slot
        .as_mut()
        .ok_or_else(PropertyError::query_builder_not_initialized)?;

    if !operators.contains(&operator) {
        return Err(PropertyError::operator_not_supported(operator.as_str()));
    }

    for clause in build()? {
        clause.add_to(builder);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_query_string("sony"), "sony");
        assert_eq!(escape_query_string("a b"), "a\\ b");
        assert_eq!(escape_query_string("1/2\" (x)"), "1\\/2\\\"\\ \\(x\\)");
        assert_eq!(escape_query_string("c:\\*"), "c\\:\\\\\\*");
    }

    #[test]
    fn attribute_path_uses_the_attribute_type() {
        let description = Attribute::new("description", AttributeType::Textarea)
            .with_localizable(true)
            .with_scopable(true);
        assert_eq!(
            attribute_path(&description, Some("en_US"), Some("ecommerce")),
            "values.description-pim_catalog_textarea.en_US.ecommerce"
        );
        assert_eq!(
            attribute_path(&description, None, None),
            "values.description-pim_catalog_textarea.<all_locales>.<all_channels>"
        );
    }

    #[test]
    fn locale_is_checked_before_scope() {
        let name = Attribute::new("name", AttributeType::Text).with_localizable(true);
        let err = check_locale_and_scope(&name, None, Some("ecommerce")).unwrap_err();
        assert_eq!(err.to_string(), "Attribute \"name\" expects a locale, none given.");
    }
}
