use std::sync::Arc;

use pim_core::{AttributeRepository, PropertyError};
use serde_json::Value;

use crate::filter::{
    AttributeFilter, BooleanFilter, DateFilter, FamilyFilter, FieldFilter, FilterOptions,
    IdentifierFilter, MediaFilter, NumberFilter, OptionFilter, PriceFilter, StringFilter,
};
use crate::operator::Operator;
use crate::search::SearchQueryBuilder;
use crate::sorter::{AttributeSorter, Direction};

/// Locale, scope and free-form options of one filter or sorter call.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    pub locale: Option<String>,
    pub scope: Option<String>,
    pub options: FilterOptions,
}

impl FilterContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Builds a product search from field or attribute criteria.
///
/// Field names (`identifier`, `family`) go to the field filters; anything
/// else is looked up as an attribute code and routed to the first attribute
/// filter supporting both the attribute and the operator.
pub struct ProductQueryBuilder {
    attributes: Arc<dyn AttributeRepository>,
    field_filters: Vec<Box<dyn FieldFilter>>,
    attribute_filters: Vec<Box<dyn AttributeFilter>>,
    sorter: AttributeSorter,
    builder: SearchQueryBuilder,
}

impl ProductQueryBuilder {
    /// A builder with no filters registered.
    #[must_use]
    pub fn new(attributes: Arc<dyn AttributeRepository>) -> Self {
        Self {
            attributes,
            field_filters: Vec::new(),
            attribute_filters: Vec::new(),
            sorter: AttributeSorter,
            builder: SearchQueryBuilder::new(),
        }
    }

    /// A builder with every built-in field and attribute filter.
    #[must_use]
    pub fn with_defaults(attributes: Arc<dyn AttributeRepository>) -> Self {
        let mut query = Self::new(attributes);
        query.register_field_filter(Box::new(IdentifierFilter::new()));
        query.register_field_filter(Box::new(FamilyFilter::new()));
        query.register_attribute_filter(Box::new(StringFilter::new()));
        query.register_attribute_filter(Box::new(NumberFilter::new()));
        query.register_attribute_filter(Box::new(BooleanFilter::new()));
        query.register_attribute_filter(Box::new(DateFilter::new()));
        query.register_attribute_filter(Box::new(OptionFilter::new()));
        query.register_attribute_filter(Box::new(OptionFilter::reference_data()));
        query.register_attribute_filter(Box::new(PriceFilter::new()));
        query.register_attribute_filter(Box::new(MediaFilter::new()));
        query
    }

    pub fn register_field_filter(&mut self, filter: Box<dyn FieldFilter>) {
        self.field_filters.push(filter);
    }

    pub fn register_attribute_filter(&mut self, filter: Box<dyn AttributeFilter>) {
        self.attribute_filters.push(filter);
    }

    /// # Errors
    ///
    /// `InvalidArgument` when `field` is neither a known field nor an
    /// attribute code, or when no filter handles the attribute type; any
    /// error of the chosen filter otherwise.
    pub fn add_filter(
        &mut self,
        field: &str,
        operator: Operator,
        value: &Value,
        context: &FilterContext,
    ) -> Result<(), PropertyError> {
        let locale = context.locale.as_deref();
        let scope = context.scope.as_deref();

        if let Some(filter) = self
            .field_filters
            .iter_mut()
            .find(|f| f.supports_field(field))
        {
            tracing::debug!(field, %operator, "adding field filter");
            filter.set_query_builder(std::mem::take(&mut self.builder));
            let result =
                filter.add_field_filter(field, operator, value, locale, scope, &context.options);
            self.builder = filter.take_query_builder().unwrap_or_default();
            return result;
        }

        let attribute = self.attributes.find_one_by_code(field).ok_or_else(|| {
            PropertyError::InvalidArgument(format!(
                "Unsupported field name \"{field}\": neither a product field nor an attribute code."
            ))
        })?;

        let position = self
            .attribute_filters
            .iter()
            .position(|f| f.supports_attribute(&attribute) && f.supports_operator(operator))
            .or_else(|| {
                self.attribute_filters
                    .iter()
                    .position(|f| f.supports_attribute(&attribute))
            })
            .ok_or_else(|| {
                PropertyError::InvalidArgument(format!(
                    "No filter is registered for attribute type \"{}\".",
                    attribute.attribute_type
                ))
            })?;

        tracing::debug!(attribute = %attribute.code, %operator, "adding attribute filter");
        let filter = &mut self.attribute_filters[position];
        filter.set_query_builder(std::mem::take(&mut self.builder));
        let result =
            filter.add_attribute_filter(&attribute, operator, value, locale, scope, &context.options);
        self.builder = filter.take_query_builder().unwrap_or_default();
        result
    }

    /// # Errors
    ///
    /// `InvalidArgument` for an unknown attribute, or the sorter's error.
    pub fn add_sorter(
        &mut self,
        field: &str,
        direction: Direction,
        context: &FilterContext,
    ) -> Result<(), PropertyError> {
        let attribute = self.attributes.find_one_by_code(field).ok_or_else(|| {
            PropertyError::InvalidArgument(format!("Unsupported sort field \"{field}\"."))
        })?;

        self.sorter.add_attribute_sorter(
            &mut self.builder,
            &attribute,
            direction,
            context.locale.as_deref(),
            context.scope.as_deref(),
        )
    }

    #[must_use]
    pub fn search_query_builder(&self) -> &SearchQueryBuilder {
        &self.builder
    }

    #[must_use]
    pub fn query(&self) -> Value {
        self.builder.query()
    }
}

#[cfg(test)]
#[path = "product_query_test.rs"]
mod tests;
