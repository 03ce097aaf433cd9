use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use pim_core::{
    Attribute, AttributeOptionRepository, AttributeType, ProductValue, PropertyError,
    ReferenceDataRepositoryResolver, ValueData,
};

use crate::option::{OptionValueFactory, OptionsValueFactory};
use crate::reference_data::{ReferenceDataCollectionValueFactory, ReferenceDataValueFactory};
use crate::scalar::{BooleanValueFactory, DateValueFactory, NumberValueFactory, TextValueFactory};
use crate::structured::{MediaValueFactory, MetricValueFactory, PriceCollectionValueFactory};

/// Builds product values of one family of attribute types from raw data.
pub trait ValueFactory: Send + Sync {
    /// Attribute types this factory accepts.
    fn supported_types(&self) -> &'static [AttributeType];

    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidPropertyType`] when `data` has the
    /// wrong shape, [`PropertyError::InvalidProperty`] when `channel` /
    /// `locale` contradict the attribute, and the option/reference-data
    /// errors when codes cannot be resolved.
    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError>;
}

/// Routes value creation to the factory registered for the attribute type.
#[derive(Default)]
pub struct ProductValueFactory {
    factories: HashMap<AttributeType, Arc<dyn ValueFactory>>,
}

impl ProductValueFactory {
    /// An empty router; every type is unregistered until [`register`] is called.
    ///
    /// [`register`]: Self::register
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A router with a factory for every attribute type.
    #[must_use]
    pub fn with_defaults(
        options: Arc<dyn AttributeOptionRepository>,
        reference_data: Arc<dyn ReferenceDataRepositoryResolver>,
    ) -> Self {
        let mut router = Self::new();
        router.register(Arc::new(TextValueFactory));
        router.register(Arc::new(NumberValueFactory));
        router.register(Arc::new(BooleanValueFactory));
        router.register(Arc::new(DateValueFactory));
        router.register(Arc::new(MetricValueFactory));
        router.register(Arc::new(PriceCollectionValueFactory));
        router.register(Arc::new(MediaValueFactory));
        router.register(Arc::new(OptionValueFactory::new(Arc::clone(&options))));
        router.register(Arc::new(OptionsValueFactory::new(options)));
        router.register(Arc::new(ReferenceDataValueFactory::new(Arc::clone(
            &reference_data,
        ))));
        router.register(Arc::new(ReferenceDataCollectionValueFactory::new(
            reference_data,
        )));
        router
    }

    /// Registers `factory` for each of its supported types, replacing any
    /// factory previously registered for them.
    pub fn register(&mut self, factory: Arc<dyn ValueFactory>) {
        for attribute_type in factory.supported_types() {
            self.factories.insert(*attribute_type, Arc::clone(&factory));
        }
    }

    #[must_use]
    pub fn supports(&self, attribute_type: AttributeType) -> bool {
        self.factories.contains_key(&attribute_type)
    }

    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidArgument`] when no factory handles the
    /// attribute type; otherwise whatever the factory returns.
    pub fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let factory = self.factories.get(&attribute.attribute_type).ok_or_else(|| {
            PropertyError::InvalidArgument(format!(
                "No factory has been registered to create a product value for the attribute type \"{}\".",
                attribute.attribute_type
            ))
        })?;

        factory.create(attribute, channel, locale, data)
    }
}

/// Wraps `data` into a value, checking the channel/locale invariant.
pub(crate) fn build(
    attribute: &Arc<Attribute>,
    channel: Option<&str>,
    locale: Option<&str>,
    data: ValueData,
) -> Result<ProductValue, PropertyError> {
    ProductValue::new(Arc::clone(attribute), channel, locale, data)
}

/// `null` or a string.
pub(crate) fn optional_string<'a>(
    attribute: &Attribute,
    data: &'a Value,
) -> Result<Option<&'a str>, PropertyError> {
    match data {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        other => Err(PropertyError::string_expected(&attribute.code, other)),
    }
}

/// `null`, `[]`, or an array of strings.
pub(crate) fn string_array(attribute: &Attribute, data: &Value) -> Result<Vec<String>, PropertyError> {
    let items = match data {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => return Err(PropertyError::array_expected(&attribute.code, other)),
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(code) => Ok(code.clone()),
            other => Err(PropertyError::valid_array_structure_expected(
                &attribute.code,
                format!(
                    "one of the codes is not a string, \"{}\" given",
                    pim_core::json_type_name(other)
                ),
            )),
        })
        .collect()
}

#[cfg(test)]
#[path = "factory_test.rs"]
mod tests;
