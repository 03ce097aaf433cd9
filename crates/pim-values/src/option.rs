use std::sync::Arc;

use serde_json::Value;

use pim_core::{
    Attribute, AttributeOption, AttributeOptionRepository, AttributeType, ProductValue,
    PropertyError, ValueData,
};

use crate::factory::{build, optional_string, string_array, ValueFactory};
use crate::resolve::{resolve_codes, NoneResolved, UnresolvedCodes};

/// Simple select values: a single option code.
pub struct OptionValueFactory {
    repository: Arc<dyn AttributeOptionRepository>,
    policy: UnresolvedCodes,
}

impl OptionValueFactory {
    #[must_use]
    pub fn new(repository: Arc<dyn AttributeOptionRepository>) -> Self {
        Self {
            repository,
            policy: UnresolvedCodes::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnresolvedCodes) -> Self {
        self.policy = policy;
        self
    }
}

impl ValueFactory for OptionValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::SimpleSelect]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let codes: Vec<String> = optional_string(attribute, data)?
            .into_iter()
            .map(str::to_string)
            .collect();

        let option = resolve_options(self.repository.as_ref(), attribute, &codes, self.policy)?
            .into_iter()
            .next();
        build(attribute, channel, locale, ValueData::Option(option))
    }
}

/// Multi select values: an array of option codes.
pub struct OptionsValueFactory {
    repository: Arc<dyn AttributeOptionRepository>,
    policy: UnresolvedCodes,
}

impl OptionsValueFactory {
    #[must_use]
    pub fn new(repository: Arc<dyn AttributeOptionRepository>) -> Self {
        Self {
            repository,
            policy: UnresolvedCodes::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnresolvedCodes) -> Self {
        self.policy = policy;
        self
    }
}

impl ValueFactory for OptionsValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::MultiSelect]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let codes = string_array(attribute, data)?;
        let options = resolve_options(self.repository.as_ref(), attribute, &codes, self.policy)?;
        build(attribute, channel, locale, ValueData::Options(options))
    }
}

fn resolve_options(
    repository: &dyn AttributeOptionRepository,
    attribute: &Attribute,
    codes: &[String],
    policy: UnresolvedCodes,
) -> Result<Vec<AttributeOption>, PropertyError> {
    resolve_codes(
        codes,
        policy,
        |code| repository.find_one_by_identifier(&format!("{}.{code}", attribute.code)),
        |code| {
            tracing::warn!(
                attribute = %attribute.code,
                option = %code,
                "tried to load a product value with an option that does not exist"
            );
        },
    )
    .map_err(|NoneResolved { codes }| PropertyError::InvalidOption {
        property: attribute.code.clone(),
        codes,
    })
}
