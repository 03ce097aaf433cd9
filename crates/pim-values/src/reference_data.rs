use std::sync::Arc;

use serde_json::Value;

use pim_core::{
    Attribute, AttributeType, ProductValue, PropertyError, ReferenceData, ReferenceDataRepository,
    ReferenceDataRepositoryResolver, ValueData,
};

use crate::factory::{build, optional_string, string_array, ValueFactory};
use crate::resolve::{resolve_codes, NoneResolved, UnresolvedCodes};

/// Reference-data simple select values: one code of the attribute's
/// reference-data catalog.
pub struct ReferenceDataValueFactory {
    resolver: Arc<dyn ReferenceDataRepositoryResolver>,
    policy: UnresolvedCodes,
}

impl ReferenceDataValueFactory {
    #[must_use]
    pub fn new(resolver: Arc<dyn ReferenceDataRepositoryResolver>) -> Self {
        Self {
            resolver,
            policy: UnresolvedCodes::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnresolvedCodes) -> Self {
        self.policy = policy;
        self
    }
}

impl ValueFactory for ReferenceDataValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::ReferenceDataSimpleSelect]
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

        let entry = resolve_reference_data(self.resolver.as_ref(), attribute, &codes, self.policy)?
            .into_iter()
            .next();
        build(attribute, channel, locale, ValueData::ReferenceData(entry))
    }
}

/// Reference-data multi select values.
pub struct ReferenceDataCollectionValueFactory {
    resolver: Arc<dyn ReferenceDataRepositoryResolver>,
    policy: UnresolvedCodes,
}

impl ReferenceDataCollectionValueFactory {
    #[must_use]
    pub fn new(resolver: Arc<dyn ReferenceDataRepositoryResolver>) -> Self {
        Self {
            resolver,
            policy: UnresolvedCodes::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnresolvedCodes) -> Self {
        self.policy = policy;
        self
    }
}

impl ValueFactory for ReferenceDataCollectionValueFactory {
    fn supported_types(&self) -> &'static [AttributeType] {
        &[AttributeType::ReferenceDataMultiSelect]
    }

    fn create(
        &self,
        attribute: &Arc<Attribute>,
        channel: Option<&str>,
        locale: Option<&str>,
        data: &Value,
    ) -> Result<ProductValue, PropertyError> {
        let codes = string_array(attribute, data)?;
        let entries =
            resolve_reference_data(self.resolver.as_ref(), attribute, &codes, self.policy)?;
        build(
            attribute,
            channel,
            locale,
            ValueData::ReferenceDataCollection(entries),
        )
    }
}

fn repository_for(
    resolver: &dyn ReferenceDataRepositoryResolver,
    attribute: &Attribute,
) -> Result<(String, Arc<dyn ReferenceDataRepository>), PropertyError> {
    let name = attribute.reference_data_name.as_deref().ok_or_else(|| {
        PropertyError::InvalidArgument(format!(
            "Attribute \"{}\" has no reference data name.",
            attribute.code
        ))
    })?;

    let repository = resolver.resolve(name).ok_or_else(|| {
        PropertyError::InvalidArgument(format!(
            "No repository is registered for the reference data \"{name}\" of attribute \"{}\".",
            attribute.code
        ))
    })?;

    Ok((name.to_string(), repository))
}

fn resolve_reference_data(
    resolver: &dyn ReferenceDataRepositoryResolver,
    attribute: &Attribute,
    codes: &[String],
    policy: UnresolvedCodes,
) -> Result<Vec<ReferenceData>, PropertyError> {
    let (name, repository) = repository_for(resolver, attribute)?;

    resolve_codes(
        codes,
        policy,
        |code| repository.find_one_by_code(code),
        |code| {
            tracing::warn!(
                attribute = %attribute.code,
                reference_data = %name,
                code = %code,
                "tried to load a product value with a reference data that does not exist"
            );
        },
    )
    .map_err(|NoneResolved { codes }| PropertyError::InvalidReferenceData {
        property: attribute.code.clone(),
        reference_data_name: name.clone(),
        codes,
    })
}
