use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::attribute::{Attribute, AttributeType};
use crate::channel::{Channel, Locale};
use crate::family::Family;
use crate::repository::{
    AttributeOptionRepository, AttributeRepository, InMemoryAttributeOptionRepository,
    InMemoryReferenceDataRepository, ReferenceDataRepository, ReferenceDataRepositoryResolver,
};
use crate::value::{AttributeOption, ReferenceData};
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    pub code: String,
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default)]
    pub currencies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    pub attribute: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyConfig {
    pub code: String,
    pub attributes: Vec<String>,
    /// Channel code to the attribute codes required on that channel.
    #[serde(default)]
    pub requirements: BTreeMap<String, Vec<String>>,
}

/// Raw catalog file, as written in YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub locales: Vec<String>,
    pub channels: Vec<ChannelConfig>,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub options: Vec<OptionsConfig>,
    /// Reference-data name to its entries.
    #[serde(default)]
    pub reference_data: BTreeMap<String, Vec<ReferenceData>>,
    #[serde(default)]
    pub families: Vec<FamilyConfig>,
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = Catalog::from_yaml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        attributes = catalog.attributes.len(),
        families = catalog.families.len(),
        channels = catalog.channels.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn validate_catalog(file: &CatalogFile) -> Result<(), ConfigError> {
    let mut locales = HashSet::new();
    for locale in &file.locales {
        if locale.trim().is_empty() {
            return Err(ConfigError::Validation(
                "locale code must be non-empty".to_string(),
            ));
        }
        if !locales.insert(locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate locale: '{locale}'"
            )));
        }
    }

    let mut channels = HashSet::new();
    for channel in &file.channels {
        if !channels.insert(channel.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate channel: '{}'",
                channel.code
            )));
        }
        if let Some(unknown) = channel.locales.iter().find(|l| !locales.contains(l.as_str())) {
            return Err(ConfigError::Validation(format!(
                "channel '{}' references unknown locale '{unknown}'",
                channel.code
            )));
        }
    }

    let mut attributes: HashMap<&str, &Attribute> = HashMap::new();
    for attribute in &file.attributes {
        if attributes.insert(attribute.code.as_str(), attribute).is_some() {
            return Err(ConfigError::Validation(format!(
                "duplicate attribute: '{}'",
                attribute.code
            )));
        }
        if let Some(unknown) = attribute
            .available_locales
            .iter()
            .find(|l| !locales.contains(l.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "attribute '{}' references unknown locale '{unknown}'",
                attribute.code
            )));
        }
        match (
            attribute.is_backend_type_reference_data(),
            attribute.reference_data_name.is_some(),
        ) {
            (true, false) => {
                return Err(ConfigError::Validation(format!(
                    "attribute '{}' of type {} needs a reference_data_name",
                    attribute.code, attribute.attribute_type
                )));
            }
            (false, true) => {
                return Err(ConfigError::Validation(format!(
                    "attribute '{}' of type {} cannot have a reference_data_name",
                    attribute.code, attribute.attribute_type
                )));
            }
            _ => {}
        }
    }

    for options in &file.options {
        let Some(attribute) = attributes.get(options.attribute.as_str()) else {
            return Err(ConfigError::Validation(format!(
                "options declared for unknown attribute '{}'",
                options.attribute
            )));
        };
        if !matches!(
            attribute.attribute_type,
            AttributeType::SimpleSelect | AttributeType::MultiSelect
        ) {
            return Err(ConfigError::Validation(format!(
                "options declared for attribute '{}' of type {}",
                attribute.code, attribute.attribute_type
            )));
        }
    }

    let mut families = HashSet::new();
    for family in &file.families {
        if !families.insert(family.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate family: '{}'",
                family.code
            )));
        }
        if let Some(unknown) = family
            .attributes
            .iter()
            .find(|a| !attributes.contains_key(a.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "family '{}' references unknown attribute '{unknown}'",
                family.code
            )));
        }
        for (channel, required) in &family.requirements {
            if !channels.contains(channel.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "family '{}' has requirements for unknown channel '{channel}'",
                    family.code
                )));
            }
            if let Some(stray) = required.iter().find(|a| !family.attributes.contains(*a)) {
                return Err(ConfigError::Validation(format!(
                    "family '{}' requires '{stray}' on '{channel}' but does not list it",
                    family.code
                )));
            }
        }
    }

    Ok(())
}

/// The configured catalog: locales, channels, attributes, families and the
/// option / reference-data repositories, all shared read-only.
pub struct Catalog {
    locales: Vec<Locale>,
    channels: Vec<Arc<Channel>>,
    attributes: BTreeMap<String, Arc<Attribute>>,
    families: BTreeMap<String, Arc<Family>>,
    options: InMemoryAttributeOptionRepository,
    reference_data: HashMap<String, Arc<dyn ReferenceDataRepository>>,
}

impl Catalog {
    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text cannot be parsed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when codes are duplicated or
    /// references do not resolve.
    pub fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        validate_catalog(&file)?;

        let channels: Vec<Arc<Channel>> = file
            .channels
            .into_iter()
            .map(|c| Arc::new(Channel::new(c.code, c.locales).with_currencies(c.currencies)))
            .collect();

        let attributes: BTreeMap<String, Arc<Attribute>> = file
            .attributes
            .into_iter()
            .map(|a| (a.code.clone(), Arc::new(a)))
            .collect();

        let families = file
            .families
            .into_iter()
            .map(|config| {
                let mut family = Family::new(&config.code);
                for channel in &channels {
                    let required = config.requirements.get(&channel.code);
                    for code in &config.attributes {
                        if let Some(attribute) = attributes.get(code) {
                            let is_required = required.is_some_and(|r| r.contains(code));
                            family.set_requirement(
                                Arc::clone(attribute),
                                Arc::clone(channel),
                                is_required,
                            );
                        }
                    }
                }
                (config.code, Arc::new(family))
            })
            .collect();

        let options = file
            .options
            .iter()
            .flat_map(|o| {
                o.codes
                    .iter()
                    .map(|code| AttributeOption::new(&o.attribute, code))
            })
            .collect();

        let reference_data = file
            .reference_data
            .into_iter()
            .map(|(name, entries)| {
                let repo: Arc<dyn ReferenceDataRepository> =
                    Arc::new(entries.into_iter().collect::<InMemoryReferenceDataRepository>());
                (name, repo)
            })
            .collect();

        Ok(Self {
            locales: file.locales.into_iter().map(Locale::new).collect(),
            channels,
            attributes,
            families,
            options,
            reference_data,
        })
    }

    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub fn channels(&self) -> &[Arc<Channel>] {
        &self.channels
    }

    #[must_use]
    pub fn channel(&self, code: &str) -> Option<&Arc<Channel>> {
        self.channels.iter().find(|c| c.code == code)
    }

    #[must_use]
    pub fn attribute(&self, code: &str) -> Option<&Arc<Attribute>> {
        self.attributes.get(code)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Arc<Attribute>> {
        self.attributes.values()
    }

    /// The attribute holding product identifiers, if one is configured.
    #[must_use]
    pub fn identifier_attribute(&self) -> Option<&Arc<Attribute>> {
        self.attributes
            .values()
            .find(|a| a.attribute_type == AttributeType::Identifier)
    }

    #[must_use]
    pub fn family(&self, code: &str) -> Option<&Arc<Family>> {
        self.families.get(code)
    }

    pub fn families(&self) -> impl Iterator<Item = &Arc<Family>> {
        self.families.values()
    }

    #[must_use]
    pub fn options(&self) -> &InMemoryAttributeOptionRepository {
        &self.options
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("locales", &self.locales.len())
            .field("channels", &self.channels.len())
            .field("attributes", &self.attributes.len())
            .field("families", &self.families.len())
            .field("options", &self.options.len())
            .field(
                "reference_data",
                &self.reference_data.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl AttributeRepository for Catalog {
    fn find_one_by_code(&self, code: &str) -> Option<Arc<Attribute>> {
        self.attributes.get(code).cloned()
    }
}

impl AttributeOptionRepository for Catalog {
    fn find_one_by_identifier(&self, identifier: &str) -> Option<AttributeOption> {
        self.options.find_one_by_identifier(identifier)
    }
}

impl ReferenceDataRepositoryResolver for Catalog {
    fn resolve(&self, reference_data_name: &str) -> Option<Arc<dyn ReferenceDataRepository>> {
        self.reference_data.get(reference_data_name).cloned()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
