//! Catalog model shared by the value factories, the completeness engine and
//! the indexing layer.
//!
//! Attributes, channels, locales and families are configured once (see
//! [`catalog`]) and shared read-only through `Arc`. Products own their
//! [`ProductValueCollection`]; completeness is always derived from it.

pub mod app_config;
pub mod attribute;
pub mod catalog;
pub mod channel;
pub mod collection;
pub mod completeness;
pub mod config;
pub mod error;
pub mod family;
pub mod product;
pub mod repository;
pub mod scope;
pub mod validator;
pub mod value;

pub use app_config::{AppConfig, Environment};
pub use attribute::{Attribute, AttributeType, BackendType};
pub use catalog::{load_catalog, Catalog};
pub use channel::{Channel, Locale};
pub use collection::{ProductValueCollection, ValueKey};
pub use completeness::{Completeness, ProductCompletenesses};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{json_type_name, ConfigError, PropertyError};
pub use family::{AttributeRequirement, Family};
pub use product::Product;
pub use repository::{
    AttributeOptionRepository, AttributeRepository, CachedAttributeOptionRepository,
    InMemoryAttributeOptionRepository, InMemoryReferenceDataRepository, ReferenceDataRepository,
    ReferenceDataRepositoryResolver,
};
pub use validator::AttributeValidationError;
pub use value::{AttributeOption, FileInfo, Metric, Price, ProductValue, ReferenceData, ValueData};
