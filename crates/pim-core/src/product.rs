use std::sync::Arc;

use uuid::Uuid;

use crate::collection::ProductValueCollection;
use crate::family::Family;
use crate::value::ProductValue;

/// A catalog product: its values and, optionally, the family that defines
/// which of them are required.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub identifier: String,
    family: Option<Arc<Family>>,
    values: ProductValueCollection,
}

impl Product {
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            family: None,
            values: ProductValueCollection::new(),
        }
    }

    #[must_use]
    pub fn with_family(mut self, family: Arc<Family>) -> Self {
        self.family = Some(family);
        self
    }

    pub fn set_family(&mut self, family: Option<Arc<Family>>) {
        self.family = family;
    }

    #[must_use]
    pub fn family(&self) -> Option<&Arc<Family>> {
        self.family.as_ref()
    }

    #[must_use]
    pub fn family_code(&self) -> Option<&str> {
        self.family.as_deref().map(|f| f.code.as_str())
    }

    #[must_use]
    pub fn values(&self) -> &ProductValueCollection {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ProductValueCollection {
        &mut self.values
    }

    /// See [`ProductValueCollection::add`].
    pub fn add_value(&mut self, value: ProductValue) -> bool {
        self.values.add(value)
    }
}
