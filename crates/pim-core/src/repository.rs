//! Lookup seams used by the value factories and the query builder.
//!
//! All lookups are synchronous and return `None` on a miss; a miss is never
//! an error at this level.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::attribute::Attribute;
use crate::value::{AttributeOption, ReferenceData};

pub trait AttributeRepository: Send + Sync {
    fn find_one_by_code(&self, code: &str) -> Option<Arc<Attribute>>;
}

pub trait AttributeOptionRepository: Send + Sync {
    /// Looks an option up by `<attribute_code>.<option_code>`.
    fn find_one_by_identifier(&self, identifier: &str) -> Option<AttributeOption>;
}

pub trait ReferenceDataRepository: Send + Sync {
    fn find_one_by_code(&self, code: &str) -> Option<ReferenceData>;
}

/// Maps a reference-data name (e.g. `"fabrics"`) to its repository.
pub trait ReferenceDataRepositoryResolver: Send + Sync {
    fn resolve(&self, reference_data_name: &str) -> Option<Arc<dyn ReferenceDataRepository>>;
}

impl<R: AttributeOptionRepository + ?Sized> AttributeOptionRepository for Arc<R> {
    fn find_one_by_identifier(&self, identifier: &str) -> Option<AttributeOption> {
        (**self).find_one_by_identifier(identifier)
    }
}

impl ReferenceDataRepositoryResolver for HashMap<String, Arc<dyn ReferenceDataRepository>> {
    fn resolve(&self, reference_data_name: &str) -> Option<Arc<dyn ReferenceDataRepository>> {
        self.get(reference_data_name).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeOptionRepository {
    options: HashMap<String, AttributeOption>,
}

impl InMemoryAttributeOptionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, option: AttributeOption) {
        self.options.insert(option.identifier(), option);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl FromIterator<AttributeOption> for InMemoryAttributeOptionRepository {
    fn from_iter<T: IntoIterator<Item = AttributeOption>>(iter: T) -> Self {
        let mut repo = Self::new();
        for option in iter {
            repo.insert(option);
        }
        repo
    }
}

impl AttributeOptionRepository for InMemoryAttributeOptionRepository {
    fn find_one_by_identifier(&self, identifier: &str) -> Option<AttributeOption> {
        self.options.get(identifier).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceDataRepository {
    entries: HashMap<String, ReferenceData>,
}

impl InMemoryReferenceDataRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ReferenceData) {
        self.entries.insert(entry.code.clone(), entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ReferenceData> for InMemoryReferenceDataRepository {
    fn from_iter<T: IntoIterator<Item = ReferenceData>>(iter: T) -> Self {
        let mut repo = Self::new();
        for entry in iter {
            repo.insert(entry);
        }
        repo
    }
}

impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    fn find_one_by_code(&self, code: &str) -> Option<ReferenceData> {
        self.entries.get(code).cloned()
    }
}

/// Memoizes option lookups of an inner repository.
///
/// Only hits are cached, so an option created after a miss is found on the
/// next lookup. A poisoned lock is recovered rather than propagated.
pub struct CachedAttributeOptionRepository<R> {
    inner: R,
    cache: Mutex<HashMap<String, AttributeOption>>,
}

impl<R: AttributeOptionRepository> CachedAttributeOptionRepository<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<R: AttributeOptionRepository> AttributeOptionRepository for CachedAttributeOptionRepository<R> {
    fn find_one_by_identifier(&self, identifier: &str) -> Option<AttributeOption> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identifier)
        {
            return Some(hit.clone());
        }

        let found = self.inner.find_one_by_identifier(identifier)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(identifier.to_string(), found.clone());
        Some(found)
    }
}
