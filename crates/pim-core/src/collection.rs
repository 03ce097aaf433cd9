use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use crate::attribute::Attribute;
use crate::scope::{self, ALL_CHANNELS, ALL_LOCALES};
use crate::value::ProductValue;

/// Unique key of a value inside a product:
/// `(attribute code, channel code | None, locale code | None)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueKey {
    pub attribute_code: String,
    pub channel: Option<String>,
    pub locale: Option<String>,
}

impl ValueKey {
    #[must_use]
    pub fn new(attribute_code: &str, channel: Option<&str>, locale: Option<&str>) -> Self {
        Self {
            attribute_code: attribute_code.to_string(),
            channel: channel.map(str::to_string),
            locale: locale.map(str::to_string),
        }
    }
}

impl std::fmt::Display for ValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.attribute_code,
            self.channel.as_deref().unwrap_or(ALL_CHANNELS),
            self.locale.as_deref().unwrap_or(ALL_LOCALES)
        )
    }
}

/// The values of one product, keyed by [`ValueKey`]. Iterates in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductValueCollection {
    values: BTreeMap<ValueKey, ProductValue>,
}

impl ProductValueCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` unless its key is already taken.
    ///
    /// Returns `false` (leaving the collection untouched) on a duplicate key.
    pub fn add(&mut self, value: ProductValue) -> bool {
        match self.values.entry(value.key()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Inserts `value`, returning the value previously stored under its key.
    pub fn replace(&mut self, value: ProductValue) -> Option<ProductValue> {
        self.values.insert(value.key(), value)
    }

    pub fn remove(&mut self, key: &ValueKey) -> Option<ProductValue> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &ValueKey) -> Option<&ProductValue> {
        self.values.get(key)
    }

    #[must_use]
    pub fn get_by_codes(
        &self,
        attribute_code: &str,
        channel: Option<&str>,
        locale: Option<&str>,
    ) -> Option<&ProductValue> {
        self.values
            .get(&ValueKey::new(attribute_code, channel, locale))
    }

    /// The value of `attribute` that applies to `(channel, locale)`.
    ///
    /// The exact slot wins, then the channel-only, locale-only and global
    /// slots, each filtered through [`scope::value_applies`].
    #[must_use]
    pub fn find_applicable(
        &self,
        attribute: &Attribute,
        channel: &str,
        locale: &str,
    ) -> Option<&ProductValue> {
        let candidates = [
            (Some(channel), Some(locale)),
            (Some(channel), None),
            (None, Some(locale)),
            (None, None),
        ];

        candidates
            .into_iter()
            .filter_map(|(c, l)| self.get_by_codes(&attribute.code, c, l))
            .find(|value| scope::value_applies(value, channel, locale))
    }

    #[must_use]
    pub fn contains_key(&self, key: &ValueKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductValue> {
        self.values.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn attribute_codes(&self) -> BTreeSet<&str> {
        self.values
            .keys()
            .map(|k| k.attribute_code.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ProductValueCollection {
    type Item = &'a ProductValue;
    type IntoIter = btree_map::Values<'a, ValueKey, ProductValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.values()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::attribute::AttributeType;
    use crate::value::ValueData;

    fn description() -> Arc<Attribute> {
        Arc::new(
            Attribute::new("description", AttributeType::Textarea)
                .with_localizable(true)
                .with_scopable(true),
        )
    }

    fn text(attr: &Arc<Attribute>, scope: Option<&str>, locale: Option<&str>, data: &str) -> ProductValue {
        ProductValue::new(
            Arc::clone(attr),
            scope,
            locale,
            ValueData::Text(Some(data.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn add_rejects_duplicate_keys() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        assert!(values.add(text(&attr, Some("ecommerce"), Some("en_US"), "first")));
        assert!(!values.add(text(&attr, Some("ecommerce"), Some("en_US"), "second")));

        assert_eq!(values.len(), 1);
        let kept = values
            .get_by_codes("description", Some("ecommerce"), Some("en_US"))
            .unwrap();
        assert_eq!(kept.data(), &ValueData::Text(Some("first".to_string())));
    }

    #[test]
    fn replace_returns_previous_value() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        values.add(text(&attr, None, None, "old"));
        let previous = values.replace(text(&attr, None, None, "new")).unwrap();
        assert_eq!(previous.data(), &ValueData::Text(Some("old".to_string())));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn same_attribute_different_slots_coexist() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        values.add(text(&attr, Some("ecommerce"), Some("en_US"), "a"));
        values.add(text(&attr, Some("ecommerce"), Some("fr_FR"), "b"));
        values.add(text(&attr, None, None, "c"));
        assert_eq!(values.len(), 3);
        assert_eq!(values.attribute_codes().len(), 1);
    }

    #[test]
    fn find_applicable_prefers_exact_slot() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        values.add(text(&attr, None, None, "global"));
        values.add(text(&attr, Some("ecommerce"), Some("en_US"), "exact"));

        let found = values.find_applicable(&attr, "ecommerce", "en_US").unwrap();
        assert_eq!(found.data(), &ValueData::Text(Some("exact".to_string())));

        let fallback = values.find_applicable(&attr, "print", "fr_FR").unwrap();
        assert_eq!(fallback.data(), &ValueData::Text(Some("global".to_string())));
    }

    #[test]
    fn find_applicable_ignores_other_channels() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        values.add(text(&attr, Some("ecommerce"), Some("en_US"), "web"));
        assert!(values.find_applicable(&attr, "print", "en_US").is_none());
    }

    #[test]
    fn remove_frees_the_key() {
        let attr = description();
        let mut values = ProductValueCollection::new();
        values.add(text(&attr, None, Some("en_US"), "x"));
        let key = ValueKey::new("description", None, Some("en_US"));
        assert!(values.remove(&key).is_some());
        assert!(!values.contains_key(&key));
        assert!(values.is_empty());
    }

    #[test]
    fn key_display_uses_sentinels() {
        let key = ValueKey::new("name", None, Some("en_US"));
        assert_eq!(key.to_string(), "name-<all_channels>-en_US");
    }
}
