use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Completeness of one product for one `(channel, locale)` pair.
///
/// Built by the calculator on every pass; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completeness {
    channel: String,
    locale: String,
    required_count: usize,
    missing: BTreeSet<String>,
}

impl Completeness {
    #[must_use]
    pub fn new<I, S>(
        channel: impl Into<String>,
        locale: impl Into<String>,
        required_count: usize,
        missing: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel: channel.into(),
            locale: locale.into(),
            required_count,
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn required_count(&self) -> usize {
        self.required_count
    }

    #[must_use]
    pub fn missing_attribute_codes(&self) -> &BTreeSet<String> {
        &self.missing
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// Percentage of required attributes that are filled, rounded down.
    /// A pair with nothing required is 100% complete.
    #[must_use]
    pub fn ratio(&self) -> u8 {
        if self.required_count == 0 {
            return 100;
        }
        let filled = self.required_count.saturating_sub(self.missing.len());
        let pct = filled * 100 / self.required_count;
        u8::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// All completenesses of a product, keyed by `(channel, locale)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCompletenesses {
    by_pair: BTreeMap<(String, String), Completeness>,
}

impl ProductCompletenesses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `completeness` under its own pair, replacing any earlier one.
    pub fn insert(&mut self, completeness: Completeness) {
        let key = (
            completeness.channel.clone(),
            completeness.locale.clone(),
        );
        self.by_pair.insert(key, completeness);
    }

    #[must_use]
    pub fn get(&self, channel: &str, locale: &str) -> Option<&Completeness> {
        self.by_pair
            .get(&(channel.to_string(), locale.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Completeness> {
        self.by_pair.values()
    }

    /// Pairs that have at least one missing attribute.
    pub fn incomplete(&self) -> impl Iterator<Item = &Completeness> {
        self.by_pair.values().filter(|c| !c.is_complete())
    }

    /// Ratios as `{channel: {locale: ratio}}`.
    #[must_use]
    pub fn ratios(&self) -> BTreeMap<&str, BTreeMap<&str, u8>> {
        let mut out: BTreeMap<&str, BTreeMap<&str, u8>> = BTreeMap::new();
        for c in self.by_pair.values() {
            out.entry(c.channel.as_str())
                .or_default()
                .insert(c.locale.as_str(), c.ratio());
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

impl FromIterator<Completeness> for ProductCompletenesses {
    fn from_iter<T: IntoIterator<Item = Completeness>>(iter: T) -> Self {
        let mut out = Self::new();
        for c in iter {
            out.insert(c);
        }
        out
    }
}
