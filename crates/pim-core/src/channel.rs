use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    pub code: String,
}

impl Locale {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A publication channel (e.g. `ecommerce`, `print`).
///
/// Locales keep their configured order; completeness is reported per
/// channel locale in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub code: String,
    pub locales: Vec<Locale>,
    /// ISO 4217 codes a price collection must cover on this channel.
    #[serde(default)]
    pub currencies: Vec<String>,
}

impl Channel {
    #[must_use]
    pub fn new<I, S>(code: impl Into<String>, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            locales: locales.into_iter().map(Locale::new).collect(),
            currencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currencies = currencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.code.as_str())
    }

    #[must_use]
    pub fn has_locale(&self, code: &str) -> bool {
        self.locales.iter().any(|l| l.code == code)
    }
}
