use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

/// Varchar and text values: complete when the string is non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextChecker;

impl ValueCompleteChecker for TextChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Varchar, BackendType::Text], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(value.data(), ValueData::Text(Some(text)) if !text.is_empty())
    }
}
