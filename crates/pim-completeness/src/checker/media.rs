use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaChecker;

impl ValueCompleteChecker for MediaChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Media], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(value.data(), ValueData::Media(Some(file)) if !file.key.is_empty())
    }
}
