use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberChecker;

impl ValueCompleteChecker for NumberChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Decimal], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(value.data(), ValueData::Number(Some(_)))
    }
}

/// `false` is a filled boolean; only an absent flag is incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanChecker;

impl ValueCompleteChecker for BooleanChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Boolean], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(value.data(), ValueData::Boolean(Some(_)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateChecker;

impl ValueCompleteChecker for DateChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Date], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(value.data(), ValueData::Date(Some(_)))
    }
}
