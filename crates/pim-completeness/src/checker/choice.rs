use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

/// Simple select and reference-data simple select: complete when a code is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionChecker;

impl ValueCompleteChecker for OptionChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(
            &[BackendType::Option, BackendType::ReferenceDataOption],
            value,
            channel,
            locale,
        )
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        matches!(
            value.data(),
            ValueData::Option(Some(_)) | ValueData::ReferenceData(Some(_))
        )
    }
}

/// Multi select and reference-data multi select: complete when non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsChecker;

impl ValueCompleteChecker for OptionsChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(
            &[BackendType::Options, BackendType::ReferenceDataOptions],
            value,
            channel,
            locale,
        )
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        match value.data() {
            ValueData::Options(options) => !options.is_empty(),
            ValueData::ReferenceDataCollection(entries) => !entries.is_empty(),
            _ => false,
        }
    }
}
