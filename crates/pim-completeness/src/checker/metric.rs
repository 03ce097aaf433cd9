use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

/// Complete when both the amount and the unit are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricChecker;

impl ValueCompleteChecker for MetricChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Metric], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, _channel: &Channel, _locale: &Locale) -> bool {
        match value.data() {
            ValueData::Metric(Some(metric)) => metric.amount.is_some() && !metric.unit.is_empty(),
            _ => false,
        }
    }
}
