//! Per-backend-type "is this value filled" checks.
//!
//! Every checker refuses values whose scope or locale does not apply to the
//! requested pair (see [`pim_core::scope::value_applies`]), on top of its
//! backend-type match.

mod choice;
mod media;
mod metric;
mod price;
mod scalar;
mod text;

use pim_core::{scope, BackendType, Channel, Locale, ProductValue};

pub use choice::{OptionChecker, OptionsChecker};
pub use media::MediaChecker;
pub use metric::MetricChecker;
pub use price::PriceChecker;
pub use scalar::{BooleanChecker, DateChecker, NumberChecker};
pub use text::TextChecker;

pub trait ValueCompleteChecker: Send + Sync {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool;

    /// Only meaningful when [`supports_value`](Self::supports_value) is `true`.
    fn is_complete(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool;
}

/// The built-in checkers, one per group of backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChecker {
    Text(TextChecker),
    Number(NumberChecker),
    Boolean(BooleanChecker),
    Date(DateChecker),
    Metric(MetricChecker),
    Price(PriceChecker),
    Option(OptionChecker),
    Options(OptionsChecker),
    Media(MediaChecker),
}

impl BackendChecker {
    /// One checker for every backend type, in a fixed order.
    #[must_use]
    pub fn all() -> Vec<BackendChecker> {
        vec![
            BackendChecker::Text(TextChecker),
            BackendChecker::Number(NumberChecker),
            BackendChecker::Boolean(BooleanChecker),
            BackendChecker::Date(DateChecker),
            BackendChecker::Metric(MetricChecker),
            BackendChecker::Price(PriceChecker),
            BackendChecker::Option(OptionChecker),
            BackendChecker::Options(OptionsChecker),
            BackendChecker::Media(MediaChecker),
        ]
    }

    fn inner(&self) -> &dyn ValueCompleteChecker {
        match self {
            BackendChecker::Text(c) => c,
            BackendChecker::Number(c) => c,
            BackendChecker::Boolean(c) => c,
            BackendChecker::Date(c) => c,
            BackendChecker::Metric(c) => c,
            BackendChecker::Price(c) => c,
            BackendChecker::Option(c) => c,
            BackendChecker::Options(c) => c,
            BackendChecker::Media(c) => c,
        }
    }
}

impl ValueCompleteChecker for BackendChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        self.inner().supports_value(value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        self.inner().is_complete(value, channel, locale)
    }
}

/// Backend-type match plus the shared scope/locale rule.
pub(crate) fn supports_backend(
    backends: &[BackendType],
    value: &ProductValue,
    channel: &Channel,
    locale: &Locale,
) -> bool {
    backends.contains(&value.attribute().backend_type())
        && scope::value_applies(value, &channel.code, &locale.code)
}
