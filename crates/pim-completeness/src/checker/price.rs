use pim_core::{BackendType, Channel, Locale, ProductValue, ValueData};

use super::{supports_backend, ValueCompleteChecker};

/// Complete when every currency of the channel has a price with an amount.
///
/// A channel without currencies only needs one priced entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceChecker;

impl ValueCompleteChecker for PriceChecker {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        supports_backend(&[BackendType::Prices], value, channel, locale)
    }

    fn is_complete(&self, value: &ProductValue, channel: &Channel, _locale: &Locale) -> bool {
        let ValueData::Prices(prices) = value.data() else {
            return false;
        };

        let has_amount = |currency: &str| {
            prices
                .iter()
                .any(|p| p.currency == currency && p.amount.is_some())
        };

        if channel.currencies.is_empty() {
            return prices.iter().any(|p| p.amount.is_some());
        }

        channel.currencies.iter().all(|currency| has_amount(currency))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use pim_core::{AttributeType, Price};

    use super::*;
    use crate::checker::fixtures::{ecommerce, en_us, value};

    fn prices(entries: &[(&str, Option<i64>)]) -> ValueData {
        ValueData::Prices(
            entries
                .iter()
                .map(|(currency, amount)| Price::new(amount.map(Decimal::from), *currency))
                .collect(),
        )
    }

    #[test]
    fn all_channel_currencies_priced_is_complete() {
        let v = value(
            AttributeType::PriceCollection,
            prices(&[("USD", Some(10)), ("EUR", Some(9)), ("GBP", None)]),
        );
        assert!(PriceChecker.is_complete(&v, &ecommerce(), &en_us()));
    }

    #[test]
    fn missing_currency_is_incomplete() {
        let v = value(AttributeType::PriceCollection, prices(&[("USD", Some(10))]));
        assert!(!PriceChecker.is_complete(&v, &ecommerce(), &en_us()));
    }

    #[test]
    fn currency_without_amount_is_incomplete() {
        let v = value(
            AttributeType::PriceCollection,
            prices(&[("USD", Some(10)), ("EUR", None)]),
        );
        assert!(!PriceChecker.is_complete(&v, &ecommerce(), &en_us()));
    }

    #[test]
    fn channel_without_currencies_needs_one_amount() {
        let mobile = Channel::new("mobile", ["en_US"]);
        let v = value(AttributeType::PriceCollection, prices(&[("JPY", Some(1000))]));
        assert!(PriceChecker.is_complete(&v, &mobile, &en_us()));

        let empty = value(AttributeType::PriceCollection, prices(&[]));
        assert!(!PriceChecker.is_complete(&empty, &mobile, &en_us()));
    }
}
