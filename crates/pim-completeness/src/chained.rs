use pim_core::{scope, Channel, Locale, ProductValue};

use crate::checker::{BackendChecker, ValueCompleteChecker};

/// An ordered list of checkers. A value is complete as soon as one checker
/// both supports it and reports it complete.
#[derive(Debug, Clone)]
pub struct ChainedChecker<C = BackendChecker> {
    checkers: Vec<C>,
}

impl<C> Default for ChainedChecker<C> {
    fn default() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }
}

impl ChainedChecker<BackendChecker> {
    /// A chain holding every built-in backend checker.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            checkers: BackendChecker::all(),
        }
    }
}

impl<C: ValueCompleteChecker> ChainedChecker<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_checker(&mut self, checker: C) {
        self.checkers.push(checker);
    }

    #[must_use]
    pub fn with_checker(mut self, checker: C) -> Self {
        self.add_checker(checker);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl<C: ValueCompleteChecker> ValueCompleteChecker for ChainedChecker<C> {
    fn supports_value(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        scope::value_applies(value, &channel.code, &locale.code)
    }

    fn is_complete(&self, value: &ProductValue, channel: &Channel, locale: &Locale) -> bool {
        self.checkers.iter().any(|checker| {
            checker.supports_value(value, channel, locale)
                && checker.is_complete(value, channel, locale)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use pim_core::{Attribute, AttributeType, ValueData};

    use super::*;

    /// Answers fixed verdicts and counts how often it is consulted.
    struct Scripted {
        supports: bool,
        complete: bool,
        supports_calls: Arc<AtomicUsize>,
        complete_calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(supports: bool, complete: bool) -> Self {
            Self {
                supports,
                complete,
                supports_calls: Arc::new(AtomicUsize::new(0)),
                complete_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ValueCompleteChecker for Scripted {
        fn supports_value(&self, _: &ProductValue, _: &Channel, _: &Locale) -> bool {
            self.supports_calls.fetch_add(1, Ordering::SeqCst);
            self.supports
        }

        fn is_complete(&self, _: &ProductValue, _: &Channel, _: &Locale) -> bool {
            self.complete_calls.fetch_add(1, Ordering::SeqCst);
            self.complete
        }
    }

    fn name_value(scope: Option<&str>, locale: Option<&str>) -> ProductValue {
        let name = Arc::new(
            Attribute::new("name", AttributeType::Text)
                .with_localizable(true)
                .with_scopable(true),
        );
        ProductValue::new(name, scope, locale, ValueData::Text(Some("x".to_string()))).unwrap()
    }

    fn pair() -> (Channel, Locale) {
        (Channel::new("ecommerce", ["en_US"]), Locale::new("en_US"))
    }

    #[test]
    fn empty_chain_is_never_complete() {
        let (channel, locale) = pair();
        let chain: ChainedChecker<Scripted> = ChainedChecker::new();
        assert!(!chain.is_complete(&name_value(None, None), &channel, &locale));
    }

    #[test]
    fn unsupported_checkers_are_skipped() {
        let (channel, locale) = pair();
        let chain = ChainedChecker::new()
            .with_checker(Scripted::new(false, true))
            .with_checker(Scripted::new(true, true));
        assert!(chain.is_complete(&name_value(None, None), &channel, &locale));
    }

    #[test]
    fn supporting_but_incomplete_checker_does_not_end_the_chain() {
        let (channel, locale) = pair();
        for order in [[false, true], [true, false]] {
            let chain = ChainedChecker::new()
                .with_checker(Scripted::new(true, order[0]))
                .with_checker(Scripted::new(true, order[1]));
            assert!(
                chain.is_complete(&name_value(None, None), &channel, &locale),
                "order {order:?}"
            );
        }
    }

    #[test]
    fn first_match_stops_the_chain() {
        let (channel, locale) = pair();
        let later = Scripted::new(true, true);
        let later_supports = Arc::clone(&later.supports_calls);
        let chain = ChainedChecker::new()
            .with_checker(Scripted::new(true, true))
            .with_checker(later);

        assert!(chain.is_complete(&name_value(None, None), &channel, &locale));
        assert_eq!(later_supports.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsupported_checker_is_never_asked_for_completeness() {
        let (channel, locale) = pair();
        let skipped = Scripted::new(false, true);
        let skipped_complete = Arc::clone(&skipped.complete_calls);
        let chain = ChainedChecker::new().with_checker(skipped);

        assert!(!chain.is_complete(&name_value(None, None), &channel, &locale));
        assert_eq!(skipped_complete.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn chain_supports_value_follows_scope_rule() {
        let (channel, locale) = pair();
        let chain = ChainedChecker::with_defaults();
        assert!(chain.supports_value(&name_value(None, None), &channel, &locale));
        assert!(chain.supports_value(&name_value(Some("ecommerce"), Some("en_US")), &channel, &locale));
        assert!(!chain.supports_value(&name_value(Some("print"), None), &channel, &locale));
        assert!(!chain.supports_value(&name_value(None, Some("fr_FR")), &channel, &locale));
    }

    #[test]
    fn default_chain_checks_real_values() {
        let (channel, locale) = pair();
        let chain = ChainedChecker::with_defaults();
        assert_eq!(chain.len(), BackendChecker::all().len());
        assert!(chain.is_complete(&name_value(None, None), &channel, &locale));
        assert!(!chain.is_complete(&name_value(Some("print"), None), &channel, &locale));
    }
}
