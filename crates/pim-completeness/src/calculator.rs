use std::collections::{BTreeMap, BTreeSet};

use pim_core::{Completeness, Product, ProductCompletenesses};

use crate::chained::ChainedChecker;
use crate::checker::{BackendChecker, ValueCompleteChecker};

#[derive(Default)]
struct PairTally {
    required: usize,
    missing: BTreeSet<String>,
}

/// Computes a product's completeness for every locale of every channel its
/// family has requirements on.
#[derive(Debug, Clone)]
pub struct CompletenessCalculator<C = BackendChecker> {
    checker: ChainedChecker<C>,
}

impl Default for CompletenessCalculator<BackendChecker> {
    fn default() -> Self {
        Self::new(ChainedChecker::with_defaults())
    }
}

impl<C: ValueCompleteChecker> CompletenessCalculator<C> {
    #[must_use]
    pub fn new(checker: ChainedChecker<C>) -> Self {
        Self { checker }
    }

    /// Completeness per `(channel, locale)`.
    ///
    /// A product without a family yields an empty result. Each required
    /// attribute counts once per channel locale (locale-specific attributes
    /// only on their own locales) and is missing when no applicable value is
    /// complete. Pairs with nothing missing are kept.
    #[must_use]
    pub fn calculate(&self, product: &Product) -> ProductCompletenesses {
        let Some(family) = product.family() else {
            return ProductCompletenesses::new();
        };

        let mut tallies: BTreeMap<(String, String), PairTally> = BTreeMap::new();

        for requirement in family.requirements() {
            let channel = &requirement.channel;
            let attribute = &requirement.attribute;

            for locale in &channel.locales {
                let tally = tallies
                    .entry((channel.code.clone(), locale.code.clone()))
                    .or_default();

                if !requirement.required
                    || (attribute.is_locale_specific() && !attribute.has_locale_specific(&locale.code))
                {
                    continue;
                }

                tally.required += 1;

                let complete = product
                    .values()
                    .find_applicable(attribute, &channel.code, &locale.code)
                    .is_some_and(|value| self.checker.is_complete(value, channel, locale));

                if !complete {
                    tally.missing.insert(attribute.code.clone());
                }
            }
        }

        tallies
            .into_iter()
            .map(|((channel, locale), tally)| {
                Completeness::new(channel, locale, tally.required, tally.missing)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
