use std::sync::Arc;

use pim_core::{
    Attribute, AttributeType, Channel, Family, Locale, Price, ProductValue, ValueData,
};
use rust_decimal::Decimal;

use super::*;

struct Catalog {
    sku: Arc<Attribute>,
    name: Arc<Attribute>,
    description: Arc<Attribute>,
    legal_notice: Arc<Attribute>,
    price: Arc<Attribute>,
    ecommerce: Arc<Channel>,
    print: Arc<Channel>,
}

fn catalog() -> Catalog {
    Catalog {
        sku: Arc::new(Attribute::new("sku", AttributeType::Identifier)),
        name: Arc::new(Attribute::new("name", AttributeType::Text).with_localizable(true)),
        description: Arc::new(
            Attribute::new("description", AttributeType::Textarea)
                .with_localizable(true)
                .with_scopable(true),
        ),
        legal_notice: Arc::new(
            Attribute::new("legal_notice", AttributeType::Textarea)
                .with_localizable(true)
                .with_available_locales(["fr_FR"]),
        ),
        price: Arc::new(Attribute::new("price", AttributeType::PriceCollection).with_scopable(true)),
        ecommerce: Arc::new(
            Channel::new("ecommerce", ["en_US", "fr_FR"]).with_currencies(["USD"]),
        ),
        print: Arc::new(Channel::new("print", ["fr_FR"]).with_currencies(["EUR"])),
    }
}

fn text(attribute: &Arc<Attribute>, scope: Option<&str>, locale: Option<&str>, data: &str) -> ProductValue {
    ProductValue::new(
        Arc::clone(attribute),
        scope,
        locale,
        ValueData::Text(Some(data.to_string())),
    )
    .unwrap()
}

fn shirts(c: &Catalog) -> Arc<Family> {
    Arc::new(
        Family::new("shirts")
            .with_requirement(Arc::clone(&c.sku), Arc::clone(&c.ecommerce), true)
            .with_requirement(Arc::clone(&c.name), Arc::clone(&c.ecommerce), true)
            .with_requirement(Arc::clone(&c.description), Arc::clone(&c.ecommerce), false)
            .with_requirement(Arc::clone(&c.sku), Arc::clone(&c.print), true)
            .with_requirement(Arc::clone(&c.legal_notice), Arc::clone(&c.print), true),
    )
}

fn codes(c: &Completeness) -> Vec<&str> {
    c.missing_attribute_codes().iter().map(String::as_str).collect()
}

#[test]
fn product_without_family_has_no_completeness() {
    let calculator = CompletenessCalculator::default();
    let product = Product::new("orphan");
    assert!(calculator.calculate(&product).is_empty());
}

#[test]
fn empty_product_misses_every_required_attribute() {
    let c = catalog();
    let product = Product::new("shirt").with_family(shirts(&c));
    let result = CompletenessCalculator::default().calculate(&product);

    assert_eq!(result.len(), 3);

    let en = result.get("ecommerce", "en_US").unwrap();
    assert_eq!(en.required_count(), 2);
    assert_eq!(codes(en), ["name", "sku"]);
    assert_eq!(en.ratio(), 0);

    let print = result.get("print", "fr_FR").unwrap();
    assert_eq!(print.required_count(), 2);
    assert_eq!(codes(print), ["legal_notice", "sku"]);
}

#[test]
fn filled_values_are_not_missing() {
    let c = catalog();
    let mut product = Product::new("shirt").with_family(shirts(&c));
    product.add_value(text(&c.sku, None, None, "shirt"));
    product.add_value(text(&c.name, None, Some("en_US"), "Shirt"));

    let result = CompletenessCalculator::default().calculate(&product);

    let en = result.get("ecommerce", "en_US").unwrap();
    assert!(en.is_complete());
    assert_eq!(en.ratio(), 100);

    let fr = result.get("ecommerce", "fr_FR").unwrap();
    assert_eq!(codes(fr), ["name"]);
    assert_eq!(fr.ratio(), 50);

    let incomplete: Vec<(&str, &str)> = result
        .incomplete()
        .map(|c| (c.channel(), c.locale()))
        .collect();
    assert_eq!(incomplete, [("ecommerce", "fr_FR"), ("print", "fr_FR")]);
}

#[test]
fn empty_string_counts_as_missing() {
    let c = catalog();
    let mut product = Product::new("shirt").with_family(shirts(&c));
    product.add_value(text(&c.sku, None, None, ""));

    let result = CompletenessCalculator::default().calculate(&product);
    assert!(codes(result.get("print", "fr_FR").unwrap()).contains(&"sku"));
}

#[test]
fn non_required_attributes_are_not_counted() {
    let c = catalog();
    let product = Product::new("shirt").with_family(shirts(&c));
    let result = CompletenessCalculator::default().calculate(&product);

    for completeness in result.iter() {
        assert!(!completeness.missing_attribute_codes().contains("description"));
    }
}

#[test]
fn locale_specific_attribute_only_required_on_its_locales() {
    let c = catalog();
    let family = Arc::new(
        Family::new("notices")
            .with_requirement(Arc::clone(&c.legal_notice), Arc::clone(&c.ecommerce), true),
    );
    let product = Product::new("shirt").with_family(family);
    let result = CompletenessCalculator::default().calculate(&product);

    assert_eq!(result.get("ecommerce", "en_US").unwrap().required_count(), 0);
    assert_eq!(result.get("ecommerce", "en_US").unwrap().ratio(), 100);
    assert_eq!(result.get("ecommerce", "fr_FR").unwrap().required_count(), 1);
}

#[test]
fn value_for_another_channel_does_not_count() {
    let c = catalog();
    let family = Arc::new(
        Family::new("priced")
            .with_requirement(Arc::clone(&c.price), Arc::clone(&c.ecommerce), true)
            .with_requirement(Arc::clone(&c.price), Arc::clone(&c.print), true),
    );
    let mut product = Product::new("shirt").with_family(family);
    product.add_value(
        ProductValue::new(
            Arc::clone(&c.price),
            Some("print"),
            None,
            ValueData::Prices(vec![Price::new(Some(Decimal::TEN), "EUR")]),
        )
        .unwrap(),
    );

    let result = CompletenessCalculator::default().calculate(&product);
    assert!(result.get("print", "fr_FR").unwrap().is_complete());
    assert_eq!(codes(result.get("ecommerce", "en_US").unwrap()), ["price"]);
}

#[test]
fn exact_value_wins_over_global_value() {
    let c = catalog();
    let family = Arc::new(
        Family::new("described")
            .with_requirement(Arc::clone(&c.description), Arc::clone(&c.ecommerce), true),
    );
    let mut product = Product::new("shirt").with_family(family);
    product.add_value(text(&c.description, None, None, "generic"));
    product.add_value(text(&c.description, Some("ecommerce"), Some("en_US"), ""));

    let result = CompletenessCalculator::default().calculate(&product);
    assert_eq!(codes(result.get("ecommerce", "en_US").unwrap()), ["description"]);
    assert!(result.get("ecommerce", "fr_FR").unwrap().is_complete());
}

#[test]
fn channel_without_locales_yields_nothing() {
    let c = catalog();
    let mobile = Arc::new(Channel::new("mobile", Vec::<String>::new()));
    let family = Arc::new(Family::new("apps").with_requirement(Arc::clone(&c.sku), mobile, true));
    let product = Product::new("app").with_family(family);

    assert!(CompletenessCalculator::default().calculate(&product).is_empty());
}

#[test]
fn required_count_matches_expanded_triples() {
    let c = catalog();
    let product = Product::new("shirt").with_family(shirts(&c));
    let result = CompletenessCalculator::default().calculate(&product);

    let total: usize = result.iter().map(Completeness::required_count).sum();
    // ecommerce: (sku, name) x (en_US, fr_FR); print: (sku, legal_notice) x fr_FR
    assert_eq!(total, 6);
}

#[test]
fn calculator_uses_the_given_chain() {
    struct AlwaysComplete;

    impl ValueCompleteChecker for AlwaysComplete {
        fn supports_value(&self, _: &ProductValue, _: &Channel, _: &Locale) -> bool {
            true
        }

        fn is_complete(&self, _: &ProductValue, _: &Channel, _: &Locale) -> bool {
            true
        }
    }

    let c = catalog();
    let mut product = Product::new("shirt").with_family(shirts(&c));
    product.add_value(text(&c.sku, None, None, ""));

    let calculator = CompletenessCalculator::new(ChainedChecker::new().with_checker(AlwaysComplete));
    let result = calculator.calculate(&product);

    // sku is present everywhere, so only name / legal_notice can be missing
    assert_eq!(codes(result.get("ecommerce", "en_US").unwrap()), ["name"]);
}
