use std::path::Path;

use super::*;

const MINIMAL: &str = r"
locales: [en_US, fr_FR]
channels:
  - code: ecommerce
    locales: [en_US, fr_FR]
    currencies: [USD, EUR]
  - code: print
    locales: [fr_FR]
attributes:
  - code: sku
    type: pim_catalog_identifier
  - code: name
    type: pim_catalog_text
    localizable: true
  - code: color
    type: pim_catalog_simpleselect
  - code: fabrics
    type: pim_reference_data_multiselect
    reference_data_name: fabrics
options:
  - attribute: color
    codes: [red, blue]
reference_data:
  fabrics:
    - code: silk
      label: Silk
families:
  - code: shirts
    attributes: [sku, name, color, fabrics]
    requirements:
      ecommerce: [sku, name]
      print: [sku]
";

fn parse(yaml: &str) -> Result<Catalog, ConfigError> {
    Catalog::from_yaml_str(yaml)
}

fn validation_message(yaml: &str) -> String {
    match parse(yaml) {
        Err(ConfigError::Validation(msg)) => msg,
        other => panic!("expected validation error, got: {other:?}"),
    }
}

#[test]
fn parses_minimal_catalog() {
    let catalog = parse(MINIMAL).expect("minimal catalog should load");
    assert_eq!(catalog.locales().len(), 2);
    assert_eq!(catalog.channels().len(), 2);
    assert_eq!(catalog.attributes().count(), 4);
    assert_eq!(
        catalog.channel("ecommerce").unwrap().currencies,
        vec!["USD".to_string(), "EUR".to_string()]
    );
    assert_eq!(catalog.identifier_attribute().unwrap().code, "sku");
}

#[test]
fn family_requirements_are_expanded_per_channel() {
    let catalog = parse(MINIMAL).unwrap();
    let shirts = catalog.family("shirts").unwrap();

    // 4 attributes on 2 channels
    assert_eq!(shirts.requirements().len(), 8);

    let ecommerce: Vec<&str> = shirts.required_attribute_codes("ecommerce").collect();
    assert_eq!(ecommerce, ["sku", "name"]);
    let print: Vec<&str> = shirts.required_attribute_codes("print").collect();
    assert_eq!(print, ["sku"]);
}

#[test]
fn catalog_serves_as_repositories() {
    let catalog = parse(MINIMAL).unwrap();

    assert!(AttributeRepository::find_one_by_code(&catalog, "name").is_some());
    assert!(AttributeRepository::find_one_by_code(&catalog, "weight").is_none());
    assert!(catalog.find_one_by_identifier("color.red").is_some());
    assert!(catalog.find_one_by_identifier("color.green").is_none());

    let fabrics = catalog.resolve("fabrics").unwrap();
    assert_eq!(
        fabrics.find_one_by_code("silk").unwrap().label.as_deref(),
        Some("Silk")
    );
    assert!(catalog.resolve("colors").is_none());
}

#[test]
fn channel_without_locales_is_accepted() {
    let yaml = r"
locales: [en_US]
channels:
  - code: mobile
attributes: []
";
    let catalog = parse(yaml).unwrap();
    assert_eq!(catalog.channel("mobile").unwrap().locales.len(), 0);
}

#[test]
fn validate_rejects_duplicate_locale() {
    let msg = validation_message(
        r"
locales: [en_US, en_US]
channels: []
attributes: []
",
    );
    assert!(msg.contains("duplicate locale"), "{msg}");
}

#[test]
fn validate_rejects_channel_with_unknown_locale() {
    let msg = validation_message(
        r"
locales: [en_US]
channels:
  - code: ecommerce
    locales: [de_DE]
attributes: []
",
    );
    assert!(msg.contains("unknown locale 'de_DE'"), "{msg}");
}

#[test]
fn validate_rejects_duplicate_attribute() {
    let msg = validation_message(
        r"
locales: [en_US]
channels: []
attributes:
  - code: name
    type: pim_catalog_text
  - code: name
    type: pim_catalog_textarea
",
    );
    assert!(msg.contains("duplicate attribute: 'name'"), "{msg}");
}

#[test]
fn validate_rejects_reference_data_attribute_without_name() {
    let msg = validation_message(
        r"
locales: [en_US]
channels: []
attributes:
  - code: fabrics
    type: pim_reference_data_multiselect
",
    );
    assert!(msg.contains("needs a reference_data_name"), "{msg}");
}

#[test]
fn validate_rejects_options_on_text_attribute() {
    let msg = validation_message(
        r"
locales: [en_US]
channels: []
attributes:
  - code: name
    type: pim_catalog_text
options:
  - attribute: name
    codes: [a]
",
    );
    assert!(msg.contains("options declared for attribute 'name'"), "{msg}");
}

#[test]
fn validate_rejects_requirement_outside_family_attributes() {
    let msg = validation_message(
        r"
locales: [en_US]
channels:
  - code: ecommerce
    locales: [en_US]
attributes:
  - code: sku
    type: pim_catalog_identifier
  - code: name
    type: pim_catalog_text
families:
  - code: shirts
    attributes: [sku]
    requirements:
      ecommerce: [name]
",
    );
    assert!(msg.contains("requires 'name' on 'ecommerce'"), "{msg}");
}

#[test]
fn validate_rejects_requirement_on_unknown_channel() {
    let msg = validation_message(
        r"
locales: [en_US]
channels: []
attributes:
  - code: sku
    type: pim_catalog_identifier
families:
  - code: shirts
    attributes: [sku]
    requirements:
      print: [sku]
",
    );
    assert!(msg.contains("unknown channel 'print'"), "{msg}");
}

#[test]
fn unknown_attribute_type_is_a_parse_error() {
    let yaml = r"
locales: [en_US]
channels: []
attributes:
  - code: name
    type: pim_catalog_wysiwyg
";
    assert!(matches!(parse(yaml), Err(ConfigError::CatalogFileParse(_))));
}

#[test]
fn load_catalog_reports_missing_file() {
    let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("catalog.yaml");
    assert!(
        path.exists(),
        "catalog.yaml missing at {path:?}, required for this test"
    );
    let catalog = load_catalog(&path).expect("failed to load catalog.yaml");
    assert!(catalog.identifier_attribute().is_some());
    assert!(catalog.families().count() > 0);
    // load_catalog validates, so reaching here means every reference resolves.
}
