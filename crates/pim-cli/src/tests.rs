use pim_core::{load_catalog, Catalog};
use serde_json::json;

use super::*;
use crate::completeness::{completeness_report, load_and_calculate};
use crate::index::bulk_lines;
use crate::search::build_search;

fn workspace_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

fn demo_catalog() -> Arc<Catalog> {
    Arc::new(load_catalog(&workspace_file("config/catalog.yaml")).expect("demo catalog loads"))
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pim"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.catalog.is_none());
}

#[test]
fn parses_completeness_command() {
    let cli = Cli::try_parse_from([
        "pim",
        "completeness",
        "--products",
        "config/products.json",
        "--incomplete-only",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Completeness {
            ref products,
            incomplete_only: true,
            json: false
        }) if products == &PathBuf::from("config/products.json")
    ));
}

#[test]
fn completeness_requires_products() {
    assert!(Cli::try_parse_from(["pim", "completeness"]).is_err());
}

#[test]
fn global_catalog_flag_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pim",
        "index",
        "--products",
        "p.json",
        "--catalog",
        "other.yaml",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.catalog, Some(PathBuf::from("other.yaml")));
    assert!(matches!(cli.command, Some(Commands::Index { .. })));
}

#[test]
fn parses_repeated_search_criteria() {
    let cli = Cli::try_parse_from([
        "pim",
        "search",
        "--filter",
        "name:CONTAINS:shirt",
        "--filter",
        "color:IN:[\"red\",\"blue\"]",
        "--filter",
        "description:EMPTY",
        "--sort",
        "name:desc",
        "--locale",
        "en_US",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search {
        filters,
        sorts,
        locale,
        scope,
    }) = cli.command
    else {
        panic!("expected search command");
    };

    assert_eq!(
        filters,
        vec![
            FilterArg {
                field: "name".to_string(),
                operator: pim_index::Operator::Contains,
                value: json!("shirt"),
            },
            FilterArg {
                field: "color".to_string(),
                operator: pim_index::Operator::In,
                value: json!(["red", "blue"]),
            },
            FilterArg {
                field: "description".to_string(),
                operator: pim_index::Operator::IsEmpty,
                value: serde_json::Value::Null,
            },
        ]
    );
    assert_eq!(sorts[0].direction, pim_index::Direction::Descending);
    assert_eq!(locale.as_deref(), Some("en_US"));
    assert!(scope.is_none());
}

#[test]
fn unknown_operator_is_a_parse_error() {
    let result = Cli::try_parse_from(["pim", "search", "--filter", "name:LIKE:x"]);
    assert!(result.is_err());
}

#[test]
fn filter_value_keeps_colons() {
    let filter: FilterArg = "price:<:{\"amount\":50,\"currency\":\"USD\"}".parse().unwrap();
    assert_eq!(filter.operator, pim_index::Operator::LowerThan);
    assert_eq!(filter.value, json!({"amount": 50, "currency": "USD"}));
}

#[test]
fn sort_defaults_to_ascending() {
    let sort: SortArg = "stock_count".parse().unwrap();
    assert_eq!(sort.direction, pim_index::Direction::Ascending);
    assert!(":DESC".parse::<SortArg>().is_err());
}

#[test]
fn search_context_is_narrowed_per_attribute() {
    let filters = [
        "name:STARTS WITH:Red".parse::<FilterArg>().unwrap(),
        "color:IN:[\"red\"]".parse::<FilterArg>().unwrap(),
        "family:IN:[\"shirts\"]".parse::<FilterArg>().unwrap(),
    ];
    let sorts = ["stock_count:DESC".parse::<SortArg>().unwrap()];
    let context = FilterContext {
        locale: Some("en_US".to_string()),
        scope: Some("ecommerce".to_string()),
        ..FilterContext::default()
    };

    let body = build_search(demo_catalog(), &filters, &sorts, &context).unwrap();

    assert_eq!(
        body["query"]["constant_score"]["filter"]["bool"]["filter"],
        json!([
            {"query_string": {
                "default_field": "values.name-pim_catalog_text.en_US.<all_channels>",
                "query": "Red*"
            }},
            {"terms": {"values.color-pim_catalog_simpleselect.<all_locales>.<all_channels>": ["red"]}},
            {"terms": {"family": ["shirts"]}}
        ])
    );
    assert_eq!(
        body["sort"],
        json!([{"values.stock_count-pim_catalog_number.<all_locales>.<all_channels>":
            {"order": "desc", "missing": "_last"}}])
    );
}

#[test]
fn search_rejects_unknown_field() {
    let filters = ["brand:=:acme".parse::<FilterArg>().unwrap()];
    let err = build_search(demo_catalog(), &filters, &[], &FilterContext::default()).unwrap_err();
    assert!(err.to_string().contains("brand"), "{err}");
}

#[tokio::test]
async fn demo_products_completeness() {
    let results = load_and_calculate(demo_catalog(), &workspace_file("config/products.json"), 2)
        .await
        .unwrap();

    let identifiers: Vec<&str> = results.iter().map(|(p, _)| p.identifier.as_str()).collect();
    assert_eq!(
        identifiers,
        ["shirt-silk-red", "shirt-cotton-blue", "belt-leather", "gift-card"]
    );

    let silk = &results[0].1;
    assert_eq!(silk.len(), 4);
    assert!(silk.get("ecommerce", "en_US").unwrap().is_complete());
    let ecommerce_fr = silk.get("ecommerce", "fr_FR").unwrap();
    assert_eq!(
        ecommerce_fr.missing_attribute_codes().iter().collect::<Vec<_>>(),
        ["description"]
    );
    let print_de = silk.get("print", "de_DE").unwrap();
    assert_eq!(print_de.required_count(), 3);
    assert_eq!(
        print_de.missing_attribute_codes().iter().collect::<Vec<_>>(),
        ["name"]
    );

    assert_eq!(results[2].1.incomplete().count(), 0);
    assert!(results[3].1.is_empty());
}

#[tokio::test]
async fn incomplete_only_report_drops_complete_pairs() {
    let results = load_and_calculate(demo_catalog(), &workspace_file("config/products.json"), 4)
        .await
        .unwrap();

    let report = completeness_report(&results, true);
    assert_eq!(report[2]["identifier"], "belt-leather");
    assert_eq!(report[2]["completenesses"], json!([]));
    assert_eq!(report[3]["family"], serde_json::Value::Null);

    let silk_pairs = report[0]["completenesses"].as_array().unwrap();
    assert!(silk_pairs.iter().all(|pair| pair["ratio"] != 100));
}

#[tokio::test]
async fn bulk_body_pairs_actions_with_documents() {
    let results = load_and_calculate(demo_catalog(), &workspace_file("config/products.json"), 4)
        .await
        .unwrap();

    let lines = bulk_lines("products", &results).unwrap();
    assert_eq!(lines.len(), 8);
    assert_eq!(
        lines[0],
        json!({"index": {"_index": "products", "_id": "shirt-silk-red"}})
    );
    assert_eq!(lines[1]["identifier"], "shirt-silk-red");
    assert_eq!(lines[1]["completeness"]["ecommerce"]["en_US"], 100);
    assert_eq!(
        lines[1]["values"]["color-option"]["<all_locales>"]["<all_channels>"],
        "red"
    );
    assert_eq!(lines[7]["completeness"], json!({}));
}
