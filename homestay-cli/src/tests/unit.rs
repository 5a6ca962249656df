//! Focused unit tests covering command configuration and output.

use super::helpers::{CatalogDir, parse_output, result_ids, scenario_records};
use super::*;
use crate::output::{PriceResponse, emit};
use crate::predict::{PredictPriceArgs, PredictPriceConfig, execute_predict_price};
use crate::recommend::{RecommendArgs, RecommendConfig, execute_recommend};
use crate::similar::{SimilarArgs, SimilarConfig, execute_similar};
use camino::Utf8PathBuf;
use homestay_scorer::{DEFAULT_PERSONALISED_LIMIT, DEFAULT_SIMILAR_LIMIT, PriceEstimate};
use rstest::rstest;

fn expect_missing(err: CliError, expected_field: &str, expected_env: &str) {
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn similar_requires_catalog_and_item() {
    let err = SimilarConfig::try_from(SimilarArgs::default()).expect_err("catalog missing");
    expect_missing(err, ARG_CATALOG, ENV_SIMILAR_CATALOG);

    let args = SimilarArgs {
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        ..SimilarArgs::default()
    };
    let err = SimilarConfig::try_from(args).expect_err("item missing");
    expect_missing(err, ARG_ITEM, ENV_SIMILAR_ITEM);
}

#[rstest]
fn limits_default_per_command() {
    let similar = SimilarConfig::try_from(SimilarArgs {
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        item: Some(1),
        ..SimilarArgs::default()
    })
    .expect("similar config");
    assert_eq!(similar.limit, DEFAULT_SIMILAR_LIMIT);

    let recommend = RecommendConfig::try_from(RecommendArgs {
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        ..RecommendArgs::default()
    })
    .expect("recommend config");
    assert_eq!(recommend.limit, DEFAULT_PERSONALISED_LIMIT);
    assert!(recommend.history.is_empty());
}

#[rstest]
#[case::kind(ARG_KIND, ENV_PREDICT_KIND)]
#[case::city(ARG_CITY, ENV_PREDICT_CITY)]
#[case::bedrooms(ARG_BEDROOMS, ENV_PREDICT_BEDROOMS)]
#[case::guests(ARG_GUESTS, ENV_PREDICT_GUESTS)]
fn predict_price_requires_draft_fields(#[case] omitted: &'static str, #[case] env: &'static str) {
    let mut args = PredictPriceArgs {
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        kind: Some("VILLA".to_owned()),
        city: Some("Đà Lạt".to_owned()),
        bedrooms: Some(4),
        guests: Some(8),
        ..PredictPriceArgs::default()
    };
    match omitted {
        ARG_KIND => args.kind = None,
        ARG_CITY => args.city = None,
        ARG_BEDROOMS => args.bedrooms = None,
        _ => args.guests = None,
    }
    let err = PredictPriceConfig::try_from(args).expect_err("draft field missing");
    expect_missing(err, omitted, env);
}

#[rstest]
fn predict_price_carries_optional_fields() {
    let config = PredictPriceConfig::try_from(PredictPriceArgs {
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        kind: Some("VILLA".to_owned()),
        city: Some("Đà Lạt".to_owned()),
        bedrooms: Some(4),
        guests: Some(8),
        rating: Some(4.8),
        price: None,
        output: None,
    })
    .expect("predict config");
    assert_eq!(config.draft.rating, Some(4.8));
    assert_eq!(config.draft.price, None);
    assert_eq!(config.draft.max_guests, 8);
}

#[rstest]
fn similar_writes_ranked_json() {
    let dir = CatalogDir::new();
    let config = SimilarConfig {
        catalog: dir.write_catalog(&scenario_records()),
        item: 1,
        limit: 2,
        output: None,
    };
    let mut stdout = Vec::new();
    execute_similar(&config, &mut stdout).expect("similar succeeds");
    let response = parse_output(&stdout);
    assert_eq!(response["strategy"], "similar");
    assert_eq!(response["reference"], 1);
    assert_eq!(result_ids(&response), vec![2, 3]);
}

#[rstest]
fn similar_rejects_unknown_reference() {
    let dir = CatalogDir::new();
    let config = SimilarConfig {
        catalog: dir.write_catalog(&scenario_records()),
        item: 99,
        limit: 2,
        output: None,
    };
    let err = execute_similar(&config, &mut Vec::new()).expect_err("unknown reference");
    assert!(matches!(err, CliError::UnknownItem { field: ARG_ITEM, id: 99 }));
}

#[rstest]
fn recommend_without_history_reports_popularity() {
    let dir = CatalogDir::new();
    let config = RecommendConfig {
        catalog: dir.write_catalog(&scenario_records()),
        history: Vec::new(),
        limit: 8,
        output: None,
    };
    let mut stdout = Vec::new();
    execute_recommend(&config, &mut stdout).expect("recommend succeeds");
    let response = parse_output(&stdout);
    assert_eq!(response["strategy"], "popular");
    assert!(response.get("history").is_none());
    assert_eq!(result_ids(&response), vec![3, 1, 2]);
}

#[rstest]
fn recommend_rejects_unknown_history() {
    let dir = CatalogDir::new();
    let config = RecommendConfig {
        catalog: dir.write_catalog(&scenario_records()),
        history: vec![2, 77],
        limit: 8,
        output: None,
    };
    let err = execute_recommend(&config, &mut Vec::new()).expect_err("unknown history item");
    assert!(matches!(err, CliError::UnknownItem { field: ARG_HISTORY, id: 77 }));
}

#[rstest]
fn predict_price_writes_to_output_file() {
    let dir = CatalogDir::new();
    let output = dir.root().join("reports/price.json");
    let config = PredictPriceConfig {
        catalog: dir.write_catalog(&scenario_records()),
        draft: homestay_core::ListingDraft::new("VILLA", "Đà Lạt", 4, 8).with_rating(4.8),
        output: Some(output.clone()),
    };
    let mut stdout = Vec::new();
    execute_predict_price(&config, &mut stdout).expect("prediction succeeds");
    assert!(stdout.is_empty());

    let written = std::fs::read(output.as_std_path()).expect("read output file");
    let response = parse_output(&written);
    assert_eq!(response["price"], 4_100_000.0);
    assert_eq!(response["basis"], "comparables");
    assert_eq!(response["comparables"], 2);
}

#[rstest]
fn fallback_estimates_report_no_comparables() {
    let response = PriceResponse::from(PriceEstimate::Fallback { price: 2_750_000.0 });
    let mut stdout = Vec::new();
    emit(&response, None, &mut stdout).expect("emit succeeds");
    let value = parse_output(&stdout);
    assert_eq!(value["basis"], "fallback");
    assert_eq!(value["comparables"], 0);
    assert_eq!(value["price"], 2_750_000.0);
}

#[rstest]
fn cli_parses_history_lists() {
    let cli = Cli::try_parse_from(["homestay", "recommend", "catalog.json", "--history", "1,2"])
        .expect("arguments parse");
    match cli.command {
        Command::Recommend(args) => assert_eq!(args.history, vec![1, 2]),
        other => panic!("expected recommend, found {other:?}"),
    }
}
