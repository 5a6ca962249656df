//! Behaviour-driven step definitions driving the CLI command scenarios.

use super::helpers::{CatalogDir, parse_output, result_ids, scenario_records};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use std::cell::RefCell;

/// Aggregates command scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CommandWorld {
    catalog_dir: CatalogDir,
    catalog_path: RefCell<Option<Utf8PathBuf>>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            catalog_dir: CatalogDir::new(),
            catalog_path: RefCell::new(None),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn catalog_path(&self) -> String {
        self.catalog_path
            .borrow()
            .as_ref()
            .expect("catalog must be written first")
            .as_str()
            .to_owned()
    }

    fn push_args<const N: usize>(&self, args: [&str; N]) {
        let mut invocation = vec!["homestay".to_owned()];
        invocation.extend(args.iter().map(|arg| (*arg).to_owned()));
        *self.cli_args.borrow_mut() = invocation;
    }

    fn response(&self) -> Value {
        parse_output(&self.stdout.borrow())
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a catalog export with two villas and an apartment")]
fn scenario_catalog_export(#[from(world)] world: &CommandWorld) {
    let path = world.catalog_dir.write_catalog(&scenario_records());
    *world.catalog_path.borrow_mut() = Some(path);
}

#[given("a catalog export containing a listing rated 7")]
fn invalid_catalog_export(#[from(world)] world: &CommandWorld) {
    let records = json!([
        {
            "id": 8, "kind": "VILLA", "city": "Huế", "rating": 7.0,
            "latitude": 16.46, "longitude": 107.59
        }
    ]);
    let path = world.catalog_dir.write_catalog(&records);
    *world.catalog_path.borrow_mut() = Some(path);
}

#[given("I pass the similar command for item 1 with a limit of 2")]
fn similar_command(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog_path();
    world.push_args(["similar", catalog.as_str(), "--item", "1", "--limit", "2"]);
}

#[given("I pass the similar command without an item")]
fn similar_without_item(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog_path();
    world.push_args(["similar", catalog.as_str()]);
}

#[given("I pass the recommend command without history")]
fn recommend_command(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog_path();
    world.push_args(["recommend", catalog.as_str()]);
}

#[given("I pass the predict-price command for a four bedroom villa in Đà Lạt")]
fn predict_price_command(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog_path();
    world.push_args([
        "predict-price",
        catalog.as_str(),
        "--kind",
        "VILLA",
        "--city",
        "Đà Lạt",
        "--bedrooms",
        "4",
        "--guests",
        "8",
        "--rating",
        "4.8",
    ]);
}

#[when("I run the homestay command")]
fn run_homestay(#[from(world)] world: &CommandWorld) {
    let invocation = world.cli_args.borrow().clone();
    let mut stdout = world.stdout.borrow_mut();
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| run_command(cli.command, &mut *stdout));
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let outcome = borrowed.as_ref().expect("result recorded");
    assert!(outcome.is_ok(), "command failed: {outcome:?}");
}

#[then("the results list items 2 then 3")]
fn results_two_then_three(#[from(world)] world: &CommandWorld) {
    assert_eq!(result_ids(&world.response()), vec![2, 3]);
}

#[then("the response strategy is popular")]
fn strategy_is_popular(#[from(world)] world: &CommandWorld) {
    let response = world.response();
    assert_eq!(response["strategy"], "popular");
    assert_eq!(result_ids(&response), vec![3, 1, 2]);
}

#[then("the suggested price is 4100000")]
fn suggested_price(#[from(world)] world: &CommandWorld) {
    let response = world.response();
    assert_eq!(response["price"], 4_100_000.0);
    assert_eq!(response["basis"], "comparables");
}

#[then("the CLI reports that item 8 is invalid")]
fn reports_invalid_item(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::InvalidItem { id, .. } => assert_eq!(*id, 8),
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("the CLI reports that the \"item\" flag is missing")]
fn reports_missing_item(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_ITEM),
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(similar_listings, "Finding listings similar to a villa");
register_command_scenario!(recommend_without_history, "Recommending to a guest without history");
register_command_scenario!(price_suggestion, "Suggesting a price for a villa draft");
register_command_scenario!(invalid_rating, "Rejecting a catalog record with an impossible rating");
register_command_scenario!(missing_reference, "Rejecting a missing reference item");
