//! Unit tests for the catalog adapter.

use super::helpers::{CatalogDir, scenario_records, write_utf8};
use super::*;
use crate::catalog::{find_item, load_catalog, parse_catalog, require_existing};
use camino::Utf8Path;
use homestay_core::CatalogItemError;
use rstest::rstest;
use serde_json::json;

fn parse(records: &serde_json::Value) -> Result<Vec<homestay_core::CatalogItem>, CliError> {
    parse_catalog(Utf8Path::new("catalog.json"), &records.to_string())
}

#[rstest]
fn loose_records_are_coerced() {
    let items = parse(&scenario_records()).expect("scenario catalog parses");
    assert_eq!(items.len(), 3);

    let second = &items[1];
    assert_eq!(second.kind, "VILLA");
    assert_eq!(second.max_guests, 7);
    assert_eq!(second.review_count, 80);
    assert_eq!(second.latitude(), 11.9520);
    assert_eq!(second.longitude(), 108.4410);

    let third = &items[2];
    assert_eq!(third.kind, "APARTMENT");
    assert!(third.amenities.is_empty());
    assert!(third.state.is_none());
    assert!(!third.featured);
}

#[rstest]
fn absent_numbers_default_to_zero() {
    let items = parse(&json!([
        { "id": 9, "kind": "HOMESTAY", "city": "Huế", "latitude": 16.46, "longitude": 107.59 }
    ]))
    .expect("minimal record parses");
    let item = &items[0];
    assert_eq!(item.price, 0.0);
    assert_eq!(item.bedrooms, 0);
    assert_eq!(item.max_guests, 0);
    assert_eq!(item.rating, 0.0);
    assert_eq!(item.review_count, 0);
}

#[rstest]
fn empty_states_are_dropped() {
    let items = parse(&json!([
        {
            "id": 9, "kind": "HOMESTAY", "city": "Huế", "state": "",
            "latitude": 16.46, "longitude": 107.59
        }
    ]))
    .expect("record parses");
    assert!(items[0].state.is_none());
}

#[rstest]
fn invalid_records_name_the_item() {
    let err = parse(&json!([
        {
            "id": 5, "kind": "VILLA", "city": "Huế", "rating": 7.5,
            "latitude": 16.46, "longitude": 107.59
        }
    ]))
    .expect_err("rating above five is rejected");
    match err {
        CliError::InvalidItem { id, source } => {
            assert_eq!(id, 5);
            assert!(matches!(source, CatalogItemError::RatingOutOfRange { .. }));
        }
        other => panic!("expected InvalidItem, found {other:?}"),
    }
}

#[rstest]
fn duplicate_identifiers_are_rejected() {
    let record = json!({
        "id": 4, "kind": "VILLA", "city": "Huế",
        "latitude": 16.46, "longitude": 107.59
    });
    let err = parse(&json!([record.clone(), record])).expect_err("duplicates are rejected");
    assert!(matches!(err, CliError::DuplicateItem { id: 4 }));
}

#[rstest]
#[case::not_an_array(json!({ "id": 1 }))]
#[case::missing_city(json!([{ "id": 1, "kind": "VILLA", "latitude": 0.0, "longitude": 0.0 }]))]
#[case::missing_coordinates(json!([{ "id": 1, "kind": "VILLA", "city": "Huế" }]))]
fn malformed_catalogs_fail_to_parse(#[case] records: serde_json::Value) {
    let err = parse(&records).expect_err("malformed catalog");
    match err {
        CliError::ParseCatalog { path, .. } => assert_eq!(path, "catalog.json"),
        other => panic!("expected ParseCatalog, found {other:?}"),
    }
}

#[rstest]
fn load_catalog_reads_from_disk() {
    let dir = CatalogDir::new();
    let path = dir.write_catalog(&scenario_records());
    let items = load_catalog(&path).expect("catalog loads");
    assert_eq!(items.iter().map(|item| item.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[rstest]
fn load_catalog_reports_unreadable_files() {
    let dir = CatalogDir::new();
    let path = dir.root().join("absent.json");
    let err = load_catalog(&path).expect_err("missing catalog");
    match err {
        CliError::ReadCatalog { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ReadCatalog, found {other:?}"),
    }
}

#[rstest]
fn require_existing_distinguishes_missing_and_directories() {
    let dir = CatalogDir::new();
    let missing = dir.root().join("missing.json");
    assert!(matches!(
        require_existing(&missing, ARG_CATALOG),
        Err(CliError::MissingSourceFile { field: ARG_CATALOG, .. })
    ));

    let folder = dir.root().join("folder.json");
    std::fs::create_dir(folder.as_std_path()).expect("create directory");
    assert!(matches!(
        require_existing(&folder, ARG_CATALOG),
        Err(CliError::SourcePathNotFile { field: ARG_CATALOG, .. })
    ));

    let present = dir.root().join("present.json");
    write_utf8(&present, b"[]");
    assert!(require_existing(&present, ARG_CATALOG).is_ok());
}

#[rstest]
fn find_item_reports_unknown_identifiers() {
    let items = parse(&scenario_records()).expect("scenario catalog parses");
    assert_eq!(find_item(&items, 2, ARG_ITEM).expect("present").id, 2);
    assert!(matches!(
        find_item(&items, 42, ARG_ITEM),
        Err(CliError::UnknownItem { field: ARG_ITEM, id: 42 })
    ));
}
