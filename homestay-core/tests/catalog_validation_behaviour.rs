//! Behavioural coverage for boundary validation of catalog items.

use std::cell::RefCell;

use geo::Coord;
use homestay_core::{CatalogItem, CatalogItemError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Scenario state shared between steps.
struct ValidationContext {
    item: RefCell<Option<CatalogItem>>,
    outcome: RefCell<Option<Result<(), CatalogItemError>>>,
}

#[fixture]
fn context() -> ValidationContext {
    ValidationContext {
        item: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

fn villa() -> CatalogItem {
    CatalogItem::new(
        42,
        "VILLA",
        "Đà Lạt",
        Coord {
            x: 108.4583,
            y: 11.9404,
        },
    )
    .with_price(3_500_000.0)
    .with_capacity(4, 8)
    .with_rating(4.9, 40)
}

#[given("a villa listing in Đà Lạt")]
fn villa_listing(context: &ValidationContext) {
    *context.item.borrow_mut() = Some(villa());
}

#[given("a villa listing placed north of the pole")]
fn villa_beyond_pole(context: &ValidationContext) {
    let mut item = villa();
    item.location = Coord { x: 108.0, y: 95.0 };
    *context.item.borrow_mut() = Some(item);
}

#[given("a villa listing with a negative price")]
fn villa_negative_price(context: &ValidationContext) {
    *context.item.borrow_mut() = Some(villa().with_price(-10.0));
}

#[when("I validate the listing")]
fn validate_listing(context: &ValidationContext) {
    let outcome = context
        .item
        .borrow()
        .as_ref()
        .map(CatalogItem::validate);
    *context.outcome.borrow_mut() = outcome;
}

#[then("the listing is accepted")]
fn listing_accepted(context: &ValidationContext) {
    assert_eq!(*context.outcome.borrow(), Some(Ok(())));
}

#[then("a latitude error is reported")]
fn latitude_error(context: &ValidationContext) {
    assert!(matches!(
        *context.outcome.borrow(),
        Some(Err(CatalogItemError::LatitudeOutOfRange { id: 42, .. }))
    ));
}

#[then("a price error is reported")]
fn price_error(context: &ValidationContext) {
    assert!(matches!(
        *context.outcome.borrow(),
        Some(Err(CatalogItemError::InvalidNumber {
            field: "price",
            ..
        }))
    ));
}

#[scenario(path = "tests/features/catalog_validation.feature", index = 0)]
fn well_formed_listing_passes(context: ValidationContext) {
    let _ = context;
}

#[scenario(path = "tests/features/catalog_validation.feature", index = 1)]
fn impossible_latitude_rejected(context: ValidationContext) {
    let _ = context;
}

#[scenario(path = "tests/features/catalog_validation.feature", index = 2)]
fn negative_price_rejected(context: ValidationContext) {
    let _ = context;
}
