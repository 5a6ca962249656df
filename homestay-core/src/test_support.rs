//! Test-only fixtures and scorers shared by unit and behaviour tests.

use geo::Coord;

use crate::{CatalogItem, Scorer};

/// Central Đà Lạt.
pub const DA_LAT: Coord<f64> = Coord {
    x: 108.4583,
    y: 11.9404,
};

/// Central Hà Nội.
pub const HA_NOI: Coord<f64> = Coord {
    x: 105.8342,
    y: 21.0278,
};

/// Identifier of [`villa_x`].
pub const VILLA_X: u64 = 1;
/// Identifier of [`villa_y`].
pub const VILLA_Y: u64 = 2;
/// Identifier of [`apartment_z`].
pub const APARTMENT_Z: u64 = 3;

/// Large hill-side villa in Đà Lạt.
#[must_use]
pub fn villa_x() -> CatalogItem {
    CatalogItem::new(VILLA_X, "VILLA", "Đà Lạt", DA_LAT)
        .with_state("Lâm Đồng")
        .with_price(3_500_000.0)
        .with_capacity(4, 8)
        .with_rating(4.9, 120)
        .with_amenities(["wifi", "pool", "bbq"])
        .with_featured(true)
}

/// Slightly smaller villa a few kilometres from [`villa_x`].
#[must_use]
pub fn villa_y() -> CatalogItem {
    CatalogItem::new(
        VILLA_Y,
        "VILLA",
        "Đà Lạt",
        Coord {
            x: 108.4410,
            y: 11.9520,
        },
    )
    .with_state("Lâm Đồng")
    .with_price(3_200_000.0)
    .with_capacity(4, 7)
    .with_rating(4.7, 80)
    .with_amenities(["wifi", "pool"])
}

/// City apartment in Hà Nội.
#[must_use]
pub fn apartment_z() -> CatalogItem {
    CatalogItem::new(APARTMENT_Z, "APARTMENT", "Hà Nội", HA_NOI)
        .with_price(1_200_000.0)
        .with_capacity(2, 4)
        .with_rating(4.7, 300)
        .with_amenities(["wifi", "kitchen"])
}

/// The three-item population `[X, Y, Z]` in that order.
#[must_use]
pub fn scenario_catalog() -> Vec<CatalogItem> {
    vec![villa_x(), villa_y(), apartment_z()]
}

/// Test `Scorer` returning `1.0` when both items share a category.
#[derive(Debug, Copy, Clone, Default)]
pub struct KindScorer;

impl Scorer for KindScorer {
    fn score(
        &self,
        reference: &CatalogItem,
        candidate: &CatalogItem,
        _population: &[CatalogItem],
    ) -> f64 {
        if reference.kind == candidate.kind {
            1.0
        } else {
            0.0
        }
    }
}
