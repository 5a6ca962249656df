//! Test helpers for writing catalogs and reading command output.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary directory holding a catalog file.
#[derive(Debug)]
pub(super) struct CatalogDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CatalogDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `records` as `catalog.json` and return its path.
    pub(super) fn write_catalog(&self, records: &Value) -> Utf8PathBuf {
        let path = self.root.join("catalog.json");
        let payload = serde_json::to_vec_pretty(records).expect("serialise catalog");
        write_utf8(&path, &payload);
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// The three-listing catalog in the loose export format: the category is
/// spelled `type`, review counts and amenities are sometimes missing, and
/// records carry fields the engine ignores.
pub(super) fn scenario_records() -> Value {
    json!([
        {
            "id": 1,
            "type": "VILLA",
            "city": "Đà Lạt",
            "state": "Lâm Đồng",
            "price": 3_500_000.0,
            "bedrooms": 4,
            "max_guests": 8,
            "rating": 4.9,
            "review_count": 120,
            "amenities": ["wifi", "pool", "bbq"],
            "latitude": 11.9404,
            "longitude": 108.4583,
            "featured": true,
            "title": "Pine hill villa",
            "slug": "pine-hill-villa"
        },
        {
            "id": 2,
            "type": "VILLA",
            "city": "Đà Lạt",
            "state": "Lâm Đồng",
            "price": 3_200_000.0,
            "bedrooms": 4,
            "guests": 7,
            "rating": 4.7,
            "reviews": 80,
            "amenities": ["wifi", "pool"],
            "lat": 11.9520,
            "lng": 108.4410
        },
        {
            "id": 3,
            "category": "APARTMENT",
            "city": "Hà Nội",
            "price": 1_200_000.0,
            "bedrooms": 2,
            "max_guests": 4,
            "rating": 4.7,
            "review_count": 300,
            "latitude": 21.0278,
            "longitude": 105.8342
        }
    ])
}

/// Parse captured command output.
pub(super) fn parse_output(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("command output should be JSON")
}

/// Identifiers of the ranked results in a ranking response.
pub(super) fn result_ids(response: &Value) -> Vec<u64> {
    response["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|entry| entry["item"]["id"].as_u64().expect("item id"))
        .collect()
}
