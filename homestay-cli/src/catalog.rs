//! Loading loosely-typed JSON catalogs into validated catalog items.
//!
//! Exported catalogs are inconsistent: numeric fields go missing, the
//! category is sometimes called `type` or `category`, and records carry
//! extra fields the engine has no use for. Records are coerced here, at the
//! boundary, so the scoring code only ever sees strict [`CatalogItem`]s.

use std::collections::BTreeSet;

use camino::Utf8Path;
use geo::Coord;
use homestay_core::{CatalogItem, DisplayInfo};
use log::debug;
use serde::Deserialize;

use crate::CliError;

/// One listing as it appears in an exported catalog.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogRecord {
    pub(crate) id: u64,
    #[serde(alias = "type", alias = "category")]
    pub(crate) kind: String,
    pub(crate) city: String,
    #[serde(default)]
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) price: Option<f64>,
    #[serde(default)]
    pub(crate) bedrooms: Option<u32>,
    #[serde(default, alias = "guests")]
    pub(crate) max_guests: Option<u32>,
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    #[serde(default, alias = "reviews")]
    pub(crate) review_count: Option<u32>,
    #[serde(default)]
    pub(crate) amenities: Vec<String>,
    #[serde(alias = "lat")]
    pub(crate) latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub(crate) longitude: f64,
    #[serde(default)]
    pub(crate) featured: bool,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) images: Vec<String>,
    #[serde(default)]
    pub(crate) host_name: Option<String>,
}

impl CatalogRecord {
    /// Convert into a strict item, defaulting absent numbers to zero.
    pub(crate) fn into_item(self) -> Result<CatalogItem, CliError> {
        let id = self.id;
        let item = CatalogItem {
            id,
            kind: self.kind,
            city: self.city,
            state: self.state.filter(|state| !state.is_empty()),
            price: self.price.unwrap_or_default(),
            bedrooms: self.bedrooms.unwrap_or_default(),
            max_guests: self.max_guests.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            review_count: self.review_count.unwrap_or_default(),
            amenities: self.amenities.into_iter().collect(),
            location: Coord {
                x: self.longitude,
                y: self.latitude,
            },
            featured: self.featured,
            display: DisplayInfo {
                title: self.title,
                images: self.images,
                host_name: self.host_name,
            },
        };
        item.validate()
            .map_err(|source| CliError::InvalidItem { id, source })?;
        Ok(item)
    }
}

/// Read, coerce and validate the catalog at `path`.
///
/// # Errors
/// Returns [`CliError`] when the file cannot be read or parsed, a record
/// fails validation, or two records share an identifier.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Vec<CatalogItem>, CliError> {
    let contents = homestay_fs::read_to_string(path).map_err(|source| CliError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(path, &contents)
}

/// Parse catalog JSON previously read from `path`.
pub(crate) fn parse_catalog(path: &Utf8Path, contents: &str) -> Result<Vec<CatalogItem>, CliError> {
    let records: Vec<CatalogRecord> =
        serde_json::from_str(contents).map_err(|source| CliError::ParseCatalog {
            path: path.to_path_buf(),
            source,
        })?;
    let mut seen = BTreeSet::new();
    let items = records
        .into_iter()
        .map(|record| {
            if seen.insert(record.id) {
                record.into_item()
            } else {
                Err(CliError::DuplicateItem { id: record.id })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("loaded {} catalog items from {path}", items.len());
    Ok(items)
}

/// Look up `id` in `catalog`.
pub(crate) fn find_item<'a>(
    catalog: &'a [CatalogItem],
    id: u64,
    field: &'static str,
) -> Result<&'a CatalogItem, CliError> {
    catalog
        .iter()
        .find(|item| item.id == id)
        .ok_or(CliError::UnknownItem { field, id })
}

/// Confirm that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match homestay_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
