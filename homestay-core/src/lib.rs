//! Core domain types for the Homestay recommendation engine.
//!
//! Catalog items are plain read-only records. Validation happens once, at the
//! boundary, through [`CatalogItem::validate`]; everything downstream assumes
//! the invariants hold and degrades gracefully when optional data is absent.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod draft;
pub mod item;
pub mod scorer;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use draft::ListingDraft;
pub use item::{Amenities, CatalogItem, CatalogItemError, DisplayInfo, MAX_RATING};
pub use scorer::Scorer;
