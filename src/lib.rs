//! Facade crate for the Homestay recommendation engine.
//!
//! This crate re-exports the catalog domain types together with the
//! similarity scorer, the ranking entry points and the price heuristic.
//!
//! # Examples
//!
//! ```
//! use homestay_engine::{CatalogItem, Recommender};
//! use geo::Coord;
//!
//! let catalog = vec![
//!     CatalogItem::new(1, "VILLA", "Đà Lạt", Coord { x: 108.4583, y: 11.9404 }),
//!     CatalogItem::new(2, "VILLA", "Đà Lạt", Coord { x: 108.4410, y: 11.9520 }),
//! ];
//! let similar = Recommender::default().similar(&catalog[0], &catalog);
//! assert_eq!(similar[0].id, 2);
//! ```

#![forbid(unsafe_code)]

pub use homestay_core::{
    Amenities, CatalogItem, CatalogItemError, DisplayInfo, ListingDraft, MAX_RATING, Scorer,
};

pub use homestay_scorer::{
    ConfigurationError, PairwiseScorer, PreferenceProfile, PriceEstimate, PricePolicy,
    PricePredictor, ProfilePolicy, ProfileWeights, RankingLimits, Recommender, ScoredCandidate,
    SimilarityPolicy, SimilarityWeights, SubScores, nearest_neighbours, personalised, popular,
    predict_price,
};

#[cfg(feature = "test-support")]
pub use homestay_core::test_support;
