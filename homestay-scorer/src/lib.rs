//! Similarity scoring and ranking for Homestay catalog items.
//!
//! The crate turns a candidate population of
//! [`CatalogItem`](homestay_core::CatalogItem)s into ordered recommendations:
//! - **Normalisation** scales raw attributes into `0.0..=1.0` against bounds
//!   observed in the population supplied with each call.
//! - **Pairwise similarity** blends eight weighted sub-scores (category,
//!   location, distance, price, capacity, rating, amenities and a feature
//!   vector) into a symmetric score. [`PairwiseScorer`] implements the
//!   [`Scorer`](homestay_core::Scorer) trait.
//! - **Ranking** offers nearest-neighbour retrieval, personalised ranking
//!   against a user's history with a popularity fallback, and price
//!   suggestions for listing drafts.
//!
//! Nothing is cached between calls; every function is a pure function of its
//! arguments.
//!
//! # Examples
//!
//! ```
//! use homestay_core::{ListingDraft, test_support::{VILLA_Y, scenario_catalog, villa_x}};
//! use homestay_scorer::Recommender;
//!
//! let population = scenario_catalog();
//! let recommender = Recommender::default();
//!
//! let similar = recommender.similar(&villa_x(), &population);
//! assert_eq!(similar[0].id, VILLA_Y);
//!
//! let draft = ListingDraft::new("VILLA", "Đà Lạt", 4, 8).with_rating(4.8);
//! assert_eq!(recommender.predict_price(&draft, &population), 4_100_000.0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod features;
mod normalise;
mod pairwise;
mod pricing;
mod profile;
pub mod ranking;
mod recommender;
pub mod similarity;
mod weights;

pub use error::ConfigurationError;
pub use features::{FEATURE_DIMENSIONS, FeatureVector};
pub use normalise::{Bounds, MIDPOINT, PopulationBounds, normalise};
pub use pairwise::{PairwiseScorer, SubScores};
pub use pricing::{
    DEFAULT_FALLBACK_PRICE, DEFAULT_ROUNDING_STEP, PriceEstimate, PricePolicy, PricePredictor,
    predict_price,
};
pub use profile::PreferenceProfile;
pub use ranking::{
    DEFAULT_PERSONALISED_LIMIT, DEFAULT_SIMILAR_LIMIT, RankingLimits, ScoredCandidate,
    nearest_neighbours, personalised, popular,
};
pub use recommender::Recommender;
pub use weights::{
    ProfilePolicy, ProfileWeights, SimilarityPolicy, SimilarityWeights, WEIGHT_SUM_TOLERANCE,
};
