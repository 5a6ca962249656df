//! Item-to-item similarity.
//!
//! [`PairwiseScorer`] blends eight sub-scores, each in `0.0..=1.0`, with
//! [`SimilarityWeights`]. Every sub-score is symmetric in its two arguments,
//! so the blended score is too.

use homestay_core::{CatalogItem, Scorer};
use log::warn;

use crate::{
    ConfigurationError, FeatureVector, PopulationBounds, SimilarityPolicy, SimilarityWeights,
    similarity::{geo_proximity, jaccard},
};

/// The individual components of a pairwise similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    /// `1.0` when both items share a category.
    pub kind: f64,
    /// `1.0` for the same city, the partial region score for the same state.
    pub location: f64,
    /// Great-circle proximity with a linear cutoff.
    pub geo: f64,
    /// One minus the price difference relative to the mean price.
    pub price: f64,
    /// One minus the scaled guest and bedroom difference.
    pub capacity: f64,
    /// One minus the scaled rating difference.
    pub rating: f64,
    /// Jaccard overlap of amenities.
    pub amenities: f64,
    /// Cosine similarity of the population-relative feature vectors.
    pub features: f64,
}

impl SubScores {
    /// Blend the components with `weights`.
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted sum of sub-scores"
    )]
    #[must_use]
    pub fn weighted(&self, weights: &SimilarityWeights) -> f64 {
        self.kind * weights.kind
            + self.location * weights.location
            + self.geo * weights.geo
            + self.price * weights.price
            + self.capacity * weights.capacity
            + self.rating * weights.rating
            + self.amenities * weights.amenities
            + self.features * weights.features
    }

    /// Components in declaration order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 8] {
        [
            self.kind,
            self.location,
            self.geo,
            self.price,
            self.capacity,
            self.rating,
            self.amenities,
            self.features,
        ]
    }
}

/// Multi-factor item-to-item scorer.
///
/// # Examples
/// ```
/// use homestay_core::Scorer;
/// use homestay_core::test_support::{apartment_z, scenario_catalog, villa_x, villa_y};
/// use homestay_scorer::PairwiseScorer;
///
/// let population = scenario_catalog();
/// let scorer = PairwiseScorer::default();
/// let near = scorer.score(&villa_x(), &villa_y(), &population);
/// let far = scorer.score(&villa_x(), &apartment_z(), &population);
/// assert!(near > far);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairwiseScorer {
    weights: SimilarityWeights,
    policy: SimilarityPolicy,
}

impl PairwiseScorer {
    /// Build a scorer from validated weights and policy constants.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when either argument fails validation.
    pub fn new(
        weights: SimilarityWeights,
        policy: SimilarityPolicy,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            weights: weights.validate()?,
            policy: policy.validate()?,
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Policy constants in use.
    #[must_use]
    pub const fn policy(&self) -> &SimilarityPolicy {
        &self.policy
    }

    /// Break the similarity of `a` and `b` within `population` into its
    /// components.
    #[must_use]
    pub fn explain(
        &self,
        a: &CatalogItem,
        b: &CatalogItem,
        population: &[CatalogItem],
    ) -> SubScores {
        self.sub_scores(a, b, &PopulationBounds::from_population(population))
    }

    /// Compute the components against precomputed population bounds.
    #[must_use]
    pub fn sub_scores(
        &self,
        a: &CatalogItem,
        b: &CatalogItem,
        bounds: &PopulationBounds,
    ) -> SubScores {
        let features_a = FeatureVector::from_item(a, bounds);
        let features_b = FeatureVector::from_item(b, bounds);
        SubScores {
            kind: kind_match(a, b),
            location: self.location_match(a, b),
            geo: geo_proximity(a.location, b.location, self.policy.geo_cutoff_km),
            price: price_closeness(a.price, b.price),
            capacity: self.capacity_closeness(a, b),
            rating: self.rating_closeness(a.rating, b.rating),
            amenities: jaccard(&a.amenities, &b.amenities),
            features: features_a.similarity(&features_b),
        }
    }

    /// Blended similarity against precomputed population bounds.
    #[must_use]
    pub fn score_with_bounds(
        &self,
        a: &CatalogItem,
        b: &CatalogItem,
        bounds: &PopulationBounds,
    ) -> f64 {
        let raw = self.sub_scores(a, b, bounds).weighted(&self.weights);
        if !raw.is_finite() {
            warn!("non-finite similarity between items {} and {}", a.id, b.id);
        }
        Self::sanitise(raw)
    }

    fn location_match(&self, a: &CatalogItem, b: &CatalogItem) -> f64 {
        if a.city == b.city {
            return 1.0;
        }
        match (a.state.as_deref(), b.state.as_deref()) {
            (Some(left), Some(right)) if !left.is_empty() && left == right => {
                self.policy.partial_region_score
            }
            _ => 0.0,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "capacity closeness scales the summed differences"
    )]
    fn capacity_closeness(&self, a: &CatalogItem, b: &CatalogItem) -> f64 {
        let guests = f64::from(a.max_guests.abs_diff(b.max_guests));
        let bedrooms = f64::from(a.bedrooms.abs_diff(b.bedrooms));
        (1.0 - (guests + bedrooms) / self.policy.capacity_tolerance).clamp(0.0, 1.0)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "rating closeness scales the rating difference"
    )]
    fn rating_closeness(&self, a: f64, b: f64) -> f64 {
        (1.0 - (a - b).abs() / self.policy.rating_span).clamp(0.0, 1.0)
    }
}

impl Scorer for PairwiseScorer {
    fn score(
        &self,
        reference: &CatalogItem,
        candidate: &CatalogItem,
        population: &[CatalogItem],
    ) -> f64 {
        self.score_with_bounds(
            reference,
            candidate,
            &PopulationBounds::from_population(population),
        )
    }

    fn score_all(&self, reference: &CatalogItem, population: &[CatalogItem]) -> Vec<f64> {
        let bounds = PopulationBounds::from_population(population);
        population
            .iter()
            .map(|candidate| self.score_with_bounds(reference, candidate, &bounds))
            .collect()
    }
}

fn kind_match(a: &CatalogItem, b: &CatalogItem) -> f64 {
    if a.kind == b.kind { 1.0 } else { 0.0 }
}

/// `max(0, 1 - |a - b| / mean(a, b))`, or `0.0` when both prices are zero.
#[expect(
    clippy::float_arithmetic,
    reason = "price closeness is a relative difference"
)]
fn price_closeness(a: f64, b: f64) -> f64 {
    let mean = (a + b) / 2.0;
    if mean <= 0.0 || !mean.is_finite() {
        return 0.0;
    }
    (1.0 - (a - b).abs() / mean).clamp(0.0, 1.0)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "expected sub-scores are derived with float maths"
)]
mod tests {
    use super::*;
    use geo::Coord;
    use homestay_core::test_support::{apartment_z, scenario_catalog, villa_x, villa_y};
    use rstest::{fixture, rstest};

    #[fixture]
    fn population() -> Vec<CatalogItem> {
        scenario_catalog()
    }

    #[rstest]
    fn identical_items_match_on_every_categorical_axis(population: Vec<CatalogItem>) {
        let scores = PairwiseScorer::default().explain(&villa_x(), &villa_x(), &population);
        assert_eq!(scores.kind, 1.0);
        assert_eq!(scores.location, 1.0);
        assert_eq!(scores.geo, 1.0);
        assert_eq!(scores.price, 1.0);
        assert_eq!(scores.capacity, 1.0);
        assert_eq!(scores.rating, 1.0);
        assert_eq!(scores.amenities, 1.0);
        assert!((scores.features - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn villas_in_the_same_city_break_down_as_expected(population: Vec<CatalogItem>) {
        let scores = PairwiseScorer::default().explain(&villa_x(), &villa_y(), &population);
        assert_eq!(scores.kind, 1.0);
        assert_eq!(scores.location, 1.0);
        // 300k apart around a 3.35M mean.
        assert!((scores.price - (1.0 - 300_000.0 / 3_350_000.0)).abs() < 1e-12);
        // One guest and no bedrooms apart.
        assert!((scores.capacity - 0.9).abs() < 1e-12);
        assert!((scores.rating - (1.0 - 0.2 / 5.0)).abs() < 1e-12);
        assert!((scores.amenities - 2.0 / 3.0).abs() < 1e-12);
        assert!(scores.geo > 0.97, "villas are ~2 km apart");
    }

    #[rstest]
    fn distant_apartment_earns_nothing_for_place(population: Vec<CatalogItem>) {
        let scores = PairwiseScorer::default().explain(&villa_x(), &apartment_z(), &population);
        assert_eq!(scores.kind, 0.0);
        assert_eq!(scores.location, 0.0);
        assert_eq!(scores.geo, 0.0);
        // The apartment sits at every lower bound, so its vector is zero.
        assert_eq!(scores.features, 0.0);
    }

    #[rstest]
    fn same_state_earns_partial_location_credit(population: Vec<CatalogItem>) {
        let mut other = villa_y();
        other.city = "Bảo Lộc".into();
        let scores = PairwiseScorer::default().explain(&villa_x(), &other, &population);
        assert_eq!(scores.location, 0.5);
    }

    #[rstest]
    fn missing_states_do_not_match(population: Vec<CatalogItem>) {
        let mut a = villa_x();
        let mut b = villa_y();
        b.city = "Nha Trang".into();
        a.state = None;
        b.state = None;
        assert_eq!(PairwiseScorer::default().explain(&a, &b, &population).location, 0.0);
        a.state = Some(String::new());
        b.state = Some(String::new());
        assert_eq!(PairwiseScorer::default().explain(&a, &b, &population).location, 0.0);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.0)]
    #[case(100.0, 100.0, 1.0)]
    #[case(100.0, 300.0, 0.0)]
    #[case(0.0, 50.0, 0.0)]
    #[case(150.0, 50.0, 0.0)]
    #[case(90.0, 110.0, 0.8)]
    fn price_closeness_cases(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
        assert!((price_closeness(a, b) - expected).abs() < 1e-12);
        assert_eq!(price_closeness(a, b), price_closeness(b, a));
    }

    #[rstest]
    fn capacity_closeness_floors_at_zero() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let small = CatalogItem::new(1, "VILLA", "Huế", origin).with_capacity(1, 2);
        let huge = CatalogItem::new(2, "VILLA", "Huế", origin).with_capacity(10, 20);
        let population = [small.clone(), huge.clone()];
        assert_eq!(PairwiseScorer::default().explain(&small, &huge, &population).capacity, 0.0);
    }

    #[rstest]
    fn scores_are_symmetric_and_bounded(population: Vec<CatalogItem>) {
        let scorer = PairwiseScorer::default();
        for a in &population {
            for b in &population {
                let forward = scorer.score(a, b, &population);
                let backward = scorer.score(b, a, &population);
                assert!((forward - backward).abs() < 1e-12);
                assert!((0.0..=1.0).contains(&forward));
            }
        }
    }

    #[rstest]
    fn score_all_matches_individual_scores(population: Vec<CatalogItem>) {
        let scorer = PairwiseScorer::default();
        let reference = villa_x();
        let batch = scorer.score_all(&reference, &population);
        let single: Vec<f64> = population
            .iter()
            .map(|candidate| scorer.score(&reference, candidate, &population))
            .collect();
        assert_eq!(batch, single);
    }

    #[rstest]
    fn new_rejects_invalid_weights() {
        let weights = SimilarityWeights {
            geo: 0.9,
            ..SimilarityWeights::default()
        };
        assert!(PairwiseScorer::new(weights, SimilarityPolicy::default()).is_err());
    }
}
