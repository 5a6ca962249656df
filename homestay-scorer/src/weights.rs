//! Tunable weights and policy constants for both scoring formulas.
//!
//! Defaults reproduce the production heuristics; they are kept as data so
//! callers and tests can vary them without touching the scoring code.

use homestay_core::MAX_RATING;

use crate::{ConfigurationError, similarity::DEFAULT_GEO_CUTOFF_KM};

/// Allowed deviation of a weight total from `1.0`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights of the eight item-to-item sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    /// Same property category.
    pub kind: f64,
    /// Same city, or partially the same state.
    pub location: f64,
    /// Great-circle proximity.
    pub geo: f64,
    /// Relative price difference.
    pub price: f64,
    /// Guest and bedroom difference.
    pub capacity: f64,
    /// Rating difference.
    pub rating: f64,
    /// Amenity overlap.
    pub amenities: f64,
    /// Feature-vector alignment.
    pub features: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            kind: 0.25,
            location: 0.20,
            geo: 0.10,
            price: 0.15,
            capacity: 0.10,
            rating: 0.10,
            amenities: 0.05,
            features: 0.05,
        }
    }
}

impl SimilarityWeights {
    const fn components(&self) -> [(&'static str, f64); 8] {
        [
            ("kind weight", self.kind),
            ("location weight", self.location),
            ("geo weight", self.geo),
            ("price weight", self.price),
            ("capacity weight", self.capacity),
            ("rating weight", self.rating),
            ("amenities weight", self.amenities),
            ("features weight", self.features),
        ]
    }

    /// Sum of all weights.
    ///
    /// # Examples
    /// ```
    /// use homestay_scorer::SimilarityWeights;
    ///
    /// assert_eq!(SimilarityWeights::default().total(), 1.0);
    /// ```
    #[must_use]
    pub fn total(&self) -> f64 {
        self.components().iter().map(|(_, weight)| weight).sum()
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when a weight is negative or not finite,
    /// or the weights do not sum to `1.0`.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        validate_weights(&self.components())?;
        Ok(self)
    }
}

/// Weights of the profile-to-item formula used for personalised ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileWeights {
    /// Item category seen in the history.
    pub kind: f64,
    /// Item city seen in the history.
    pub city: f64,
    /// Closeness to the mean historical price.
    pub price: f64,
    /// Closeness to the mean historical bedroom count.
    pub bedrooms: f64,
    /// Item rating.
    pub rating: f64,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            kind: 0.3,
            city: 0.2,
            price: 0.2,
            bedrooms: 0.15,
            rating: 0.15,
        }
    }
}

impl ProfileWeights {
    const fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("kind weight", self.kind),
            ("city weight", self.city),
            ("price weight", self.price),
            ("bedrooms weight", self.bedrooms),
            ("rating weight", self.rating),
        ]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.components().iter().map(|(_, weight)| weight).sum()
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when a weight is negative or not finite,
    /// or the weights do not sum to `1.0`.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        validate_weights(&self.components())?;
        Ok(self)
    }
}

/// Heuristic constants of the item-to-item formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityPolicy {
    /// Location credit when only the state matches.
    pub partial_region_score: f64,
    /// Distance at which geographic proximity reaches zero.
    pub geo_cutoff_km: f64,
    /// Combined guest and bedroom difference at which capacity closeness
    /// reaches zero.
    pub capacity_tolerance: f64,
    /// Rating difference at which rating closeness reaches zero.
    pub rating_span: f64,
}

impl Default for SimilarityPolicy {
    fn default() -> Self {
        Self {
            partial_region_score: 0.5,
            geo_cutoff_km: DEFAULT_GEO_CUTOFF_KM,
            capacity_tolerance: 10.0,
            rating_span: MAX_RATING,
        }
    }
}

impl SimilarityPolicy {
    /// Validate the constants and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when the partial region score leaves
    /// `0.0..=1.0` or a divisor is not strictly positive.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        check_finite("partial region score", self.partial_region_score)?;
        if !(0.0..=1.0).contains(&self.partial_region_score) {
            return Err(ConfigurationError::OutOfUnitRange {
                component: "partial region score",
                value: self.partial_region_score,
            });
        }
        check_positive("geo cutoff", self.geo_cutoff_km)?;
        check_positive("capacity tolerance", self.capacity_tolerance)?;
        check_positive("rating span", self.rating_span)?;
        Ok(self)
    }
}

/// Heuristic constants of the profile-to-item formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePolicy {
    /// Bedroom difference from the historical mean at which bedroom
    /// closeness reaches zero.
    pub bedroom_tolerance: f64,
    /// Rating that earns the full rating weight.
    pub rating_span: f64,
}

impl Default for ProfilePolicy {
    fn default() -> Self {
        Self {
            bedroom_tolerance: 3.0,
            rating_span: MAX_RATING,
        }
    }
}

impl ProfilePolicy {
    /// Validate the constants and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when a divisor is not strictly positive.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        check_positive("bedroom tolerance", self.bedroom_tolerance)?;
        check_positive("rating span", self.rating_span)?;
        Ok(self)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "validation compares the weight total with one"
)]
fn validate_weights(components: &[(&'static str, f64)]) -> Result<(), ConfigurationError> {
    for &(component, value) in components {
        check_finite(component, value)?;
        if value < 0.0 {
            return Err(ConfigurationError::Negative { component, value });
        }
    }
    let total: f64 = components.iter().map(|(_, value)| value).sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigurationError::UnbalancedWeights { total });
    }
    Ok(())
}

const fn check_finite(component: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonFinite { component })
    }
}

fn check_positive(component: &'static str, value: f64) -> Result<(), ConfigurationError> {
    check_finite(component, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { component })
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare weight totals"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_similarity_weights_sum_to_one() {
        let weights = SimilarityWeights::default();
        assert!((weights.total() - 1.0).abs() <= f64::EPSILON);
        assert_eq!(weights.validate(), Ok(weights));
    }

    #[rstest]
    fn default_profile_weights_sum_to_one() {
        let weights = ProfileWeights::default();
        assert!((weights.total() - 1.0).abs() <= f64::EPSILON);
        assert!(weights.validate().is_ok());
    }

    #[rstest]
    fn rejects_unbalanced_weights() {
        let weights = SimilarityWeights {
            kind: 0.5,
            ..SimilarityWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(ConfigurationError::UnbalancedWeights { .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite_weight(#[case] value: f64) {
        let weights = ProfileWeights {
            rating: value,
            ..ProfileWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(ConfigurationError::NonFinite {
                component: "rating weight"
            })
        );
    }

    #[rstest]
    fn rejects_negative_weight() {
        let weights = ProfileWeights {
            kind: 0.7,
            city: -0.2,
            ..ProfileWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(ConfigurationError::Negative {
                component: "city weight",
                ..
            })
        ));
    }

    #[rstest]
    #[case(SimilarityPolicy { geo_cutoff_km: 0.0, ..SimilarityPolicy::default() })]
    #[case(SimilarityPolicy { capacity_tolerance: -1.0, ..SimilarityPolicy::default() })]
    #[case(SimilarityPolicy { partial_region_score: 1.5, ..SimilarityPolicy::default() })]
    fn rejects_unusable_policy(#[case] policy: SimilarityPolicy) {
        assert!(policy.validate().is_err());
    }

    #[rstest]
    fn default_policies_are_valid() {
        assert!(SimilarityPolicy::default().validate().is_ok());
        assert!(ProfilePolicy::default().validate().is_ok());
    }
}
