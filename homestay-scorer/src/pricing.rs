//! Price suggestions for unpriced or re-priced listings.
//!
//! A draft is priced from comparable listings: those with exactly the same
//! category and city. Without comparables the caller's own price, or a
//! fixed default, is returned unchanged.

use homestay_core::{CatalogItem, ListingDraft, MAX_RATING};
use log::{debug, warn};

use crate::ConfigurationError;

/// Granularity of suggested prices.
pub const DEFAULT_ROUNDING_STEP: f64 = 100_000.0;

/// Price returned when there are no comparables and the draft states none.
pub const DEFAULT_FALLBACK_PRICE: f64 = 1_000_000.0;

/// Constants of the pricing heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePolicy {
    /// Suggested prices are multiples of this step.
    pub rounding_step: f64,
    /// Price used when nothing comparable exists and the draft has no price.
    pub fallback_price: f64,
    /// Multiplier applied to an unrated draft.
    pub base_multiplier: f64,
    /// Extra multiplier earned by a perfect rating.
    pub quality_premium: f64,
}

impl Default for PricePolicy {
    fn default() -> Self {
        Self {
            rounding_step: DEFAULT_ROUNDING_STEP,
            fallback_price: DEFAULT_FALLBACK_PRICE,
            base_multiplier: 0.8,
            quality_premium: 0.4,
        }
    }
}

impl PricePolicy {
    /// Validate the constants and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when the rounding step is not strictly
    /// positive or any other constant is negative or not finite.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        if !self.rounding_step.is_finite() {
            return Err(ConfigurationError::NonFinite {
                component: "rounding step",
            });
        }
        if self.rounding_step <= 0.0 {
            return Err(ConfigurationError::NonPositive {
                component: "rounding step",
            });
        }
        for (component, value) in [
            ("fallback price", self.fallback_price),
            ("base multiplier", self.base_multiplier),
            ("quality premium", self.quality_premium),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { component });
            }
            if value < 0.0 {
                return Err(ConfigurationError::Negative { component, value });
            }
        }
        Ok(self)
    }
}

/// Outcome of a price suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceEstimate {
    /// Derived from comparable listings and rounded.
    Comparable {
        /// Suggested price.
        price: f64,
        /// Number of listings the suggestion was derived from.
        comparables: usize,
    },
    /// No comparables; the draft's price or the policy default.
    Fallback {
        /// Returned price, not rounded.
        price: f64,
    },
}

impl PriceEstimate {
    /// The suggested price regardless of how it was obtained.
    #[must_use]
    pub const fn price(&self) -> f64 {
        match *self {
            Self::Comparable { price, .. } | Self::Fallback { price } => price,
        }
    }
}

/// Suggest prices for listing drafts.
///
/// # Examples
/// ```
/// use homestay_core::{ListingDraft, test_support::apartment_z};
/// use homestay_scorer::PricePredictor;
///
/// let draft = ListingDraft::new("VILLA", "Đà Lạt", 4, 8).with_price(2_750_000.0);
/// let price = PricePredictor::default().predict(&draft, &[apartment_z()]);
/// assert_eq!(price, 2_750_000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricePredictor {
    policy: PricePolicy,
}

impl PricePredictor {
    /// Build a predictor after validating `policy`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when the policy is unusable.
    pub fn new(policy: PricePolicy) -> Result<Self, ConfigurationError> {
        Ok(Self {
            policy: policy.validate()?,
        })
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> &PricePolicy {
        &self.policy
    }

    /// Suggest a price for `draft` and report how it was derived.
    #[expect(
        clippy::float_arithmetic,
        reason = "the estimate blends per-bedroom and per-guest means"
    )]
    #[must_use]
    pub fn estimate(&self, draft: &ListingDraft, population: &[CatalogItem]) -> PriceEstimate {
        let comparables: Vec<&CatalogItem> = population
            .iter()
            .filter(|item| item.kind == draft.kind && item.city == draft.city)
            .collect();
        let (Some(per_bedroom), Some(per_guest)) = (
            mean(comparables.iter().map(|item| item.price / per_unit(item.bedrooms))),
            mean(comparables.iter().map(|item| item.price / per_unit(item.max_guests))),
        ) else {
            let price = draft.price.unwrap_or(self.policy.fallback_price);
            warn!(
                "no {} listings in {} to compare against; returning {price}",
                draft.kind, draft.city
            );
            return PriceEstimate::Fallback { price };
        };

        let blended = 0.5 * per_bedroom * f64::from(draft.bedrooms)
            + 0.5 * per_guest * f64::from(draft.max_guests);
        let price = self.round(blended * self.quality_multiplier(draft.rating));
        debug!(
            "priced {} in {} from {} comparables at {price}",
            draft.kind,
            draft.city,
            comparables.len()
        );
        PriceEstimate::Comparable {
            price,
            comparables: comparables.len(),
        }
    }

    /// Suggest a price for `draft`.
    #[must_use]
    pub fn predict(&self, draft: &ListingDraft, population: &[CatalogItem]) -> f64 {
        self.estimate(draft, population).price()
    }

    /// `base + (rating / 5) * premium`; an absent rating counts as zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the multiplier scales linearly with rating"
    )]
    fn quality_multiplier(&self, rating: Option<f64>) -> f64 {
        let clamped = rating
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, MAX_RATING);
        self.policy.base_multiplier + (clamped / MAX_RATING) * self.policy.quality_premium
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "rounding snaps to the nearest step"
    )]
    fn round(&self, price: f64) -> f64 {
        if !price.is_finite() {
            return 0.0;
        }
        (price / self.policy.rounding_step).round() * self.policy.rounding_step
    }
}

/// Suggest a price for `draft` with the default policy.
#[must_use]
pub fn predict_price(draft: &ListingDraft, population: &[CatalogItem]) -> f64 {
    PricePredictor::default().predict(draft, population)
}

/// Zero-capacity listings are treated as a single unit.
fn per_unit(count: u32) -> f64 {
    f64::from(count.max(1))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "means are computed over the comparable set"
)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (total, count) = values.fold((0.0, 0_usize), |(total, count), value| {
        (total + value, count + 1)
    });
    (count > 0).then(|| total / count as f64)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests fail fast on invalid policies"
)]
mod tests {
    use super::*;
    use homestay_core::test_support::{apartment_z, scenario_catalog, villa_x, villa_y};
    use rstest::rstest;

    fn villa_draft() -> ListingDraft {
        ListingDraft::new("VILLA", "Đà Lạt", 4, 8)
    }

    #[rstest]
    fn stated_price_is_returned_without_comparables() {
        let draft = villa_draft().with_price(2_750_000.0);
        let estimate = PricePredictor::default().estimate(&draft, &[apartment_z()]);
        assert_eq!(estimate, PriceEstimate::Fallback { price: 2_750_000.0 });
    }

    #[rstest]
    fn default_price_is_used_when_nothing_is_stated() {
        assert_eq!(predict_price(&villa_draft(), &[]), DEFAULT_FALLBACK_PRICE);
    }

    #[rstest]
    #[case(Some(4.8), 4_100_000.0)]
    #[case(None, 2_800_000.0)]
    #[case(Some(5.0), 4_200_000.0)]
    fn comparables_set_the_price(#[case] rating: Option<f64>, #[case] expected: f64) {
        // Per bedroom: (875 000 + 800 000) / 2. Per guest: (437 500 + 457 142.86) / 2.
        let mut draft = villa_draft();
        draft.rating = rating;
        let estimate = PricePredictor::default().estimate(&draft, &scenario_catalog());
        assert_eq!(
            estimate,
            PriceEstimate::Comparable {
                price: expected,
                comparables: 2,
            }
        );
    }

    #[rstest]
    fn comparison_is_exact_on_kind_and_city() {
        let draft = ListingDraft::new("villa", "Đà Lạt", 4, 8);
        let estimate = PricePredictor::default().estimate(&draft, &[villa_x(), villa_y()]);
        assert!(matches!(estimate, PriceEstimate::Fallback { .. }));
    }

    #[rstest]
    fn stated_price_does_not_override_comparables() {
        let draft = villa_draft().with_rating(4.8).with_price(9_999_999.0);
        assert_eq!(predict_price(&draft, &scenario_catalog()), 4_100_000.0);
    }

    #[rstest]
    fn zero_capacity_comparables_do_not_divide_by_zero() {
        let empty = homestay_core::CatalogItem::new(7, "VILLA", "Đà Lạt", villa_x().location)
            .with_price(500_000.0);
        let price = predict_price(&villa_draft(), &[empty]);
        assert!(price.is_finite());
    }

    #[rstest]
    #[case(PricePolicy { rounding_step: 0.0, ..PricePolicy::default() })]
    #[case(PricePolicy { fallback_price: -1.0, ..PricePolicy::default() })]
    #[case(PricePolicy { quality_premium: f64::NAN, ..PricePolicy::default() })]
    fn rejects_unusable_policy(#[case] policy: PricePolicy) {
        assert!(PricePredictor::new(policy).is_err());
    }

    #[rstest]
    fn custom_step_is_honoured() {
        let policy = PricePolicy {
            rounding_step: 1_000_000.0,
            ..PricePolicy::default()
        };
        let predictor = PricePredictor::new(policy).expect("valid policy");
        let draft = villa_draft().with_rating(4.8);
        assert_eq!(predictor.predict(&draft, &scenario_catalog()), 4_000_000.0);
    }
}
