//! Preference profiles distilled from a user's interaction history.
//!
//! A profile is matched against individual items with its own, simpler
//! formula: it summarises many items, so item-to-item measures such as
//! amenity overlap or geographic proximity do not apply.

use std::collections::BTreeSet;

use homestay_core::CatalogItem;

use crate::{ProfilePolicy, ProfileWeights};

/// Aggregate preferences derived from previously booked or viewed items.
///
/// # Examples
/// ```
/// use homestay_core::test_support::{villa_x, villa_y};
/// use homestay_scorer::PreferenceProfile;
///
/// let profile = PreferenceProfile::from_history(&[villa_x(), villa_y()])
///     .expect("history is not empty");
/// assert_eq!(profile.mean_price(), 3_350_000.0);
/// assert!(profile.kinds().contains("VILLA"));
/// assert!(PreferenceProfile::from_history(&[]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceProfile {
    mean_price: f64,
    mean_bedrooms: f64,
    kinds: BTreeSet<String>,
    cities: BTreeSet<String>,
}

impl PreferenceProfile {
    /// Summarise `history`.
    ///
    /// Returns `None` for an empty history; callers fall back to popularity.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "means are computed over a small history"
    )]
    #[must_use]
    pub fn from_history(history: &[CatalogItem]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        let count = history.len() as f64;
        let total_price: f64 = history.iter().map(|item| item.price).sum();
        let total_bedrooms: f64 = history.iter().map(|item| f64::from(item.bedrooms)).sum();
        Some(Self {
            mean_price: total_price / count,
            mean_bedrooms: total_bedrooms / count,
            kinds: history.iter().map(|item| item.kind.clone()).collect(),
            cities: history.iter().map(|item| item.city.clone()).collect(),
        })
    }

    /// Mean historical price.
    #[must_use]
    pub const fn mean_price(&self) -> f64 {
        self.mean_price
    }

    /// Mean historical bedroom count.
    #[must_use]
    pub const fn mean_bedrooms(&self) -> f64 {
        self.mean_bedrooms
    }

    /// Distinct categories seen in the history.
    #[must_use]
    pub const fn kinds(&self) -> &BTreeSet<String> {
        &self.kinds
    }

    /// Distinct cities seen in the history.
    #[must_use]
    pub const fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    /// Score how well `item` fits this profile, in `0.0..=1.0` when the
    /// weights sum to one.
    #[expect(
        clippy::float_arithmetic,
        reason = "profile match is a weighted sum of closeness terms"
    )]
    #[must_use]
    pub fn score(
        &self,
        item: &CatalogItem,
        weights: &ProfileWeights,
        policy: &ProfilePolicy,
    ) -> f64 {
        let kind = if self.kinds.contains(&item.kind) { 1.0 } else { 0.0 };
        let city = if self.cities.contains(&item.city) { 1.0 } else { 0.0 };
        let price = self.price_closeness(item.price);
        let bedrooms = self.bedroom_closeness(f64::from(item.bedrooms), policy.bedroom_tolerance);
        let rating = (item.rating / policy.rating_span).clamp(0.0, 1.0);
        let raw = kind * weights.kind
            + city * weights.city
            + price * weights.price
            + bedrooms * weights.bedrooms
            + rating * weights.rating;
        if raw.is_finite() { raw.max(0.0) } else { 0.0 }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "closeness is a relative difference from the mean"
    )]
    fn price_closeness(&self, price: f64) -> f64 {
        if self.mean_price <= 0.0 {
            return 0.0;
        }
        (1.0 - (price - self.mean_price).abs() / self.mean_price).clamp(0.0, 1.0)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "closeness scales the distance from the mean"
    )]
    fn bedroom_closeness(&self, bedrooms: f64, tolerance: f64) -> f64 {
        (1.0 - (bedrooms - self.mean_bedrooms).abs() / tolerance).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::expect_used,
    reason = "expected scores use float maths; fixtures always build a profile"
)]
mod tests {
    use super::*;
    use geo::Coord;
    use homestay_core::test_support::{apartment_z, villa_x, villa_y};
    use rstest::rstest;

    fn profile() -> PreferenceProfile {
        PreferenceProfile::from_history(&[villa_x(), villa_y()]).expect("non-empty history")
    }

    #[rstest]
    fn aggregates_history() {
        let profile = profile();
        assert_eq!(profile.mean_bedrooms(), 4.0);
        assert_eq!(profile.kinds().len(), 1);
        assert!(profile.cities().contains("Đà Lạt"));
    }

    #[rstest]
    fn matching_villa_outscores_apartment() {
        let profile = profile();
        let weights = ProfileWeights::default();
        let policy = ProfilePolicy::default();
        let villa = profile.score(&villa_y(), &weights, &policy);
        let apartment = profile.score(&apartment_z(), &weights, &policy);
        assert!(villa > apartment);
    }

    #[rstest]
    fn perfect_match_scores_one() {
        let profile = profile();
        let ideal = CatalogItem::new(9, "VILLA", "Đà Lạt", Coord { x: 0.0, y: 0.0 })
            .with_price(3_350_000.0)
            .with_capacity(4, 8)
            .with_rating(5.0, 1);
        let score = profile.score(&ideal, &ProfileWeights::default(), &ProfilePolicy::default());
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn apartment_breakdown() {
        // Apartment: no kind/city match, price 1.2M vs 3.35M mean,
        // two bedrooms vs a mean of four, rating 4.7.
        let expected = 0.2 * (1.0 - 2_150_000.0 / 3_350_000.0)
            + 0.15 * (1.0 - 2.0 / 3.0)
            + 0.15 * (4.7 / 5.0);
        let score = profile().score(
            &apartment_z(),
            &ProfileWeights::default(),
            &ProfilePolicy::default(),
        );
        assert!((score - expected).abs() < 1e-12);
    }

    #[rstest]
    fn zero_priced_history_ignores_price() {
        let free = CatalogItem::new(1, "VILLA", "Huế", Coord { x: 0.0, y: 0.0 });
        let profile =
            PreferenceProfile::from_history(std::slice::from_ref(&free)).expect("history");
        let weights = ProfileWeights {
            kind: 0.0,
            city: 0.0,
            price: 1.0,
            bedrooms: 0.0,
            rating: 0.0,
        };
        assert_eq!(profile.score(&free, &weights, &ProfilePolicy::default()), 0.0);
    }
}
