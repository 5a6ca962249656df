//! Fixed-order numeric summaries of catalog items.

use homestay_core::CatalogItem;

use crate::{PopulationBounds, similarity::cosine};

/// Number of components in a [`FeatureVector`].
pub const FEATURE_DIMENSIONS: usize = 5;

/// Population-relative summary of an item:
/// `[price, guest capacity, bedrooms, rating, featured]`.
///
/// The first four components are min/max normalised against the population
/// the vector was built for; the last is `1.0` for featured items and `0.0`
/// otherwise. Vectors are only comparable when built from the same bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_DIMENSIONS]);

impl FeatureVector {
    /// Summarise `item` relative to `bounds`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use homestay_core::CatalogItem;
    /// use homestay_scorer::{FeatureVector, PopulationBounds};
    ///
    /// let origin = Coord { x: 0.0, y: 0.0 };
    /// let cheap = CatalogItem::new(1, "VILLA", "Huế", origin).with_price(100.0);
    /// let dear = CatalogItem::new(2, "VILLA", "Huế", origin)
    ///     .with_price(300.0)
    ///     .with_featured(true);
    /// let bounds = PopulationBounds::from_population(&[cheap.clone(), dear.clone()]);
    ///
    /// let vector = FeatureVector::from_item(&dear, &bounds);
    /// assert_eq!(vector.as_array(), &[1.0, 0.5, 0.5, 0.5, 1.0]);
    /// ```
    #[must_use]
    pub fn from_item(item: &CatalogItem, bounds: &PopulationBounds) -> Self {
        Self([
            bounds.price.normalise(item.price),
            bounds.guests.normalise(f64::from(item.max_guests)),
            bounds.bedrooms.normalise(f64::from(item.bedrooms)),
            bounds.rating.normalise(item.rating),
            if item.featured { 1.0 } else { 0.0 },
        ])
    }

    /// Borrow the raw components.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_DIMENSIONS] {
        &self.0
    }

    /// Cosine similarity with another vector built from the same bounds.
    ///
    /// Components are non-negative, so the result lies in `0.0..=1.0`.
    #[must_use]
    pub fn similarity(&self, other: &Self) -> f64 {
        cosine(&self.0, &other.0).max(0.0)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use homestay_core::test_support::{apartment_z, scenario_catalog, villa_x, villa_y};
    use rstest::rstest;

    #[rstest]
    fn vectors_stay_in_unit_range() {
        let population = scenario_catalog();
        let bounds = PopulationBounds::from_population(&population);
        for item in &population {
            let vector = FeatureVector::from_item(item, &bounds);
            assert!(
                vector.as_array().iter().all(|c| (0.0..=1.0).contains(c)),
                "component out of range for item {}",
                item.id
            );
        }
    }

    #[rstest]
    fn featured_flag_is_last_component() {
        let population = scenario_catalog();
        let bounds = PopulationBounds::from_population(&population);
        let featured = FeatureVector::from_item(&villa_x(), &bounds);
        let plain = FeatureVector::from_item(&villa_y(), &bounds);
        assert_eq!(featured.as_array().get(4), Some(&1.0));
        assert_eq!(plain.as_array().get(4), Some(&0.0));
    }

    #[rstest]
    fn cheapest_and_dearest_span_the_price_axis() {
        let population = scenario_catalog();
        let bounds = PopulationBounds::from_population(&population);
        let dearest = FeatureVector::from_item(&villa_x(), &bounds);
        let cheapest = FeatureVector::from_item(&apartment_z(), &bounds);
        assert_eq!(dearest.as_array().first(), Some(&1.0));
        assert_eq!(cheapest.as_array().first(), Some(&0.0));
    }

    #[rstest]
    fn similarity_with_self_is_one() {
        let population = scenario_catalog();
        let bounds = PopulationBounds::from_population(&population);
        let vector = FeatureVector::from_item(&villa_y(), &bounds);
        assert!((vector.similarity(&vector) - 1.0).abs() < 1e-12);
    }
}
