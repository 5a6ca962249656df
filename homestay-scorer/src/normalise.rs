//! Min/max scaling of raw numeric attributes onto `0.0..=1.0`.
//!
//! Bounds are always derived from the population supplied with the request;
//! nothing is cached between calls.

use homestay_core::CatalogItem;

/// Value returned for degenerate bounds, where every candidate shares the
/// same attribute value.
pub const MIDPOINT: f64 = 0.5;

/// Scale `value` into `0.0..=1.0` relative to `min..=max`.
///
/// Returns [`MIDPOINT`] when the bounds are degenerate (`min == max`) or the
/// value is not finite. Values outside the bounds are clamped.
///
/// # Examples
/// ```
/// use homestay_scorer::normalise;
///
/// assert_eq!(normalise(15.0, 10.0, 20.0), 0.5);
/// assert_eq!(normalise(20.0, 10.0, 20.0), 1.0);
/// assert_eq!(normalise(7.0, 7.0, 7.0), 0.5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "min/max scaling divides the offset by the observed range"
)]
#[must_use]
pub fn normalise(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if !value.is_finite() || !range.is_finite() || range <= 0.0 {
        return MIDPOINT;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Observed minimum and maximum of one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Degenerate bounds that normalise every value to [`MIDPOINT`].
    pub const DEGENERATE: Self = Self { min: 0.0, max: 0.0 };

    /// Build bounds from two observations in either order.
    #[must_use]
    pub const fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Fold finite observations into bounds.
    ///
    /// Returns `None` when no finite value is present.
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<Self>, value| {
                Some(acc.map_or(Self::new(value, value), |bounds| Self {
                    min: bounds.min.min(value),
                    max: bounds.max.max(value),
                }))
            })
    }

    /// Smallest observed value.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest observed value.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Scale `value` into `0.0..=1.0` relative to these bounds.
    #[must_use]
    pub fn normalise(&self, value: f64) -> f64 {
        normalise(value, self.min, self.max)
    }
}

/// Per-attribute bounds of a candidate population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationBounds {
    /// Base price bounds.
    pub price: Bounds,
    /// Guest capacity bounds.
    pub guests: Bounds,
    /// Bedroom count bounds.
    pub bedrooms: Bounds,
    /// Rating bounds.
    pub rating: Bounds,
}

impl PopulationBounds {
    /// Observe the numeric attributes of every item in `population`.
    ///
    /// An empty population yields [`Bounds::DEGENERATE`] for each attribute.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use homestay_core::CatalogItem;
    /// use homestay_scorer::PopulationBounds;
    ///
    /// let origin = Coord { x: 0.0, y: 0.0 };
    /// let population = [
    ///     CatalogItem::new(1, "VILLA", "Huế", origin).with_price(100.0),
    ///     CatalogItem::new(2, "VILLA", "Huế", origin).with_price(300.0),
    /// ];
    /// let bounds = PopulationBounds::from_population(&population);
    /// assert_eq!(bounds.price.normalise(200.0), 0.5);
    /// assert_eq!(bounds.guests.normalise(0.0), 0.5);
    /// ```
    #[must_use]
    pub fn from_population(population: &[CatalogItem]) -> Self {
        let observe = |extract: fn(&CatalogItem) -> f64| {
            Bounds::from_values(population.iter().map(extract)).unwrap_or(Bounds::DEGENERATE)
        };
        Self {
            price: observe(|item| item.price),
            guests: observe(|item| f64::from(item.max_guests)),
            bedrooms: observe(|item| f64::from(item.bedrooms)),
            rating: observe(|item| item.rating),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::expect_used,
    reason = "assertions compare floats and fail fast on missing bounds"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 10.0, 0.0)]
    #[case(10.0, 0.0, 10.0, 1.0)]
    #[case(2.5, 0.0, 10.0, 0.25)]
    #[case(-5.0, 0.0, 10.0, 0.0)]
    #[case(50.0, 0.0, 10.0, 1.0)]
    fn scales_within_bounds(
        #[case] value: f64,
        #[case] min: f64,
        #[case] max: f64,
        #[case] expected: f64,
    ) {
        assert!((normalise(value, min, max) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(3.0, 3.0, 3.0)]
    #[case(0.0, 1_000.0, 1_000.0)]
    #[case(f64::NAN, 0.0, 1.0)]
    #[case(1.0, 5.0, 2.0)]
    fn degenerate_inputs_return_midpoint(#[case] value: f64, #[case] min: f64, #[case] max: f64) {
        assert_eq!(normalise(value, min, max), MIDPOINT);
    }

    #[rstest]
    fn bounds_skip_non_finite_values() {
        let bounds = Bounds::from_values([3.0, f64::NAN, -1.0, f64::INFINITY, 8.0])
            .expect("finite values present");
        assert_eq!(bounds.min(), -1.0);
        assert_eq!(bounds.max(), 8.0);
    }

    #[rstest]
    fn bounds_of_nothing_are_absent() {
        assert!(Bounds::from_values(std::iter::empty()).is_none());
    }

    #[rstest]
    fn empty_population_is_degenerate() {
        let bounds = PopulationBounds::from_population(&[]);
        assert_eq!(bounds.price, Bounds::DEGENERATE);
        assert_eq!(bounds.rating.normalise(4.0), MIDPOINT);
    }
}
