//! Score catalog items against a reference item.
//!
//! The `Scorer` trait assigns a similarity score to a pair of
//! [`CatalogItem`](crate::CatalogItem)s relative to the candidate population
//! they were drawn from.

use crate::CatalogItem;

/// Calculate a similarity score between two catalog items.
///
/// Higher scores indicate a closer match. Implementations must be
/// thread-safe (`Send` + `Sync`) so independent ranking calls can share a
/// scorer. The method is infallible; implementers must return `0.0` when no
/// information is available.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Return non-negative values.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use homestay_core::{CatalogItem, Scorer};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _a: &CatalogItem, _b: &CatalogItem, _population: &[CatalogItem]) -> f64 {
///         1.0
///     }
/// }
///
/// let a = CatalogItem::new(1, "VILLA", "Huế", Coord { x: 0.0, y: 0.0 });
/// let b = CatalogItem::new(2, "VILLA", "Huế", Coord { x: 0.0, y: 0.0 });
/// let population = [a.clone(), b.clone()];
/// assert_eq!(UnitScorer.score(&a, &b, &population), 1.0);
/// assert_eq!(UnitScorer.score_all(&a, &population), vec![1.0, 1.0]);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the similarity of `candidate` to `reference` within `population`.
    fn score(
        &self,
        reference: &CatalogItem,
        candidate: &CatalogItem,
        population: &[CatalogItem],
    ) -> f64;

    /// Score every member of `population` against `reference`.
    ///
    /// Scores are returned in population order. Implementations that derive
    /// population statistics should override this to compute them once.
    fn score_all(&self, reference: &CatalogItem, population: &[CatalogItem]) -> Vec<f64> {
        population
            .iter()
            .map(|candidate| self.score(reference, candidate, population))
            .collect()
    }

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}
