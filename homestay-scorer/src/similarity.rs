//! Similarity primitives: geographic proximity, set overlap and vector
//! alignment.
//!
//! Each function is total: degenerate input (empty sets, zero vectors,
//! mismatched dimensions) yields `0.0` rather than `NaN`.

use std::collections::BTreeSet;

use geo::{Coord, Distance, HaversineMeasure, Point};

/// Distance beyond which two items no longer earn any proximity credit.
pub const DEFAULT_GEO_CUTOFF_KM: f64 = 100.0;

/// Radius of the spherical Earth used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

const METRES_PER_KILOMETRE: f64 = 1_000.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM * METRES_PER_KILOMETRE);

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// Uses the haversine formulation on a sphere of radius
/// [`EARTH_RADIUS_KM`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use homestay_scorer::similarity::haversine_km;
///
/// let da_lat = Coord { x: 108.4583, y: 11.9404 };
/// assert_eq!(haversine_km(da_lat, da_lat), 0.0);
///
/// let ha_noi = Coord { x: 105.8342, y: 21.0278 };
/// let km = haversine_km(da_lat, ha_noi);
/// assert!((km - 1050.0).abs() < 10.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "converting metres to kilometres"
)]
#[must_use]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    EARTH.distance(Point::from(a), Point::from(b)) / METRES_PER_KILOMETRE
}

/// Linear proximity score: `1.0` for identical coordinates, falling to `0.0`
/// at `cutoff_km` and beyond.
///
/// A non-positive or non-finite cutoff only rewards identical coordinates.
#[expect(
    clippy::float_arithmetic,
    reason = "proximity decays linearly with distance"
)]
#[must_use]
pub fn geo_proximity(a: Coord<f64>, b: Coord<f64>, cutoff_km: f64) -> f64 {
    let distance = haversine_km(a, b);
    if !distance.is_finite() {
        return 0.0;
    }
    if !cutoff_km.is_finite() || cutoff_km <= 0.0 {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - distance / cutoff_km).clamp(0.0, 1.0)
}

/// Jaccard index `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets share nothing and score `0.0`.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use homestay_scorer::similarity::jaccard;
///
/// let a: BTreeSet<_> = ["wifi", "pool"].into_iter().collect();
/// let b: BTreeSet<_> = ["wifi", "kitchen"].into_iter().collect();
/// assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!(jaccard::<&str>(&BTreeSet::new(), &BTreeSet::new()), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "set sizes are small; the ratio is computed in floating point"
)]
#[must_use]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns `0.0` when either vector has zero magnitude or the dimensions
/// differ. The result is clamped into `-1.0..=1.0` to absorb rounding.
///
/// # Examples
/// ```
/// use homestay_scorer::similarity::cosine;
///
/// assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
/// assert_eq!(cosine(&[1.0], &[1.0, 1.0]), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is a ratio of dot products"
)]
#[must_use]
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();
    let denominator = magnitude_a * magnitude_b;
    if denominator == 0.0 || !denominator.is_finite() || !dot.is_finite() {
        return 0.0;
    }
    (dot / denominator).clamp(-1.0, 1.0)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DA_LAT: Coord<f64> = Coord {
        x: 108.4583,
        y: 11.9404,
    };

    #[rstest]
    fn one_degree_of_equator_uses_the_fixed_radius() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let east = Coord { x: 1.0, y: 0.0 };
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((haversine_km(origin, east) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn half_degree_proximity_matches_the_fixed_radius() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let east = Coord { x: 0.5, y: 0.0 };
        let expected = 1.0 - EARTH_RADIUS_KM * std::f64::consts::PI / 360.0 / DEFAULT_GEO_CUTOFF_KM;
        let score = geo_proximity(origin, east, DEFAULT_GEO_CUTOFF_KM);
        assert!((score - expected).abs() < 1e-12);
    }

    #[rstest]
    fn identical_coordinates_score_one() {
        assert_eq!(geo_proximity(DA_LAT, DA_LAT, DEFAULT_GEO_CUTOFF_KM), 1.0);
    }

    #[rstest]
    fn proximity_vanishes_beyond_cutoff() {
        let ha_noi = Coord {
            x: 105.8342,
            y: 21.0278,
        };
        assert_eq!(geo_proximity(DA_LAT, ha_noi, DEFAULT_GEO_CUTOFF_KM), 0.0);
    }

    #[rstest]
    fn proximity_decays_linearly() {
        // One degree of latitude is roughly 111 km.
        let north = Coord {
            x: DA_LAT.x,
            y: DA_LAT.y + 0.45,
        };
        let distance = haversine_km(DA_LAT, north);
        let expected = 1.0 - distance / DEFAULT_GEO_CUTOFF_KM;
        let score = geo_proximity(DA_LAT, north, DEFAULT_GEO_CUTOFF_KM);
        assert!((score - expected).abs() < 1e-12);
        assert!((0.49..0.51).contains(&score), "got {score}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn invalid_cutoff_only_rewards_identical_points(#[case] cutoff: f64) {
        let nearby = Coord {
            x: DA_LAT.x + 0.001,
            y: DA_LAT.y,
        };
        assert_eq!(geo_proximity(DA_LAT, DA_LAT, cutoff), 1.0);
        assert_eq!(geo_proximity(DA_LAT, nearby, cutoff), 0.0);
    }

    #[rstest]
    #[case(&["wifi", "pool"], &["wifi", "pool"], 1.0)]
    #[case(&["wifi"], &["pool"], 0.0)]
    #[case(&[], &[], 0.0)]
    #[case(&["wifi"], &[], 0.0)]
    #[case(&["wifi", "pool", "bbq"], &["wifi"], 1.0 / 3.0)]
    fn jaccard_boundaries(#[case] a: &[&str], #[case] b: &[&str], #[case] expected: f64) {
        let left: BTreeSet<&str> = a.iter().copied().collect();
        let right: BTreeSet<&str> = b.iter().copied().collect();
        assert!((jaccard(&left, &right) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn cosine_is_symmetric() {
        let a = [0.2, 0.9, 0.4, 1.0, 0.0];
        let b = [0.7, 0.1, 0.5, 0.3, 1.0];
        assert_eq!(cosine(&a, &b), cosine(&b, &a));
    }

    #[rstest]
    fn cosine_handles_non_finite_components() {
        assert_eq!(cosine(&[f64::INFINITY, 1.0], &[1.0, 1.0]), 0.0);
    }
}
