//! Ranking entry points: nearest neighbours, personalised ranking and the
//! popularity fallback.
//!
//! All rankings use a stable sort on descending score, so candidates with
//! equal scores keep their population order. Results borrow from the
//! population; nothing is cloned or cached.

use homestay_core::{CatalogItem, Scorer};
use log::debug;

use crate::{PreferenceProfile, ProfilePolicy, ProfileWeights};

/// Default number of similar items returned for a reference item.
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;

/// Default number of personalised recommendations.
pub const DEFAULT_PERSONALISED_LIMIT: usize = 8;

/// Result counts for the ranking entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimits {
    /// Items returned by nearest-neighbour retrieval.
    pub similar: usize,
    /// Items returned by personalised ranking.
    pub personalised: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            similar: DEFAULT_SIMILAR_LIMIT,
            personalised: DEFAULT_PERSONALISED_LIMIT,
        }
    }
}

/// A population member paired with its score for one ranking call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// The ranked item.
    pub item: &'a CatalogItem,
    /// Its score; only the relative order is meaningful.
    pub score: f64,
}

/// Score every candidate other than `reference` and sort by descending
/// similarity.
///
/// Candidates sharing the reference's identifier are excluded.
#[must_use]
pub fn rank_similar<'a, S>(
    scorer: &S,
    reference: &CatalogItem,
    population: &'a [CatalogItem],
) -> Vec<ScoredCandidate<'a>>
where
    S: Scorer + ?Sized,
{
    let scores = scorer.score_all(reference, population);
    let mut ranked: Vec<ScoredCandidate<'a>> = population
        .iter()
        .zip(scores)
        .filter(|(item, _)| item.id != reference.id)
        .map(|(item, score)| ScoredCandidate { item, score })
        .collect();
    sort_descending(&mut ranked);
    debug!(
        "ranked {} candidates against item {}",
        ranked.len(),
        reference.id
    );
    ranked
}

/// Return the `limit` items most similar to `reference`.
///
/// # Examples
/// ```
/// use homestay_core::test_support::{APARTMENT_Z, VILLA_Y, scenario_catalog, villa_x};
/// use homestay_scorer::{PairwiseScorer, nearest_neighbours};
///
/// let population = scenario_catalog();
/// let similar = nearest_neighbours(&PairwiseScorer::default(), &villa_x(), &population, 2);
/// let ids: Vec<u64> = similar.iter().map(|item| item.id).collect();
/// assert_eq!(ids, vec![VILLA_Y, APARTMENT_Z]);
/// ```
#[must_use]
pub fn nearest_neighbours<'a, S>(
    scorer: &S,
    reference: &CatalogItem,
    population: &'a [CatalogItem],
    limit: usize,
) -> Vec<&'a CatalogItem>
where
    S: Scorer + ?Sized,
{
    top_items(rank_similar(scorer, reference, population), limit)
}

/// Sort the whole population by `rating × review_count`.
#[must_use]
pub fn rank_by_popularity(population: &[CatalogItem]) -> Vec<ScoredCandidate<'_>> {
    let mut ranked: Vec<ScoredCandidate<'_>> = population
        .iter()
        .map(|item| ScoredCandidate {
            item,
            score: item.popularity(),
        })
        .collect();
    sort_descending(&mut ranked);
    ranked
}

/// Return the `limit` most popular items.
#[must_use]
pub fn popular(population: &[CatalogItem], limit: usize) -> Vec<&CatalogItem> {
    top_items(rank_by_popularity(population), limit)
}

/// Rank the population for a user with the given history.
///
/// An empty history falls back to [`rank_by_popularity`]. Otherwise each
/// item is matched against the [`PreferenceProfile`] of the history.
#[must_use]
pub fn rank_for_history<'a>(
    history: &[CatalogItem],
    population: &'a [CatalogItem],
    weights: &ProfileWeights,
    policy: &ProfilePolicy,
) -> Vec<ScoredCandidate<'a>> {
    let Some(profile) = PreferenceProfile::from_history(history) else {
        debug!("empty history; ranking {} items by popularity", population.len());
        return rank_by_popularity(population);
    };
    let mut ranked: Vec<ScoredCandidate<'a>> = population
        .iter()
        .map(|item| ScoredCandidate {
            item,
            score: profile.score(item, weights, policy),
        })
        .collect();
    sort_descending(&mut ranked);
    debug!(
        "ranked {} items against a profile built from {} history items",
        ranked.len(),
        history.len()
    );
    ranked
}

/// Return the `limit` best items for a user with the given history, using
/// the default profile weights.
///
/// # Examples
/// ```
/// use homestay_core::test_support::{APARTMENT_Z, scenario_catalog};
/// use homestay_scorer::personalised;
///
/// let population = scenario_catalog();
/// // No history: the most reviewed listing wins.
/// let picks = personalised(&[], &population, 1);
/// assert_eq!(picks[0].id, APARTMENT_Z);
/// ```
#[must_use]
pub fn personalised<'a>(
    history: &[CatalogItem],
    population: &'a [CatalogItem],
    limit: usize,
) -> Vec<&'a CatalogItem> {
    top_items(
        rank_for_history(
            history,
            population,
            &ProfileWeights::default(),
            &ProfilePolicy::default(),
        ),
        limit,
    )
}

fn sort_descending(candidates: &mut [ScoredCandidate<'_>]) {
    // `sort_by` is stable: equal scores keep population order. NaN ranks last.
    let key = |score: f64| if score.is_nan() { f64::NEG_INFINITY } else { score };
    candidates.sort_by(|a, b| key(b.score).total_cmp(&key(a.score)));
}

fn top_items(ranked: Vec<ScoredCandidate<'_>>, limit: usize) -> Vec<&CatalogItem> {
    ranked
        .into_iter()
        .take(limit)
        .map(|candidate| candidate.item)
        .collect()
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use geo::Coord;
    use homestay_core::test_support::{
        APARTMENT_Z, KindScorer, VILLA_X, VILLA_Y, apartment_z, scenario_catalog, villa_x, villa_y,
    };
    use rstest::{fixture, rstest};

    use crate::PairwiseScorer;

    #[fixture]
    fn population() -> Vec<CatalogItem> {
        scenario_catalog()
    }

    fn ids(items: &[&CatalogItem]) -> Vec<u64> {
        items.iter().map(|item| item.id).collect()
    }

    #[rstest]
    fn villa_prefers_the_other_villa(population: Vec<CatalogItem>) {
        let similar = nearest_neighbours(&PairwiseScorer::default(), &villa_x(), &population, 2);
        assert_eq!(ids(&similar), vec![VILLA_Y, APARTMENT_Z]);
    }

    #[rstest]
    fn reference_is_never_returned(population: Vec<CatalogItem>) {
        let similar = nearest_neighbours(&PairwiseScorer::default(), &villa_y(), &population, 10);
        assert!(similar.iter().all(|item| item.id != VILLA_Y));
        assert_eq!(similar.len(), 2);
    }

    #[rstest]
    fn duplicates_of_the_reference_are_excluded(population: Vec<CatalogItem>) {
        let mut doubled = population;
        doubled.push(villa_x());
        let similar = nearest_neighbours(&PairwiseScorer::default(), &villa_x(), &doubled, 10);
        assert!(similar.iter().all(|item| item.id != VILLA_X));
    }

    #[rstest]
    fn empty_and_singleton_populations_yield_nothing() {
        let scorer = PairwiseScorer::default();
        assert!(nearest_neighbours(&scorer, &villa_x(), &[], 4).is_empty());
        assert!(nearest_neighbours(&scorer, &villa_x(), &[villa_x()], 4).is_empty());
        assert!(personalised(&[villa_x()], &[], 8).is_empty());
        assert!(popular(&[], 8).is_empty());
    }

    #[rstest]
    fn ties_keep_population_order() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let population: Vec<CatalogItem> = (1..=5)
            .map(|id| CatalogItem::new(id, "VILLA", "Huế", origin))
            .collect();
        let reference = CatalogItem::new(99, "VILLA", "Huế", origin);
        let similar = nearest_neighbours(&KindScorer, &reference, &population, 5);
        assert_eq!(ids(&similar), vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn limit_truncates(population: Vec<CatalogItem>) {
        let similar = nearest_neighbours(&PairwiseScorer::default(), &villa_x(), &population, 1);
        assert_eq!(ids(&similar), vec![VILLA_Y]);
        assert!(
            nearest_neighbours(&PairwiseScorer::default(), &villa_x(), &population, 0).is_empty()
        );
    }

    #[rstest]
    fn empty_history_falls_back_to_popularity(population: Vec<CatalogItem>) {
        // Popularity: Z = 4.7 × 300, X = 4.9 × 120, Y = 4.7 × 80.
        let picks = personalised(&[], &population, 8);
        assert_eq!(ids(&picks), vec![APARTMENT_Z, VILLA_X, VILLA_Y]);
        assert_eq!(ids(&picks), ids(&popular(&population, 8)));
    }

    #[rstest]
    fn popularity_scores_are_reported(population: Vec<CatalogItem>) {
        let ranked = rank_by_popularity(&population);
        let scores: Vec<f64> = ranked.iter().map(|candidate| candidate.score).collect();
        assert!(scores.windows(2).all(|pair| pair.first() >= pair.last()));
        let top = scores.first().copied().unwrap_or_default();
        assert!((top - 4.7 * 300.0).abs() < 1e-9);
    }

    #[rstest]
    fn nan_popularity_ranks_last(population: Vec<CatalogItem>) {
        let mut catalog = population;
        let mut unrated = villa_y();
        unrated.id = 99;
        unrated.rating = f64::NAN;
        catalog.insert(0, unrated);
        let picks = popular(&catalog, 8);
        assert_eq!(ids(&picks), vec![APARTMENT_Z, VILLA_X, VILLA_Y, 99]);
    }

    #[rstest]
    fn villa_history_promotes_villas(population: Vec<CatalogItem>) {
        let picks = personalised(&[villa_x()], &population, 8);
        assert_eq!(ids(&picks), vec![VILLA_X, VILLA_Y, APARTMENT_Z]);
    }

    #[rstest]
    fn apartment_history_promotes_the_apartment(population: Vec<CatalogItem>) {
        let picks = personalised(&[apartment_z()], &population, 1);
        assert_eq!(ids(&picks), vec![APARTMENT_Z]);
    }

    #[rstest]
    fn default_limits() {
        let limits = RankingLimits::default();
        assert_eq!(limits.similar, 4);
        assert_eq!(limits.personalised, 8);
    }
}
