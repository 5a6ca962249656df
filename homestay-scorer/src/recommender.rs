//! A configured bundle of the three ranking entry points.

use homestay_core::{CatalogItem, ListingDraft};

use crate::{
    ConfigurationError, PairwiseScorer, PriceEstimate, PricePredictor, ProfilePolicy,
    ProfileWeights, RankingLimits, ScoredCandidate, ranking,
};

/// Similar items, personalised picks and price suggestions with one set of
/// weights and limits.
///
/// # Examples
/// ```
/// use homestay_core::test_support::{VILLA_Y, scenario_catalog, villa_x};
/// use homestay_scorer::{RankingLimits, Recommender};
///
/// let recommender = Recommender::default().with_limits(RankingLimits {
///     similar: 1,
///     personalised: 2,
/// });
/// let population = scenario_catalog();
/// let similar = recommender.similar(&villa_x(), &population);
/// assert_eq!(similar.len(), 1);
/// assert_eq!(similar[0].id, VILLA_Y);
/// assert_eq!(recommender.recommend(&[], &population).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    scorer: PairwiseScorer,
    profile_weights: ProfileWeights,
    profile_policy: ProfilePolicy,
    pricer: PricePredictor,
    limits: RankingLimits,
}

impl Recommender {
    /// Assemble a recommender from validated parts.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when the profile weights or policy are
    /// unusable.
    pub fn new(
        scorer: PairwiseScorer,
        profile_weights: ProfileWeights,
        profile_policy: ProfilePolicy,
        pricer: PricePredictor,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            scorer,
            profile_weights: profile_weights.validate()?,
            profile_policy: profile_policy.validate()?,
            pricer,
            limits: RankingLimits::default(),
        })
    }

    /// Replace the result limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: RankingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The active result limits.
    #[must_use]
    pub const fn limits(&self) -> RankingLimits {
        self.limits
    }

    /// The item-to-item scorer.
    #[must_use]
    pub const fn scorer(&self) -> &PairwiseScorer {
        &self.scorer
    }

    /// Items most similar to `reference`, excluding the reference itself.
    #[must_use]
    pub fn similar<'a>(
        &self,
        reference: &CatalogItem,
        population: &'a [CatalogItem],
    ) -> Vec<&'a CatalogItem> {
        ranking::nearest_neighbours(&self.scorer, reference, population, self.limits.similar)
    }

    /// Like [`Recommender::similar`], keeping each item's score.
    #[must_use]
    pub fn similar_scored<'a>(
        &self,
        reference: &CatalogItem,
        population: &'a [CatalogItem],
    ) -> Vec<ScoredCandidate<'a>> {
        let mut ranked = ranking::rank_similar(&self.scorer, reference, population);
        ranked.truncate(self.limits.similar);
        ranked
    }

    /// Personalised picks for `history`, or the most popular items when the
    /// history is empty.
    #[must_use]
    pub fn recommend<'a>(
        &self,
        history: &[CatalogItem],
        population: &'a [CatalogItem],
    ) -> Vec<&'a CatalogItem> {
        self.recommend_scored(history, population)
            .into_iter()
            .map(|candidate| candidate.item)
            .collect()
    }

    /// Like [`Recommender::recommend`], keeping each item's score.
    ///
    /// Scores are profile matches, or popularity when the history is empty.
    #[must_use]
    pub fn recommend_scored<'a>(
        &self,
        history: &[CatalogItem],
        population: &'a [CatalogItem],
    ) -> Vec<ScoredCandidate<'a>> {
        let mut ranked = ranking::rank_for_history(
            history,
            population,
            &self.profile_weights,
            &self.profile_policy,
        );
        ranked.truncate(self.limits.personalised);
        ranked
    }

    /// Suggest a price for `draft`.
    #[must_use]
    pub fn predict_price(&self, draft: &ListingDraft, population: &[CatalogItem]) -> f64 {
        self.pricer.predict(draft, population)
    }

    /// Suggest a price for `draft` and report how it was derived.
    #[must_use]
    pub fn estimate_price(
        &self,
        draft: &ListingDraft,
        population: &[CatalogItem],
    ) -> PriceEstimate {
        self.pricer.estimate(draft, population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestay_core::test_support::{APARTMENT_Z, VILLA_X, scenario_catalog, villa_y};
    use rstest::rstest;

    #[rstest]
    fn defaults_apply_standard_limits() {
        let recommender = Recommender::default();
        assert_eq!(recommender.limits(), RankingLimits::default());
        let population = scenario_catalog();
        assert_eq!(recommender.similar(&villa_y(), &population).len(), 2);
        assert_eq!(recommender.recommend(&[], &population).len(), 3);
    }

    #[rstest]
    fn recommend_uses_history() {
        let population = scenario_catalog();
        let picks = Recommender::default().recommend(&[villa_y()], &population);
        let ids: Vec<u64> = picks.iter().map(|item| item.id).collect();
        assert_eq!(ids.last(), Some(&APARTMENT_Z));
        assert!(ids.contains(&VILLA_X));
    }

    #[rstest]
    fn scored_variants_match_plain_rankings() {
        let recommender = Recommender::default();
        let population = scenario_catalog();
        let scored: Vec<u64> = recommender
            .similar_scored(&villa_y(), &population)
            .iter()
            .map(|candidate| candidate.item.id)
            .collect();
        let plain: Vec<u64> = recommender
            .similar(&villa_y(), &population)
            .iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(scored, plain);
        assert!(
            recommender
                .recommend_scored(&[villa_y()], &population)
                .iter()
                .all(|candidate| (0.0..=1.0).contains(&candidate.score))
        );
    }

    #[rstest]
    fn rejects_unbalanced_profile_weights() {
        let weights = ProfileWeights {
            kind: 0.9,
            ..ProfileWeights::default()
        };
        let result = Recommender::new(
            PairwiseScorer::default(),
            weights,
            ProfilePolicy::default(),
            PricePredictor::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::UnbalancedWeights { .. })
        ));
    }

    #[rstest]
    fn price_helpers_agree() {
        let recommender = Recommender::default();
        let draft = ListingDraft::new("VILLA", "Đà Lạt", 4, 8).with_rating(4.8);
        let population = scenario_catalog();
        assert_eq!(
            recommender.predict_price(&draft, &population),
            recommender.estimate_price(&draft, &population).price()
        );
    }
}
