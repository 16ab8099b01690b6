use serde::Serialize;

use super::hybrid::HybridBlender;
use super::ranker::ContentRanker;
use super::ratings::{RatingAggregator, RatingScale};
use super::similarity::{ContentWeights, SimilarityStrategy, StrategyKind};
use super::RecommendError;
use crate::models::{Catalog, RatingSet, ScoredTitle};

/// Engine choices fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineSettings {
    pub strategy: StrategyKind,
    pub weights: ContentWeights,
    pub rating_scale: RatingScale,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Jaccard,
            weights: ContentWeights::default(),
            rating_scale: RatingScale::TenPoint,
        }
    }
}

/// A catalog bundled with the similarity strategy prepared for it
///
/// The strategy is prepared for, or checked against, the catalog when the
/// `Recommender` is built. Replacing the catalog means building a new one.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    strategy: SimilarityStrategy,
    rating_scale: RatingScale,
}

impl Recommender {
    pub fn new(catalog: Catalog, settings: EngineSettings) -> Self {
        let strategy = SimilarityStrategy::prepare(settings.strategy, &catalog, settings.weights);
        tracing::info!(
            items = catalog.len(),
            strategy = %settings.strategy,
            "Prepared recommender"
        );
        Self {
            catalog,
            strategy,
            rating_scale: settings.rating_scale,
        }
    }

    /// Pairs a catalog with an already prepared strategy
    ///
    /// Fails with `NotFitted` when the strategy was prepared for a different
    /// catalog.
    pub fn with_strategy(
        catalog: Catalog,
        strategy: SimilarityStrategy,
        rating_scale: RatingScale,
    ) -> Result<Self, RecommendError> {
        strategy.ensure_matches(&catalog)?;

        Ok(Self {
            catalog,
            strategy,
            rating_scale,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn rating_scale(&self) -> RatingScale {
        self.rating_scale
    }

    pub fn find_similar(&self, title: &str, n: usize) -> Result<Vec<ScoredTitle>, RecommendError> {
        self.ranker()?.find_similar(title, n)
    }

    pub fn recommend_from_ratings(
        &self,
        ratings: &RatingSet,
        n: usize,
    ) -> Result<Vec<ScoredTitle>, RecommendError> {
        self.aggregator()?.recommend_from_ratings(ratings, n)
    }

    pub fn blend(
        &self,
        title: &str,
        ratings: &RatingSet,
        n: usize,
    ) -> Result<Vec<String>, RecommendError> {
        HybridBlender::new(self.ranker()?, self.aggregator()?).blend(title, ratings, n)
    }

    fn ranker(&self) -> Result<ContentRanker<'_>, RecommendError> {
        ContentRanker::new(&self.catalog, &self.strategy)
    }

    fn aggregator(&self) -> Result<RatingAggregator<'_>, RecommendError> {
        RatingAggregator::new(&self.catalog, &self.strategy, self.rating_scale)
    }
}
