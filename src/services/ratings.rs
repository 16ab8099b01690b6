use std::fmt::Display;

use serde::Serialize;

use super::similarity::SimilarityStrategy;
use super::RecommendError;
use crate::models::{rank_top, Catalog, RatingSet, ScoredTitle};

/// Upper bound of the rating scale a session collects ratings on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingScale {
    /// 1 to 5
    FivePoint,
    /// 1 to 10
    TenPoint,
}

impl RatingScale {
    pub fn max(&self) -> f64 {
        match self {
            RatingScale::FivePoint => 5.0,
            RatingScale::TenPoint => 10.0,
        }
    }

    /// True when `rating` lies within `[1, max]`
    pub fn contains(&self, rating: f64) -> bool {
        (1.0..=self.max()).contains(&rating)
    }
}

impl TryFrom<u32> for RatingScale {
    type Error = RecommendError;

    fn try_from(max: u32) -> Result<Self, Self::Error> {
        match max {
            5 => Ok(RatingScale::FivePoint),
            10 => Ok(RatingScale::TenPoint),
            other => Err(RecommendError::InvalidConfiguration(format!(
                "unsupported rating scale maximum {} (expected 5 or 10)",
                other
            ))),
        }
    }
}

impl Display for RatingScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1-{}", self.max())
    }
}

/// Scores unrated items by their similarity to the titles a user has rated
pub struct RatingAggregator<'a> {
    catalog: &'a Catalog,
    strategy: &'a SimilarityStrategy,
    scale: RatingScale,
}

impl<'a> RatingAggregator<'a> {
    /// Fails with `NotFitted` when `strategy` was prepared for another catalog
    pub fn new(
        catalog: &'a Catalog,
        strategy: &'a SimilarityStrategy,
        scale: RatingScale,
    ) -> Result<Self, RecommendError> {
        strategy.ensure_matches(catalog)?;
        Ok(Self {
            catalog,
            strategy,
            scale,
        })
    }

    /// Returns the `n` best unrated items for `ratings`
    ///
    /// Each candidate scores `Σ similarity(rated, candidate) × rating / max`.
    /// Rated titles missing from the catalog contribute nothing.
    pub fn recommend_from_ratings(
        &self,
        ratings: &RatingSet,
        n: usize,
    ) -> Result<Vec<ScoredTitle>, RecommendError> {
        if ratings.is_empty() {
            return Ok(Vec::new());
        }

        // Catalog order makes the float summation order independent of map iteration
        let mut rated: Vec<(usize, f64)> = Vec::with_capacity(ratings.len());
        for (title, rating) in ratings {
            match self.catalog.index_of(title) {
                Some(index) => rated.push((index, rating / self.scale.max())),
                None => tracing::debug!(title = %title, "Rated title not in catalog, skipping"),
            }
        }
        rated.sort_by_key(|(index, _)| *index);

        let mut scored = Vec::with_capacity(self.catalog.len());
        for (candidate, item) in self.catalog.items().iter().enumerate() {
            if ratings.contains_key(&item.title) {
                continue;
            }
            let mut total = 0.0;
            for &(rated_index, weight) in &rated {
                total += self.strategy.similarity(rated_index, candidate)? * weight;
            }
            scored.push(ScoredTitle::new(item.title.clone(), total));
        }

        tracing::debug!(
            rated = rated.len(),
            candidates = scored.len(),
            scale = %self.scale,
            "Scored candidates from ratings"
        );

        Ok(rank_top(scored, n))
    }
}
