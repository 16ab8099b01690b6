use super::similarity::SimilarityStrategy;
use super::RecommendError;
use crate::models::{Catalog, ScoredTitle};

/// Ranks catalog items by similarity to a single reference title
pub struct ContentRanker<'a> {
    catalog: &'a Catalog,
    strategy: &'a SimilarityStrategy,
}

impl<'a> ContentRanker<'a> {
    /// Fails with `NotFitted` when `strategy` was prepared for another catalog
    pub fn new(
        catalog: &'a Catalog,
        strategy: &'a SimilarityStrategy,
    ) -> Result<Self, RecommendError> {
        strategy.ensure_matches(catalog)?;
        Ok(Self { catalog, strategy })
    }

    /// Returns the `n` items most similar to `reference_title`
    ///
    /// The title must match a catalog entry exactly. The reference item is
    /// never part of the result, and equal scores keep catalog order.
    pub fn find_similar(
        &self,
        reference_title: &str,
        n: usize,
    ) -> Result<Vec<ScoredTitle>, RecommendError> {
        let index = self
            .catalog
            .index_of(reference_title)
            .ok_or_else(|| RecommendError::NotFound(reference_title.to_string()))?;

        let similar = self.strategy.similar_to(index, n)?;
        tracing::debug!(
            title = %reference_title,
            strategy = %self.strategy.kind(),
            returned = similar.len(),
            "Ranked similar titles"
        );
        Ok(similar)
    }
}
