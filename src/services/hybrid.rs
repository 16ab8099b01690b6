use std::collections::HashMap;

use super::ranker::ContentRanker;
use super::ratings::RatingAggregator;
use super::RecommendError;
use crate::models::{rank_top, RatingSet, ScoredTitle};

pub const CONTENT_WEIGHT: f64 = 0.5;
pub const RATING_WEIGHT: f64 = 0.5;

/// Blends "similar to what I just watched" with "similar to what I rated"
///
/// A title found by only one side keeps its weighted score from that side and
/// gets nothing from the other; scores are not renormalized.
pub struct HybridBlender<'a> {
    ranker: ContentRanker<'a>,
    aggregator: RatingAggregator<'a>,
}

impl<'a> HybridBlender<'a> {
    pub fn new(ranker: ContentRanker<'a>, aggregator: RatingAggregator<'a>) -> Self {
        Self { ranker, aggregator }
    }

    /// Top `n` titles by combined score
    pub fn blend(
        &self,
        reference_title: &str,
        ratings: &RatingSet,
        n: usize,
    ) -> Result<Vec<String>, RecommendError> {
        Ok(self
            .blend_scored(reference_title, ratings, n)?
            .into_iter()
            .map(|scored| scored.title)
            .collect())
    }

    /// Same ranking as [`HybridBlender::blend`], keeping the combined scores
    pub fn blend_scored(
        &self,
        reference_title: &str,
        ratings: &RatingSet,
        n: usize,
    ) -> Result<Vec<ScoredTitle>, RecommendError> {
        let content = self.ranker.find_similar(reference_title, n)?;
        let rated = self.aggregator.recommend_from_ratings(ratings, n)?;

        let combined = combine(&content, &rated);
        tracing::debug!(
            title = %reference_title,
            content = content.len(),
            rated = rated.len(),
            combined = combined.len(),
            "Blended recommendation lists"
        );
        Ok(rank_top(combined, n))
    }
}

/// Weighted sum per title, in first-seen order (content list first)
fn combine(content: &[ScoredTitle], rated: &[ScoredTitle]) -> Vec<ScoredTitle> {
    let mut combined: Vec<ScoredTitle> = Vec::with_capacity(content.len() + rated.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    let weighted = content
        .iter()
        .map(|s| (s, CONTENT_WEIGHT))
        .chain(rated.iter().map(|s| (s, RATING_WEIGHT)));
    for (scored, weight) in weighted {
        match positions.get(scored.title.as_str()) {
            Some(&position) => combined[position].score += scored.score * weight,
            None => {
                positions.insert(scored.title.as_str(), combined.len());
                combined.push(ScoredTitle::new(scored.title.clone(), scored.score * weight));
            }
        }
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Item};
    use crate::services::ratings::RatingScale;
    use crate::services::similarity::{ContentWeights, SimilarityStrategy};

    fn sample_catalog() -> Catalog {
        Catalog::from_items(vec![
            Item::new("A", "space aliens invade earth", &["Sci-Fi"]),
            Item::new("B", "aliens land on earth", &["Sci-Fi"]),
            Item::new("C", "a romantic comedy in paris", &["Romance"]),
            Item::new("D", "aliens fall in love in paris", &["Romance", "Sci-Fi"]),
        ])
    }

    fn ratings(pairs: &[(&str, f64)]) -> RatingSet {
        pairs.iter().map(|(t, r)| (t.to_string(), *r)).collect()
    }

    #[test]
    fn test_combine_averages_shared_and_halves_single_source() {
        let content = vec![ScoredTitle::new("X", 0.8), ScoredTitle::new("Y", 0.4)];
        let rated = vec![ScoredTitle::new("X", 0.2), ScoredTitle::new("Z", 0.6)];
        let combined = combine(&content, &rated);

        assert_eq!(
            combined,
            vec![
                ScoredTitle::new("X", (0.8 + 0.2) / 2.0),
                ScoredTitle::new("Y", 0.2),
                ScoredTitle::new("Z", 0.3),
            ]
        );
    }

    #[test]
    fn test_combine_tie_break_prefers_content_list() {
        let content = vec![ScoredTitle::new("Content", 0.4)];
        let rated = vec![ScoredTitle::new("Rated", 0.4)];
        let ranked = rank_top(combine(&content, &rated), 2);
        assert_eq!(ranked[0].title, "Content");
        assert_eq!(ranked[1].title, "Rated");
    }

    #[test]
    fn test_blend_with_no_ratings_is_half_content() {
        let catalog = sample_catalog();
        let strategy = SimilarityStrategy::jaccard(&catalog, ContentWeights::default());
        let ranker = ContentRanker::new(&catalog, &strategy).unwrap();
        let content = ranker.find_similar("A", 3).unwrap();

        let blender = HybridBlender::new(
            ContentRanker::new(&catalog, &strategy).unwrap(),
            RatingAggregator::new(&catalog, &strategy, RatingScale::TenPoint).unwrap(),
        );
        let blended = blender.blend_scored("A", &RatingSet::new(), 3).unwrap();

        assert_eq!(blended.len(), content.len());
        for (b, c) in blended.iter().zip(&content) {
            assert_eq!(b.title, c.title);
            assert_eq!(b.score, c.score * CONTENT_WEIGHT);
        }
    }

    #[test]
    fn test_blend_returns_titles_only_and_truncates() {
        let catalog = sample_catalog();
        let strategy = SimilarityStrategy::jaccard(&catalog, ContentWeights::default());
        let blender = HybridBlender::new(
            ContentRanker::new(&catalog, &strategy).unwrap(),
            RatingAggregator::new(&catalog, &strategy, RatingScale::TenPoint).unwrap(),
        );

        let titles = blender.blend("A", &ratings(&[("C", 10.0)]), 2).unwrap();
        // B only comes from the content side, D from both
        assert_eq!(titles, vec!["B".to_string(), "D".to_string()]);

        let scored = blender.blend_scored("A", &ratings(&[("C", 10.0)]), 2).unwrap();
        let content = ContentRanker::new(&catalog, &strategy).unwrap().find_similar("A", 2).unwrap();
        let rated = RatingAggregator::new(&catalog, &strategy, RatingScale::TenPoint).unwrap()
            .recommend_from_ratings(&ratings(&[("C", 10.0)]), 2)
            .unwrap();
        let d_content = content.iter().find(|s| s.title == "D").unwrap().score;
        let d_rated = rated.iter().find(|s| s.title == "D").unwrap().score;
        assert!((scored[1].score - (d_content + d_rated) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_blend_unknown_reference_title() {
        let catalog = sample_catalog();
        let strategy = SimilarityStrategy::jaccard(&catalog, ContentWeights::default());
        let blender = HybridBlender::new(
            ContentRanker::new(&catalog, &strategy).unwrap(),
            RatingAggregator::new(&catalog, &strategy, RatingScale::TenPoint).unwrap(),
        );
        assert!(matches!(
            blender.blend("Nope", &RatingSet::new(), 3),
            Err(RecommendError::NotFound(_))
        ));
    }
}
