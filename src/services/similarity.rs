use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use super::normalizer::{normalize, normalize_genres};
use super::tfidf::FittedCorpus;
use super::RecommendError;
use crate::models::{rank_top, Catalog, Item, ScoredTitle};

/// `|A ∩ B| / |A ∪ B|`, or 0.0 when either side is empty
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Per-field weights of the Jaccard strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentWeights {
    pub description: f64,
    pub genre: f64,
    pub title: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            description: 0.5,
            genre: 0.3,
            title: 0.2,
        }
    }
}

/// Token sets of one item, computed once per catalog
#[derive(Debug, Clone, Default)]
pub struct ItemProfile {
    description: HashSet<String>,
    genre: HashSet<String>,
    title: HashSet<String>,
}

impl ItemProfile {
    pub fn from_item(item: &Item) -> Self {
        Self {
            description: normalize(&item.description),
            genre: normalize_genres(&item.genre),
            title: normalize(&item.title),
        }
    }

    pub fn similarity(&self, other: &ItemProfile, weights: &ContentWeights) -> f64 {
        weights.description * jaccard(&self.description, &other.description)
            + weights.genre * jaccard(&self.genre, &other.genre)
            + weights.title * jaccard(&self.title, &other.title)
    }
}

/// Weighted Jaccard similarity of two items over description, genre and title
pub fn content_similarity(a: &Item, b: &Item) -> f64 {
    ItemProfile::from_item(a).similarity(&ItemProfile::from_item(b), &ContentWeights::default())
}

/// Configured choice of similarity strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Jaccard,
    TfIdf,
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Jaccard => f.write_str("jaccard"),
            StrategyKind::TfIdf => f.write_str("tfidf"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jaccard" => Ok(StrategyKind::Jaccard),
            "tfidf" | "tf-idf" | "cosine" => Ok(StrategyKind::TfIdf),
            other => Err(RecommendError::InvalidConfiguration(format!(
                "unknown similarity strategy '{}' (expected jaccard or tfidf)",
                other
            ))),
        }
    }
}

/// A similarity strategy prepared for one catalog
///
/// Both variants index items by their catalog position, remember the titles
/// they were prepared for, and score in [0, 1].
#[derive(Debug, Clone)]
pub enum SimilarityStrategy {
    Jaccard {
        weights: ContentWeights,
        titles: Vec<String>,
        profiles: Vec<ItemProfile>,
    },
    Corpus(FittedCorpus),
}

impl SimilarityStrategy {
    pub fn jaccard(catalog: &Catalog, weights: ContentWeights) -> Self {
        SimilarityStrategy::Jaccard {
            weights,
            titles: catalog.titles().map(str::to_string).collect(),
            profiles: catalog.items().iter().map(ItemProfile::from_item).collect(),
        }
    }

    pub fn prepare(kind: StrategyKind, catalog: &Catalog, weights: ContentWeights) -> Self {
        match kind {
            StrategyKind::Jaccard => Self::jaccard(catalog, weights),
            StrategyKind::TfIdf => SimilarityStrategy::Corpus(FittedCorpus::for_catalog(catalog)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            SimilarityStrategy::Jaccard { .. } => StrategyKind::Jaccard,
            SimilarityStrategy::Corpus(_) => StrategyKind::TfIdf,
        }
    }

    /// Titles this strategy was prepared for, in catalog order
    pub fn titles(&self) -> &[String] {
        match self {
            SimilarityStrategy::Jaccard { titles, .. } => titles,
            SimilarityStrategy::Corpus(corpus) => corpus.titles(),
        }
    }

    /// Number of catalog rows this strategy was prepared for
    pub fn len(&self) -> usize {
        self.titles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the strategy was prepared for exactly this catalog's titles, in order
    pub fn matches_catalog(&self, catalog: &Catalog) -> bool {
        let titles = self.titles();
        titles.len() == catalog.len() && titles.iter().map(String::as_str).eq(catalog.titles())
    }

    /// Fails with `NotFitted` unless the strategy was prepared for `catalog`
    pub fn ensure_matches(&self, catalog: &Catalog) -> Result<(), RecommendError> {
        if self.matches_catalog(catalog) {
            return Ok(());
        }
        Err(RecommendError::NotFitted(format!(
            "{} strategy was prepared for a different catalog ({} items, catalog has {})",
            self.kind(),
            self.len(),
            catalog.len()
        )))
    }

    /// Similarity between the items at catalog positions `a` and `b`
    pub fn similarity(&self, a: usize, b: usize) -> Result<f64, RecommendError> {
        match self {
            SimilarityStrategy::Jaccard {
                weights, profiles, ..
            } => {
                let (left, right) = profiles
                    .get(a)
                    .zip(profiles.get(b))
                    .ok_or_else(|| not_prepared(a.max(b), profiles.len()))?;
                Ok(left.similarity(right, weights))
            }
            SimilarityStrategy::Corpus(corpus) => corpus.similarity(a, b),
        }
    }

    /// Top `n` items most similar to the item at `index`, excluding itself
    pub fn similar_to(&self, index: usize, n: usize) -> Result<Vec<ScoredTitle>, RecommendError> {
        match self {
            SimilarityStrategy::Corpus(corpus) => corpus.similar_to(index, n),
            SimilarityStrategy::Jaccard { titles, .. } => {
                if index >= titles.len() {
                    return Err(not_prepared(index, titles.len()));
                }
                let mut scored = Vec::with_capacity(titles.len() - 1);
                for (other, title) in titles.iter().enumerate() {
                    if other == index {
                        continue;
                    }
                    scored.push(ScoredTitle::new(title.clone(), self.similarity(index, other)?));
                }
                Ok(rank_top(scored, n))
            }
        }
    }
}

fn not_prepared(index: usize, rows: usize) -> RecommendError {
    RecommendError::NotFitted(format!(
        "strategy has no row {} (prepared for {} items)",
        index, rows
    ))
}
