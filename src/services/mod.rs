use thiserror::Error;

pub mod catalog_source;
pub mod hybrid;
pub mod normalizer;
pub mod ranker;
pub mod ratings;
pub mod recommender;
pub mod similarity;
pub mod tfidf;
pub mod title_search;

pub use catalog_source::{CatalogSource, CsvCatalogSource, InMemoryCatalogSource};
pub use hybrid::HybridBlender;
pub use ranker::ContentRanker;
pub use ratings::{RatingAggregator, RatingScale};
pub use recommender::{EngineSettings, Recommender};
pub use similarity::{ContentWeights, SimilarityStrategy, StrategyKind};
pub use tfidf::FittedCorpus;

/// Error types for the recommendation engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Title '{0}' not found in catalog")]
    NotFound(String),
    #[error("Similarity strategy not fitted: {0}")]
    NotFitted(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
