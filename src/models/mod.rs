use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod catalog;
mod title;

pub use catalog::Catalog;
pub use title::{ContentType, Item};

/// Title → rating given by the user in the current session
pub type RatingSet = HashMap<String, f64>;

/// A catalog title paired with the score it earned for a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f64,
}

impl ScoredTitle {
    pub fn new(title: impl Into<String>, score: f64) -> Self {
        Self {
            title: title.into(),
            score,
        }
    }
}

/// Orders by score descending and keeps the first `n`
///
/// The sort is stable, so equal scores keep the order they arrived in.
pub fn rank_top(mut scored: Vec<ScoredTitle>, n: usize) -> Vec<ScoredTitle> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_top_is_stable_for_ties() {
        let ranked = rank_top(
            vec![
                ScoredTitle::new("first", 0.5),
                ScoredTitle::new("best", 0.9),
                ScoredTitle::new("second", 0.5),
                ScoredTitle::new("third", 0.5),
            ],
            3,
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["best", "first", "second"]);
    }

    #[test]
    fn test_rank_top_with_large_n_returns_everything() {
        let ranked = rank_top(vec![ScoredTitle::new("only", 0.1)], 10);
        assert_eq!(ranked.len(), 1);
    }
}
