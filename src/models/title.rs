use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::RecommendError;

/// Which slice of the content library a session recommends from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movies,
    Shows,
    /// Movies followed by shows
    All,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movies => "movies",
            ContentType::Shows => "shows",
            ContentType::All => "all",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movies" | "movie" => Ok(ContentType::Movies),
            "shows" | "show" | "tv shows" | "tv_shows" | "tv" => Ok(ContentType::Shows),
            "all" => Ok(ContentType::All),
            other => Err(RecommendError::InvalidConfiguration(format!(
                "unknown content type '{}' (expected movies, shows or all)",
                other
            ))),
        }
    }
}

/// A movie or TV show in the catalog
///
/// Absent fields deserialize to empty values so that sparse rows are still
/// scoreable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Item {
    /// Unique key within a catalog
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ordered genre tags, e.g. `["Dramas", "International Movies"]`
    #[serde(default)]
    pub genre: Vec<String>,
}

impl Item {
    pub fn new(title: impl Into<String>, description: impl Into<String>, genre: &[&str]) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            genre: genre.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Splits a comma-separated genre cell such as `"Action, Comedy"` into tags
    pub fn split_genres(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parsing() {
        assert_eq!("movies".parse::<ContentType>().unwrap(), ContentType::Movies);
        assert_eq!("TV Shows".parse::<ContentType>().unwrap(), ContentType::Shows);
        assert_eq!(" all ".parse::<ContentType>().unwrap(), ContentType::All);
    }

    #[test]
    fn test_unknown_content_type_is_invalid_configuration() {
        let err = "podcasts".parse::<ContentType>().unwrap_err();
        assert!(matches!(err, RecommendError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_content_type_serialization() {
        let json = serde_json::to_string(&ContentType::Shows).unwrap();
        assert_eq!(json, "\"shows\"");
    }

    #[test]
    fn test_item_missing_fields_default_to_empty() {
        let item: Item = serde_json::from_str(r#"{"title":"Roma"}"#).unwrap();
        assert_eq!(item.title, "Roma");
        assert!(item.description.is_empty());
        assert!(item.genre.is_empty());
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(
            Item::split_genres("Action & Adventure, Comedies,"),
            vec!["Action & Adventure".to_string(), "Comedies".to_string()]
        );
        assert!(Item::split_genres("").is_empty());
    }
}
