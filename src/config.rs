use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::ContentType;
use crate::services::{ContentWeights, EngineSettings, RatingScale, StrategyKind};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file with the movie catalog
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// CSV file with the TV show catalog
    #[serde(default = "default_shows_path")]
    pub shows_path: String,

    /// Catalog loaded at startup: movies, shows or all
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// jaccard or tfidf
    #[serde(default = "default_similarity_strategy")]
    pub similarity_strategy: String,

    /// Top of the rating scale, 5 or 10
    #[serde(default = "default_rating_scale_max")]
    pub rating_scale_max: u32,

    /// Recommendations returned when a request has no count
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Largest count a request may ask for
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_movies_path() -> String {
    "movies.csv".to_string()
}

fn default_shows_path() -> String {
    "tv_shows.csv".to_string()
}

fn default_content_type() -> String {
    "movies".to_string()
}

fn default_similarity_strategy() -> String {
    "jaccard".to_string()
}

fn default_rating_scale_max() -> u32 {
    10
}

fn default_count() -> usize {
    5
}

fn default_max_count() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Validated engine settings for new sessions
    pub fn engine_settings(&self) -> AppResult<EngineSettings> {
        Ok(EngineSettings {
            strategy: self.similarity_strategy.parse::<StrategyKind>()?,
            weights: ContentWeights::default(),
            rating_scale: RatingScale::try_from(self.rating_scale_max)?,
        })
    }

    /// Validated startup content type
    pub fn content_type(&self) -> AppResult<ContentType> {
        Ok(self.content_type.parse::<ContentType>()?)
    }

    /// Validated request count limits
    pub fn count_limits(&self) -> AppResult<(usize, usize)> {
        if self.default_count == 0 || self.default_count > self.max_count {
            return Err(AppError::InvalidConfiguration(format!(
                "default count {} must be between 1 and max count {}",
                self.default_count, self.max_count
            )));
        }
        Ok((self.default_count, self.max_count))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.movies_path, "movies.csv");
        assert_eq!(config.shows_path, "tv_shows.csv");
        assert_eq!(config.content_type().unwrap(), ContentType::Movies);
        assert_eq!(config.engine_settings().unwrap(), EngineSettings::default());
        assert_eq!(config.count_limits().unwrap(), (5, 50));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SIMILARITY_STRATEGY", "tfidf"),
            ("RATING_SCALE_MAX", "5"),
            ("CONTENT_TYPE", "shows"),
            ("PORT", "8080"),
        ]);
        let settings = config.engine_settings().unwrap();
        assert_eq!(settings.strategy, StrategyKind::TfIdf);
        assert_eq!(settings.rating_scale, RatingScale::FivePoint);
        assert_eq!(config.content_type().unwrap(), ContentType::Shows);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_selectors() {
        let config = config_from(&[("SIMILARITY_STRATEGY", "word2vec")]);
        assert!(matches!(
            config.engine_settings(),
            Err(AppError::InvalidConfiguration(_))
        ));

        let config = config_from(&[("RATING_SCALE_MAX", "7")]);
        assert!(config.engine_settings().is_err());

        let config = config_from(&[("CONTENT_TYPE", "podcasts")]);
        assert!(matches!(
            config.content_type(),
            Err(AppError::InvalidConfiguration(_))
        ));

        let config = config_from(&[("DEFAULT_COUNT", "80")]);
        assert!(config.count_limits().is_err());
    }
}
