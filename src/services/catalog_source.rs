//! Catalog sources
//!
//! Hosts load a flat list of items for a content type from one of these and
//! hand it to `Catalog::from_items`. Sources do no deduplication; the catalog
//! does.
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{ContentType, Item},
};

const TITLE_COLUMNS: &[&str] = &["title", "name", "show_title"];
const DESCRIPTION_COLUMNS: &[&str] = &["description"];
const GENRE_COLUMNS: &[&str] = &["genre", "genres", "listed_in"];

/// Trait for anything that can supply catalog items
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads every item of `content_type`; `All` yields movies followed by shows
    async fn load(&self, content_type: ContentType) -> AppResult<Vec<Item>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Reads movies and shows from two CSV files
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    movies_path: PathBuf,
    shows_path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(movies_path: impl Into<PathBuf>, shows_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            shows_path: shows_path.into(),
        }
    }

    fn paths(&self, content_type: ContentType) -> Vec<PathBuf> {
        match content_type {
            ContentType::Movies => vec![self.movies_path.clone()],
            ContentType::Shows => vec![self.shows_path.clone()],
            ContentType::All => vec![self.movies_path.clone(), self.shows_path.clone()],
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn load(&self, content_type: ContentType) -> AppResult<Vec<Item>> {
        let paths = self.paths(content_type);
        let items = tokio::task::spawn_blocking(move || read_files(&paths))
            .await
            .map_err(|e| AppError::Internal(format!("Catalog load task failed: {}", e)))??;

        tracing::info!(
            content_type = %content_type,
            items = items.len(),
            "Loaded catalog rows from CSV"
        );
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

fn read_files(paths: &[PathBuf]) -> AppResult<Vec<Item>> {
    let mut items = Vec::new();
    for path in paths {
        items.extend(read_file(path)?);
    }
    Ok(items)
}

fn read_file(path: &Path) -> AppResult<Vec<Item>> {
    let file = std::fs::File::open(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open catalog file");
        e
    })?;
    read_items(file)
}

/// Parses catalog rows from CSV
///
/// The title column may be called `title`, `name` or `show_title`. Genres are
/// taken from `genre`, `genres` or `listed_in` and split on commas. Missing
/// columns and short rows yield empty fields; unreadable rows are skipped.
pub fn read_items<R: Read>(reader: R) -> AppResult<Vec<Item>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let column = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
    };
    let title = column(TITLE_COLUMNS).ok_or_else(|| {
        AppError::CatalogFormat(format!(
            "no title column found (expected one of {})",
            TITLE_COLUMNS.join(", ")
        ))
    })?;
    let description = column(DESCRIPTION_COLUMNS);
    let genre = column(GENRE_COLUMNS);

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable catalog row");
                skipped += 1;
                continue;
            }
        };
        let field = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("").trim();

        items.push(Item {
            title: field(Some(title)).to_string(),
            description: field(description).to_string(),
            genre: Item::split_genres(field(genre)),
        });
    }

    if skipped > 0 {
        tracing::warn!(count = skipped, "Skipped unreadable catalog rows");
    }

    Ok(items)
}

/// Fixed item lists, for hosts that already hold their catalog in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    movies: Vec<Item>,
    shows: Vec<Item>,
}

impl InMemoryCatalogSource {
    pub fn new(movies: Vec<Item>, shows: Vec<Item>) -> Self {
        Self { movies, shows }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load(&self, content_type: ContentType) -> AppResult<Vec<Item>> {
        Ok(match content_type {
            ContentType::Movies => self.movies.clone(),
            ContentType::Shows => self.shows.clone(),
            ContentType::All => self.movies.iter().chain(&self.shows).cloned().collect(),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
