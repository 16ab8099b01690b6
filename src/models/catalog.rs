use std::collections::HashMap;

use super::Item;
use crate::services::normalizer::canonical_title;

/// The set of recommendable items for one session
///
/// Insertion order is preserved and defines tie-break order for every ranking
/// built on top of the catalog. A catalog is never mutated once built; switching
/// content means building a new one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_title: HashMap<String, usize>,
    by_canonical: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, dropping rows with a blank title and any repeat of an
    /// already-seen title (the first occurrence wins).
    ///
    /// Titles are stored as given, surrounding whitespace included, so exact
    /// lookups use the same string the catalog was built from.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Catalog::default();
        let mut skipped_empty = 0usize;

        for item in items {
            if item.title.trim().is_empty() {
                skipped_empty += 1;
                continue;
            }
            if catalog.by_title.contains_key(&item.title) {
                tracing::warn!(title = %item.title, "Duplicate title in catalog, keeping first");
                continue;
            }

            let index = catalog.items.len();
            catalog.by_title.insert(item.title.clone(), index);
            catalog
                .by_canonical
                .entry(canonical_title(&item.title))
                .or_insert(index);
            catalog.items.push(item);
        }

        if skipped_empty > 0 {
            tracing::warn!(count = skipped_empty, "Skipped catalog rows without a title");
        }

        catalog
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Exact-match lookup of an item's position
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    /// Exact-match lookup
    pub fn find(&self, title: &str) -> Option<&Item> {
        self.index_of(title).map(|i| &self.items[i])
    }

    /// Lookup by lowercased, punctuation-stripped title
    pub fn find_canonical(&self, title: &str) -> Option<&Item> {
        self.by_canonical
            .get(&canonical_title(title))
            .map(|&i| &self.items[i])
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_preserves_insertion_order() {
        let catalog = Catalog::from_items(vec![
            Item::new("Zodiac", "", &[]),
            Item::new("Alien", "", &[]),
            Item::new("Heat", "", &[]),
        ]);
        let titles: Vec<&str> = catalog.titles().collect();
        assert_eq!(titles, vec!["Zodiac", "Alien", "Heat"]);
        assert_eq!(catalog.index_of("Heat"), Some(2));
    }

    #[test]
    fn test_duplicate_titles_keep_first() {
        let catalog = Catalog::from_items(vec![
            Item::new("Dark", "first", &[]),
            Item::new("Dark", "second", &[]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("Dark").unwrap().description, "first");
    }

    #[test]
    fn test_empty_titles_are_dropped() {
        let catalog = Catalog::from_items(vec![
            Item::new("  ", "blank", &[]),
            Item::new("Ozark", "", &[]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Ozark").is_some());
    }

    #[test]
    fn test_titles_are_stored_verbatim() {
        let catalog = Catalog::from_items(vec![
            Item::new("Heat ", "padded", &[]),
            Item::new("Heat", "plain", &[]),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.index_of("Heat "), Some(0));
        assert_eq!(catalog.find("Heat ").unwrap().description, "padded");
        assert_eq!(catalog.find("Heat").unwrap().description, "plain");
    }

    #[test]
    fn test_exact_and_canonical_lookup() {
        let catalog = Catalog::from_items(vec![Item::new("Spider-Man: Homecoming", "", &[])]);
        assert!(catalog.find("spider-man: homecoming").is_none());
        assert_eq!(
            catalog.find_canonical("spiderman   HOMECOMING").unwrap().title,
            "Spider-Man: Homecoming"
        );
    }
}
