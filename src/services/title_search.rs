use crate::models::{Catalog, Item};

/// Resolves a user-typed title to the catalog's exact title
///
/// Tries an exact match, then a case-insensitive match, then a match with
/// punctuation stripped and whitespace collapsed. The engine itself only
/// accepts exact titles, so hosts resolve through here first.
pub fn resolve_title<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(item) = catalog.find(query) {
        return Some(item.title.as_str());
    }

    let lowered = query.to_lowercase();
    if let Some(item) = catalog
        .items()
        .iter()
        .find(|item| item.title.to_lowercase() == lowered)
    {
        return Some(item.title.as_str());
    }

    catalog.find_canonical(query).map(|item| item.title.as_str())
}

/// Case-insensitive substring search over titles, in catalog order
pub fn search_titles<'a>(catalog: &'a Catalog, term: &str, limit: usize) -> Vec<&'a Item> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    catalog
        .items()
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&term))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_items(vec![
            Item::new("The Irishman", "", &[]),
            Item::new("Ocean's Eleven", "", &[]),
            Item::new("Ocean's Twelve", "", &[]),
            Item::new("IRISHMAN", "", &[]),
        ])
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let catalog = catalog();
        assert_eq!(resolve_title(&catalog, "IRISHMAN"), Some("IRISHMAN"));
        assert_eq!(resolve_title(&catalog, "  The Irishman "), Some("The Irishman"));
    }

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(resolve_title(&catalog(), "the irishman"), Some("The Irishman"));
    }

    #[test]
    fn test_resolve_ignores_punctuation() {
        assert_eq!(resolve_title(&catalog(), "oceans eleven"), Some("Ocean's Eleven"));
    }

    #[test]
    fn test_resolve_unknown_or_blank() {
        assert_eq!(resolve_title(&catalog(), "Heat"), None);
        assert_eq!(resolve_title(&catalog(), "   "), None);
    }

    #[test]
    fn test_search_titles_substring_in_catalog_order() {
        let catalog = catalog();
        let found: Vec<&str> = search_titles(&catalog, "ocean", 10)
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(found, vec!["Ocean's Eleven", "Ocean's Twelve"]);
        assert_eq!(search_titles(&catalog, "irish", 1).len(), 1);
        assert!(search_titles(&catalog, "", 10).is_empty());
    }
}
