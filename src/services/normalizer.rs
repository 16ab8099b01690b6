use std::collections::HashSet;

/// Words dropped before comparing token sets
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Lowercases, strips everything but letters, digits and whitespace, and
/// returns the distinct non-stopword tokens.
pub fn normalize(text: &str) -> HashSet<String> {
    strip_punctuation(&text.to_lowercase())
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Normalizes each genre tag on its own and unions the resulting words
///
/// Tags are never concatenated, so `["Action", "Comedy"]` cannot collapse into
/// a single `actioncomedy` token and tag order has no effect.
pub fn normalize_genres(genres: &[String]) -> HashSet<String> {
    genres.iter().flat_map(|tag| normalize(tag)).collect()
}

/// Lookup key for loose title matching: lowercase, no punctuation, single spaces
pub fn canonical_title(title: &str) -> String {
    strip_punctuation(&title.to_lowercase())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("Space ALIENS invade Earth!"),
            set(&["space", "aliens", "invade", "earth"])
        );
        assert_eq!(normalize("Sci-Fi"), set(&["scifi"]));
    }

    #[test]
    fn test_normalize_removes_stopwords_and_duplicates() {
        assert_eq!(
            normalize("The cat and the hat on a mat, the cat"),
            set(&["cat", "hat", "mat"])
        );
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n").is_empty());
        assert!(normalize("?!...").is_empty());
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize("Amélie à Paris"), set(&["amélie", "à", "paris"]));
    }

    #[test]
    fn test_normalize_genres_is_order_independent() {
        let forward = normalize_genres(&["Action".to_string(), "Comedy".to_string()]);
        let backward = normalize_genres(&["Comedy".to_string(), "Action".to_string()]);
        assert_eq!(forward, backward);
        assert_eq!(forward, set(&["action", "comedy"]));
    }

    #[test]
    fn test_canonical_title() {
        assert_eq!(canonical_title("  Ocean's   Eleven "), "oceans eleven");
        assert_eq!(canonical_title("WALL·E"), "walle");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use proptest::prelude::prop;

        proptest! {
            #[test]
            fn normalize_genres_is_permutation_invariant(
                tags in prop::collection::vec("[A-Za-z&\\-]{1,10}(, [A-Za-z]{1,10})?", 0..6)
                    .prop_flat_map(|t| (Just(t.clone()), Just(t).prop_shuffle()))
            ) {
                let (tags, shuffled) = tags;
                prop_assert_eq!(normalize_genres(&tags), normalize_genres(&shuffled));
            }

            #[test]
            fn normalize_yields_clean_tokens(text in "\\PC{0,60}") {
                for token in normalize(&text) {
                    prop_assert!(!token.is_empty());
                    prop_assert!(!STOPWORDS.contains(&token.as_str()));
                    prop_assert!(token.chars().all(char::is_alphanumeric));
                }
            }
        }
    }
}
