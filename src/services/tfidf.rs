use std::collections::{BTreeSet, HashMap};

use super::RecommendError;
use crate::models::{rank_top, Catalog, ScoredTitle};

/// English stopwords excluded from the corpus vocabulary
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "done", "down",
    "due", "during", "each", "either", "else", "elsewhere", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "get", "give", "go", "had", "has", "have", "he", "hence",
    "her", "here", "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his",
    "how", "however", "i", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself",
    "just", "keep", "last", "latter", "least", "less", "made", "many", "may", "me", "meanwhile",
    "might", "mine", "more", "moreover", "most", "mostly", "much", "must", "my", "myself",
    "namely", "neither", "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "several", "she", "should", "since", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "these", "they", "this", "those", "though", "through", "throughout",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever",
    "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Sparse TF-IDF row: `(term index, weight)` pairs sorted by term index,
/// scaled to unit length. An empty row is the zero vector.
type SparseRow = Vec<(usize, f64)>;

/// TF-IDF vectors of every description in one catalog
///
/// Produced by [`FittedCorpus::fit`] and never updated afterwards. A catalog
/// swap needs a fresh corpus; the fitted titles are what
/// `SimilarityStrategy::matches_catalog` checks a catalog against.
#[derive(Debug, Clone, Default)]
pub struct FittedCorpus {
    titles: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseRow>,
}

impl FittedCorpus {
    /// Fits the vocabulary and TF-IDF matrix over `descriptions`, where
    /// `titles[i]` names the document `descriptions[i]`.
    pub fn fit<D, T>(descriptions: &[D], titles: &[T]) -> Result<Self, RecommendError>
    where
        D: AsRef<str>,
        T: AsRef<str>,
    {
        if descriptions.len() != titles.len() {
            return Err(RecommendError::InvalidConfiguration(format!(
                "cannot fit {} descriptions against {} titles",
                descriptions.len(),
                titles.len()
            )));
        }

        Ok(Self::build(
            descriptions.iter().map(|d| d.as_ref()),
            titles.iter().map(|t| t.as_ref().to_string()).collect(),
        ))
    }

    /// Fits over the descriptions of every catalog item, in catalog order
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::build(
            catalog.items().iter().map(|item| item.description.as_str()),
            catalog.titles().map(str::to_string).collect(),
        )
    }

    fn build<'a>(descriptions: impl Iterator<Item = &'a str>, titles: Vec<String>) -> Self {
        let documents: Vec<Vec<String>> = descriptions.map(tokenize).collect();

        // Sorted vocabulary keeps term indices stable across fits of the same corpus
        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());
        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let mut tf: HashMap<usize, usize> = HashMap::new();
            for token in doc {
                *tf.entry(vocabulary[token.as_str()]).or_insert(0) += 1;
            }
            for term in tf.keys() {
                document_frequency[*term] += 1;
            }
            counts.push(tf);
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|tf| {
                let mut row: SparseRow = tf
                    .into_iter()
                    .map(|(term, count)| (term, count as f64 * idf[term]))
                    .collect();
                row.sort_by_key(|(term, _)| *term);
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, weight) in row.iter_mut() {
                        *weight /= norm;
                    }
                }
                row
            })
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF corpus"
        );

        Self {
            titles,
            vocabulary,
            idf,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Inverse document frequency of `term`, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    /// Cosine similarity between documents `a` and `b`
    pub fn similarity(&self, a: usize, b: usize) -> Result<f64, RecommendError> {
        Ok(cosine(self.row(a)?, self.row(b)?))
    }

    /// Top `n` documents by cosine similarity to `index`, excluding `index` itself
    pub fn similar_to(&self, index: usize, n: usize) -> Result<Vec<ScoredTitle>, RecommendError> {
        let query = self.row(index)?;
        let scored = self
            .rows
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(other, row)| ScoredTitle::new(self.titles[other].clone(), cosine(query, row)))
            .collect();
        Ok(rank_top(scored, n))
    }

    fn row(&self, index: usize) -> Result<&SparseRow, RecommendError> {
        self.rows.get(index).ok_or_else(|| {
            RecommendError::NotFitted(format!(
                "corpus has no row {} (fitted over {} documents)",
                index,
                self.rows.len()
            ))
        })
    }
}

/// Lowercased word tokens of at least two characters, stopwords removed
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2 && !ENGLISH_STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Dot product of two unit rows; 0.0 whenever either is the zero vector
fn cosine(a: &SparseRow, b: &SparseRow) -> f64 {
    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot.clamp(0.0, 1.0)
}
