//! TF-IDF vectors and cosine similarity over small in-memory corpora.
//!
//! Weighting follows the common smoothed scheme: raw term counts,
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`. Terms are whitespace-separated
//! tokens of at least two characters; single-character tokens carry no weight.

use std::collections::{BTreeMap, HashMap};

const MIN_TERM_CHARS: usize = 2;

/// Sparse term -> weight vector.
pub type TermVector = HashMap<String, f64>;

/// Counts the terms of an already-normalized document.
pub fn term_counts(document: &str) -> BTreeMap<&str, u32> {
    let mut counts = BTreeMap::new();
    for term in document
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
    {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// A fitted corpus: the smoothed IDF of every term seen in any document.
#[derive(Debug, Clone)]
pub struct Corpus {
    idf: HashMap<String, f64>,
}

impl Corpus {
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut document_frequency: HashMap<&str, u32> = HashMap::new();
        let mut n = 0_u32;
        for document in documents {
            n += 1;
            for term in term_counts(document).into_keys() {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| {
                let weight = ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term.to_string(), weight)
            })
            .collect();

        Self { idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// TF-IDF vector of `document`. Terms outside the vocabulary are ignored.
    pub fn vectorize(&self, document: &str) -> TermVector {
        term_counts(document)
            .into_iter()
            .filter_map(|(term, tf)| {
                self.idf
                    .get(term)
                    .map(|idf| (term.to_string(), tf as f64 * idf))
            })
            .collect()
    }
}

/// Cosine similarity of two non-negative sparse vectors, clamped to [0, 1].
/// Returns 0 when either vector has zero norm.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();

    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Similarity of two documents in a corpus made of exactly those two.
pub fn pairwise_similarity(left: &str, right: &str) -> f64 {
    let corpus = Corpus::fit([left, right]);
    if corpus.vocabulary_size() == 0 {
        tracing::debug!("empty vocabulary for document pair; similarity is zero");
        return 0.0;
    }
    cosine_similarity(&corpus.vectorize(left), &corpus.vectorize(right))
}
