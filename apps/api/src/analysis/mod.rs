// Matching pipeline: text normalization, TF-IDF similarity, percentage
// normalization and best-role selection, plus the HTTP handlers over it.

pub mod feedback;
pub mod handlers;
pub mod normalizer;
pub mod report;
pub mod scoring;
pub mod stopwords;
pub mod tfidf;
