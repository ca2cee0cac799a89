//! Text normalizer — turns raw resume/job text into a canonical token stream.

use std::sync::Arc;

use crate::analysis::stopwords::StopwordSet;

/// Lowercases, strips punctuation and digits, collapses whitespace and drops
/// stopwords. Holds its stopword set read-only, so one instance is shared
/// across requests.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: Arc<StopwordSet>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(StopwordSet::english())
    }
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self {
            stopwords: Arc::new(stopwords),
        }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Stripped characters are removed in place, not replaced with a space:
    /// `machine-learning` becomes `machinelearning`, `python3` becomes `python`.
    pub fn normalize(&self, text: &str) -> String {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_whitespace() || (c.is_alphanumeric() && !c.is_numeric()))
            .collect();

        stripped
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
