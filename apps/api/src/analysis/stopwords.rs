//! Stopword sets handed to the text normalizer at construction.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// NLTK's English stopword corpus (179 words).
///
/// The apostrophe forms can never survive cleaning but are kept so the set
/// matches the corpus exactly.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Immutable set of tokens dropped during normalization.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Builds a set from arbitrary words. Entries are lowercased and trimmed;
    /// blanks are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads one stopword per line. Lines starting with `#` are comments.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword file '{}'", path.display()))?;
        let set = Self::from_words(
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with('#')),
        );
        tracing::info!(path = %path.display(), count = set.len(), "Loaded stopword set");
        Ok(set)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_set_has_full_corpus() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        assert!(set.contains("the"));
        assert!(set.contains("wouldn"));
        assert!(!set.contains("python"));
    }

    #[test]
    fn test_from_words_lowercases_and_skips_blanks() {
        let set = StopwordSet::from_words(["  Foo ", "", "BAR"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
    }

    #[test]
    fn test_blank_only_list_is_empty() {
        assert!(StopwordSet::from_words(["", "   "]).is_empty());
        assert!(!StopwordSet::english().is_empty());
    }

    #[test]
    fn test_load_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "synergy").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Leverage").unwrap();

        let set = StopwordSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("leverage"));
        assert!(!set.contains("# custom list"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = StopwordSet::load(Path::new("/nonexistent/stopwords.txt")).unwrap_err();
        assert!(err.to_string().contains("stopwords.txt"));
    }
}
