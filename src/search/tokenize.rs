//! Text normalization shared by every scoring strategy.
//!
//! Normalization is minimal: lower-case, trim, split on runs of
//! whitespace. No stemming, no stop words, no Unicode folding beyond case mapping.

/// A lower-cased, trimmed string together with its whitespace-separated words.
///
/// Derived from a query or a rule text; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    text: String,
    words: Vec<String>,
}

impl Normalized {
    /// Normalize `input`: lower-case, trim, and tokenize on whitespace.
    pub fn new(input: &str) -> Self {
        let text = input.trim().to_lowercase();
        let words = text.split_whitespace().map(str::to_owned).collect();
        Self { text, words }
    }

    /// The lower-cased, trimmed string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Words in their original order, duplicates kept.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Convenience wrapper returning the `(text, words)` pair.
pub fn normalize(input: &str) -> (String, Vec<String>) {
    let Normalized { text, words } = Normalized::new(input);
    (text, words)
}
