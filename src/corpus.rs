//! The rule corpus: numbered bilingual texts, loaded once and read-only afterwards.
//!
//! A [`Corpus`] is validated on construction (unique numbers, non-empty texts)
//! and never mutated. Reloading means building a new `Corpus` and swapping the
//! `Arc` that callers hold.

use crate::search::Normalized;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One numbered rule with a primary and a secondary language text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_number: u32,
    #[serde(alias = "text_eng")]
    pub text_primary: String,
    #[serde(alias = "text_rus")]
    pub text_secondary: String,
}

impl Rule {
    pub fn new(
        rule_number: u32,
        text_primary: impl Into<String>,
        text_secondary: impl Into<String>,
    ) -> Self {
        Self {
            rule_number,
            text_primary: text_primary.into(),
            text_secondary: text_secondary.into(),
        }
    }
}

/// Error returned when a corpus cannot be loaded or fails validation.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("rules file not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read rules file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rules JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate rule number {0}")]
    DuplicateNumber(u32),
    #[error("rule {0} has an empty text")]
    EmptyText(u32),
}

/// A rule with both texts normalized up front.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRule {
    pub(crate) rule: Rule,
    pub(crate) primary: Normalized,
    pub(crate) secondary: Normalized,
}

/// Ordered, immutable collection of rules.
///
/// Iteration order is the source order and is used as the ranking tie-break.
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<IndexedRule>,
}

impl Corpus {
    /// Validate and index `rules`, keeping their order.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, CorpusError> {
        let mut seen = ahash::AHashSet::with_capacity(rules.len());
        let mut entries = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.rule_number) {
                return Err(CorpusError::DuplicateNumber(rule.rule_number));
            }
            if rule.text_primary.trim().is_empty() || rule.text_secondary.trim().is_empty() {
                return Err(CorpusError::EmptyText(rule.rule_number));
            }

            entries.push(IndexedRule {
                primary: Normalized::new(&rule.text_primary),
                secondary: Normalized::new(&rule.text_secondary),
                rule,
            });
        }

        Ok(Self { entries })
    }

    /// Parse a JSON array of rules.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, CorpusError> {
        let rules: Vec<Rule> = serde_json::from_str(json).map_err(|source| CorpusError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_rules(rules)
    }

    /// Load and validate a JSON rules file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let start = std::time::Instant::now();

        let json = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CorpusError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CorpusError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let corpus = Self::from_json(&json, path)?;
        tracing::info!(
            "Loaded {} rules from {} in {:?}",
            corpus.len(),
            path.display(),
            start.elapsed()
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules in corpus order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.entries.iter().map(|entry| &entry.rule)
    }

    /// Rule numbers in corpus order.
    pub fn numbers(&self) -> Vec<u32> {
        self.rules().map(|rule| rule.rule_number).collect()
    }

    /// Linear scan for the rule numbered `number`.
    pub fn get(&self, number: u32) -> Option<&Rule> {
        self.rules().find(|rule| rule.rule_number == number)
    }

    pub(crate) fn entries(&self) -> &[IndexedRule] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_from_rules_keeps_order() {
        let corpus = Corpus::from_rules(vec![
            Rule::new(3, "Three", "Три"),
            Rule::new(1, "One", "Один"),
        ])
        .unwrap();
        check!(corpus.numbers() == vec![3, 1]);
        check!(corpus.get(1).map(|r| r.text_primary.as_str()) == Some("One"));
        check!(corpus.get(2).is_none());
    }

    #[test]
    fn test_duplicate_numbers_rejected() {
        let result = Corpus::from_rules(vec![
            Rule::new(1, "One", "Один"),
            Rule::new(1, "Uno", "Один"),
        ]);
        let_assert!(Err(CorpusError::DuplicateNumber(1)) = result);
    }

    #[test]
    fn test_empty_text_rejected() {
        let result = Corpus::from_rules(vec![Rule::new(7, "Seven", "  ")]);
        let_assert!(Err(CorpusError::EmptyText(7)) = result);
    }

    #[test]
    fn test_from_json_accepts_source_field_names() {
        let json = r#"[
            {"rule_number": 1, "text_eng": "Ride safe", "text_rus": "Катайся безопасно"},
            {"rule_number": 2, "text_primary": "Wear a helmet", "text_secondary": "Носи шлем"}
        ]"#;
        let corpus = Corpus::from_json(json, Path::new("inline")).unwrap();
        check!(corpus.len() == 2);
        check!(corpus.get(1).unwrap().text_secondary == "Катайся безопасно");
        check!(corpus.get(2).unwrap().text_primary == "Wear a helmet");
    }

    #[test]
    fn test_from_json_malformed() {
        let result = Corpus::from_json("{not json", Path::new("inline"));
        let_assert!(Err(CorpusError::Parse { .. }) = result);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Corpus::load(&dir.path().join("rules.json"));
        let_assert!(Err(CorpusError::NotFound { .. }) = result);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"[{"rule_number": 5, "text_eng": "Five", "text_rus": "Пять"}]"#,
        )
        .unwrap();
        let corpus = Corpus::load(&path).unwrap();
        check!(corpus.numbers() == vec![5]);
    }
}
