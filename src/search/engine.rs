//! Ranking: score every rule against a query and return the best matches.
//!
//! [`RuleSearcher`] holds a shared, immutable [`Corpus`] and is cheap to clone,
//! so any number of searches may run concurrently without coordination.

use super::scoring::score;
use super::tokenize::Normalized;
use crate::corpus::{Corpus, Rule};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;

/// Which text of a rule produced the reported score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedLanguage {
    Primary,
    Secondary,
    /// Keyword search: keywords may match in either text.
    Both,
    /// The query was a bare rule number.
    DirectNumber,
}

impl MatchedLanguage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Both => "Both",
            Self::DirectNumber => "Direct rule number",
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub rule_number: u32,
    pub text_primary: String,
    pub text_secondary: String,
    /// Always within `[0, 1]`.
    pub similarity_score: f64,
    pub matched_language: MatchedLanguage,
    /// Set only for direct number lookups, which always score `1.0`.
    pub is_direct: bool,
}

impl MatchResult {
    fn new(rule: &Rule, similarity_score: f64, matched_language: MatchedLanguage) -> Self {
        Self {
            rule_number: rule.rule_number,
            text_primary: rule.text_primary.clone(),
            text_secondary: rule.text_secondary.clone(),
            similarity_score,
            matched_language,
            is_direct: matched_language == MatchedLanguage::DirectNumber,
        }
    }
}

/// Search entry points over a shared corpus.
#[derive(Debug, Clone)]
pub struct RuleSearcher {
    corpus: Arc<Corpus>,
}

impl RuleSearcher {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    /// Free-text fuzzy search over both languages.
    ///
    /// - empty or whitespace-only queries return nothing
    /// - a purely numeric query is a direct lookup and ignores `threshold`
    /// - otherwise rules scoring at least `threshold` are returned best first,
    ///   ties in corpus order, at most `max_results` of them
    ///
    /// Equal per-language scores are attributed to the secondary language.
    pub fn fuzzy_search(&self, query: &str, threshold: f64, max_results: usize) -> Vec<MatchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if let Some(number) = parse_rule_number(trimmed) {
            return number
                .and_then(|n| self.lookup_by_number(n))
                .into_iter()
                .collect();
        }

        let query = Normalized::new(trimmed);
        let mut results: Vec<MatchResult> = self
            .corpus
            .entries()
            .iter()
            .filter_map(|entry| {
                let primary = score(&query, &entry.primary);
                let secondary = score(&query, &entry.secondary);
                let best = primary.max(secondary);
                let language = if primary > secondary {
                    MatchedLanguage::Primary
                } else {
                    MatchedLanguage::Secondary
                };
                (best >= threshold).then(|| MatchResult::new(&entry.rule, best, language))
            })
            .collect();

        sort_by_score(&mut results);
        let matched = results.len();
        results.truncate(max_results);

        tracing::debug!(
            "Fuzzy search '{}': {} of {} rules above {}, returning {}",
            trimmed,
            matched,
            self.corpus.len(),
            threshold,
            results.len()
        );
        results
    }

    /// AND search: every keyword must occur (case-insensitively) in either text.
    ///
    /// Keywords are matched as given, surrounding spaces included. A blank
    /// keyword can never be present, so it empties the result.
    ///
    /// Each keyword may match a different language. Qualifying rules score the
    /// mean over keywords of the better per-language cascade score; rules below
    /// `threshold` are dropped. Results are best first with no cap.
    pub fn search_by_keywords<S: AsRef<str>>(&self, keywords: &[S], threshold: f64) -> Vec<MatchResult> {
        if keywords.is_empty() {
            return Vec::new();
        }

        // Presence is checked on the raw lower-cased keyword; only scoring normalizes it.
        let needles: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
        if needles.iter().any(|needle| needle.trim().is_empty()) {
            tracing::debug!("Keyword search with a blank keyword matches nothing");
            return Vec::new();
        }
        let keywords: Vec<Normalized> = needles.iter().map(|k| Normalized::new(k.as_str())).collect();

        let mut results: Vec<MatchResult> = self
            .corpus
            .entries()
            .iter()
            .filter(|entry| {
                needles.iter().all(|needle| {
                    entry.primary.text().contains(needle.as_str())
                        || entry.secondary.text().contains(needle.as_str())
                })
            })
            .filter_map(|entry| {
                let total: f64 = keywords
                    .iter()
                    .map(|keyword| score(keyword, &entry.primary).max(score(keyword, &entry.secondary)))
                    .sum();
                let average = total / keywords.len() as f64;
                (average >= threshold)
                    .then(|| MatchResult::new(&entry.rule, average, MatchedLanguage::Both))
            })
            .collect();

        sort_by_score(&mut results);

        tracing::debug!(
            "Keyword search {:?}: {} matching rules",
            keywords.iter().map(Normalized::text).collect::<Vec<_>>(),
            results.len()
        );
        results
    }

    /// Direct lookup by rule number, bypassing scoring.
    pub fn lookup_by_number(&self, number: u32) -> Option<MatchResult> {
        self.corpus
            .get(number)
            .map(|rule| MatchResult::new(rule, 1.0, MatchedLanguage::DirectNumber))
    }

    /// A rule drawn uniformly from the corpus, shown like a direct lookup.
    ///
    /// `None` only for an empty corpus.
    pub fn random_rule<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<MatchResult> {
        let number = *self.corpus.numbers().choose(rng)?;
        self.lookup_by_number(number)
    }
}

/// Recognise a bare rule number.
///
/// Returns `None` for anything that is not all ASCII digits, and
/// `Some(None)` for digit strings too large to be a rule number.
fn parse_rule_number(query: &str) -> Option<Option<u32>> {
    if !query.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let parsed = query.parse().ok();
    if parsed.is_none() {
        tracing::warn!("Numeric query '{}' is out of range for a rule number", query);
    }
    Some(parsed)
}

/// Descending by score; `sort_by` is stable, so ties keep corpus order.
fn sort_by_score(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
}
