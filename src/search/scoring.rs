//! The similarity cascade used to score a query against one rule text.
//!
//! Strategies are tried in a fixed priority order and the first one that
//! fires decides the score:
//!
//! 1. exact substring: `1.0`
//! 2. in-order word sequence (multi-word queries, only above `0.8`)
//! 3. all or most words present anywhere (multi-word queries)
//! 4. single-word substring: `0.6`
//! 5. weighted composite of character ratio, word Jaccard and partial word hits
//!
//! The composite tops out below every structural score, so loose overlaps
//! never outrank a structural match.

use super::ratio::matching_blocks_ratio;
use super::sequence::sequence_score;
use super::tokenize::Normalized;
use ahash::AHashSet;

/// Score for the whole query occurring verbatim.
pub const EXACT_SCORE: f64 = 1.0;

/// Sequence scores must exceed this to end the cascade.
pub const SEQUENCE_CUTOFF: f64 = 0.8;

/// Score when every query word occurs somewhere in the text.
pub const ALL_WORDS_SCORE: f64 = 0.7;

/// Fraction of words that must occur for the partial all-words score.
pub const MOST_WORDS_FRACTION: f64 = 0.7;

/// Base and scale of the partial all-words score: `base + fraction * scale`.
pub const MOST_WORDS_BASE: f64 = 0.5;
pub const MOST_WORDS_SCALE: f64 = 0.2;

/// Score for a single-word query occurring in the text.
pub const SINGLE_WORD_SCORE: f64 = 0.6;

/// Fallback weights.
pub const EDIT_RATIO_WEIGHT: f64 = 0.15;
pub const WORD_JACCARD_WEIGHT: f64 = 0.25;
pub const PARTIAL_WEIGHT: f64 = 0.25;

/// Value of the partial sub-score when any word pair overlaps.
pub const PARTIAL_HIT: f64 = 0.3;

/// Score `query` against `text`. Both must already be normalized.
///
/// The result is always within `[0, 1]`.
pub fn score(query: &Normalized, text: &Normalized) -> f64 {
    let query_text = query.text();
    let text_text = text.text();
    let word_count = query.word_count();

    if text_text.contains(query_text) {
        return EXACT_SCORE;
    }

    if word_count > 1 {
        let sequence = sequence_score(query.words(), text.words());
        if sequence > SEQUENCE_CUTOFF {
            return sequence;
        }

        let present = query
            .words()
            .iter()
            .filter(|word| text_text.contains(word.as_str()))
            .count();
        if present == word_count {
            return ALL_WORDS_SCORE;
        }
        let fraction = present as f64 / word_count as f64;
        if fraction > MOST_WORDS_FRACTION {
            return MOST_WORDS_BASE + fraction * MOST_WORDS_SCALE;
        }
    }

    if word_count == 1 && text_text.contains(query.words()[0].as_str()) {
        return SINGLE_WORD_SCORE;
    }

    composite_score(query, text)
}

/// Weighted blend used when no structural strategy fires.
pub fn composite_score(query: &Normalized, text: &Normalized) -> f64 {
    let edit_ratio = matching_blocks_ratio(query.text(), text.text());
    if query.is_empty() {
        return edit_ratio;
    }

    let query_set: AHashSet<&str> = query.words().iter().map(String::as_str).collect();
    let text_set: AHashSet<&str> = text.words().iter().map(String::as_str).collect();

    let jaccard = word_jaccard(&query_set, &text_set);
    let partial = if has_partial_overlap(&query_set, &text_set) {
        PARTIAL_HIT
    } else {
        0.0
    };

    edit_ratio * EDIT_RATIO_WEIGHT + jaccard * WORD_JACCARD_WEIGHT + partial * PARTIAL_WEIGHT
}

/// `|a ∩ b| / |a ∪ b|`, or `0` when both sets are empty.
fn word_jaccard(query: &AHashSet<&str>, text: &AHashSet<&str>) -> f64 {
    let intersection = query.intersection(text).count();
    let union = query.len() + text.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Whether any query word contains, or is contained in, any text word.
fn has_partial_overlap(query: &AHashSet<&str>, text: &AHashSet<&str>) -> bool {
    query.iter().any(|q| {
        text.iter()
            .any(|t| t.contains(q) || q.contains(t))
    })
}
