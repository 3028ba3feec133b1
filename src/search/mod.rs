//! Fuzzy search over the bilingual rule corpus.
//!
//! This module provides the scoring cascade, word-order matching, text
//! normalization and the ranking entry points built on top of them.

// Module declarations
pub(crate) mod engine;
pub(crate) mod ratio;
pub(crate) mod scoring;
pub(crate) mod sequence;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use engine::{MatchResult, MatchedLanguage, RuleSearcher};
pub use ratio::matching_blocks_ratio;
pub use scoring::{
    ALL_WORDS_SCORE, EDIT_RATIO_WEIGHT, EXACT_SCORE, MOST_WORDS_BASE, MOST_WORDS_FRACTION,
    MOST_WORDS_SCALE, PARTIAL_HIT, PARTIAL_WEIGHT, SEQUENCE_CUTOFF, SINGLE_WORD_SCORE,
    WORD_JACCARD_WEIGHT, composite_score, score,
};
pub use sequence::{GAP_PENALTY, MAX_GAP_PENALTY, SEQUENCE_BASE_SCORE, sequence_score};
pub use tokenize::{Normalized, normalize};
