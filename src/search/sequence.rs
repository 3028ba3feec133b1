//! Word-order matching: do the query words appear in the text in order?
//!
//! Each query word is looked up in a small window around the position where
//! the previous word matched, so short insertions are tolerated while words
//! scattered across the text are not.

/// Best score a fully in-order match can reach.
pub const SEQUENCE_BASE_SCORE: f64 = 0.9;

/// Penalty per skipped position.
pub const GAP_PENALTY: f64 = 0.1;

/// Upper bound on the accumulated gap penalty.
pub const MAX_GAP_PENALTY: f64 = 0.3;

/// How far before the expected position a word may be found.
const WINDOW_BEHIND: usize = 2;

/// Window end, exclusive, relative to the expected position.
const WINDOW_AHEAD: usize = 3;

/// Score how well `query_words` appear in order within `text_words`.
///
/// Returns `0.0` for fewer than two query words or when no start position
/// matches every word. Otherwise `0.9 - min(0.3, gaps * 0.1)` for the best
/// start position.
pub fn sequence_score<Q, T>(query_words: &[Q], text_words: &[T]) -> f64
where
    Q: AsRef<str>,
    T: AsRef<str>,
{
    if query_words.len() < 2 || text_words.len() < query_words.len() {
        return 0.0;
    }

    let starts = text_words.len() - query_words.len() + 1;
    (0..starts)
        .filter_map(|start| gaps_from(start, query_words, text_words))
        .map(|gaps| SEQUENCE_BASE_SCORE - (gaps as f64 * GAP_PENALTY).min(MAX_GAP_PENALTY))
        .fold(0.0, f64::max)
}

/// Match every query word starting at `start`, returning the gap count.
fn gaps_from<Q, T>(start: usize, query_words: &[Q], text_words: &[T]) -> Option<usize>
where
    Q: AsRef<str>,
    T: AsRef<str>,
{
    let mut last_pos = start;
    let mut gaps = 0;

    for word in query_words {
        let window_start = last_pos.saturating_sub(WINDOW_BEHIND);
        let window_end = (last_pos + WINDOW_AHEAD).min(text_words.len());

        let found = (window_start..window_end)
            .find(|&k| text_words[k].as_ref() == word.as_ref())?;

        // Matches at or before the expected slot add no gap.
        gaps += found.saturating_sub(last_pos + 1);
        last_pos = found + 1;
    }

    Some(gaps)
}
