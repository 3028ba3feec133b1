//! Plain-text rendering of search results, rules and daily picks.

use crate::corpus::Rule;
use crate::rotation::DailyPick;
use crate::search::MatchResult;
use std::fmt::Write as _;

/// Width of the separator lines.
const RULE_WIDTH: usize = 80;

/// Preview length used in result lists, in characters.
pub const PREVIEW_CHARS: usize = 100;

/// Truncate `text` to `max_chars` characters, appending "..." when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Render a single rule with both texts.
pub fn format_rule(rule: &Rule) -> String {
    format!(
        "Rule #{}:\n{}\nPrimary: {}\nSecondary: {}",
        rule.rule_number,
        "=".repeat(RULE_WIDTH),
        rule.text_primary,
        rule.text_secondary
    )
}

/// Render a result list.
///
/// A lone direct-number hit is shown as a bare rule. `show_scores` adds the
/// score and the matched language to each entry.
pub fn format_results(results: &[MatchResult], show_scores: bool) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    if let [result] = results
        && result.is_direct
    {
        return format_rule(&Rule::new(
            result.rule_number,
            result.text_primary.as_str(),
            result.text_secondary.as_str(),
        ));
    }

    let mut out = format!("Found {} result(s):\n{}\n", results.len(), "=".repeat(RULE_WIDTH));
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "\n{}. Rule #{}", i + 1, result.rule_number);
        if show_scores {
            let _ = writeln!(out, "   Similarity: {:.3}", result.similarity_score);
            let _ = writeln!(out, "   Language: {}", result.matched_language.label());
        }
        let _ = writeln!(out, "   Primary: {}", preview(&result.text_primary, PREVIEW_CHARS));
        let _ = writeln!(out, "   Secondary: {}", preview(&result.text_secondary, PREVIEW_CHARS));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }
    out
}

/// Render a daily pick.
pub fn format_daily_pick(pick: &DailyPick) -> String {
    let total = pick.used_count + pick.unused_count;
    format!(
        "Rule of the day #{}\n\n{}\n\n{}\n\n({}/{} shown this rotation)",
        pick.rule.rule_number,
        pick.rule.text_primary,
        pick.rule.text_secondary,
        pick.used_count,
        total
    )
}
