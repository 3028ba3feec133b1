//! Fuzzy free-text search handler.

use crate::format::format_results;
use crate::state::RulesState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Free-text query in either language, or a bare rule number
    pub query: String,
    /// Minimum similarity score between 0.0 and 1.0 (default: configured threshold)
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Maximum number of results to return (default: configured limit)
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Include similarity scores and matched language in the output
    #[serde(default)]
    pub show_scores: bool,
}

/// Execute a fuzzy search over both languages.
pub async fn handle_search(state: &Arc<RulesState>, request: SearchRequest) -> Result<String, String> {
    let threshold = request.threshold.unwrap_or(state.config().threshold);
    if !threshold.is_finite() {
        return Err(format!("Invalid threshold: {}", threshold));
    }
    let max_results = request.max_results.unwrap_or(state.config().max_results);

    let searcher = state.searcher().await;
    let results = searcher.fuzzy_search(&request.query, threshold, max_results);

    if results.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", request.query.trim());
        msg.push_str("Search tips:\n");
        msg.push_str("• Use simple words or phrases\n");
        msg.push_str("• Search works in both languages\n");
        msg.push_str("• Try a lower threshold, e.g. 0.4\n");
        msg.push_str("• Use search_keywords to require several words\n");
        msg.push_str("• Use get_rule for a specific rule number\n");
        return Ok(msg);
    }

    Ok(format_results(&results, request.show_scores))
}
