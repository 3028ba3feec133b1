//! AND-keyword search handler.

use crate::format::format_results;
use crate::state::RulesState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeywordsRequest {
    /// Keywords that must all appear, each in either language
    pub keywords: Vec<String>,
    /// Minimum average score between 0.0 and 1.0 (default: configured keyword threshold)
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Include similarity scores in the output
    #[serde(default)]
    pub show_scores: bool,
}

/// Execute a keyword search where every keyword must be present.
pub async fn handle_keywords(
    state: &Arc<RulesState>,
    request: KeywordsRequest,
) -> Result<String, String> {
    if request.keywords.is_empty() {
        return Err("At least one keyword is required".to_string());
    }
    let threshold = request
        .threshold
        .unwrap_or(state.config().keyword_threshold);
    if !threshold.is_finite() {
        return Err(format!("Invalid threshold: {}", threshold));
    }

    let searcher = state.searcher().await;
    let results = searcher.search_by_keywords(&request.keywords, threshold);

    Ok(format_results(&results, request.show_scores))
}
