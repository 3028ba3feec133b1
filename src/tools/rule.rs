//! Direct and random rule lookup, and corpus reload handlers.

use crate::format::format_results;
use crate::state::RulesState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRuleRequest {
    /// Rule number
    pub number: u32,
}

/// Show one rule by number. A missing rule is reported, not an error.
pub async fn handle_get_rule(
    state: &Arc<RulesState>,
    request: GetRuleRequest,
) -> Result<String, String> {
    let searcher = state.searcher().await;

    match searcher.lookup_by_number(request.number) {
        Some(hit) => Ok(format_results(&[hit], false)),
        None => Ok(format!(
            "Rule #{} not found. The corpus has {} rules.",
            request.number,
            searcher.corpus().len()
        )),
    }
}

/// Show a rule drawn uniformly from the corpus.
pub async fn handle_random_rule(state: &Arc<RulesState>) -> Result<String, String> {
    let searcher = state.searcher().await;
    let hit = searcher.random_rule(&mut rand::thread_rng());

    hit.map(|hit| format_results(&[hit], false))
        .ok_or_else(|| "The corpus has no rules.".to_string())
}

/// Reload the rules file, keeping the current corpus on failure.
pub async fn handle_reload(state: &Arc<RulesState>) -> Result<String, String> {
    let count = state.reload().await.map_err(|e| format!("{:#}", e))?;
    Ok(format!(
        "Reloaded {} rules from {}",
        count,
        state.config().rules_file.display()
    ))
}
