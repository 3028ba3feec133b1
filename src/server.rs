//! MCP server exposing the rule search tools over stdio.

use crate::schema::inline_schema_for_type;
use crate::state::RulesState;
use crate::tools::keywords::{KeywordsRequest, handle_keywords};
use crate::tools::rule::{GetRuleRequest, handle_get_rule, handle_random_rule, handle_reload};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for bilingual rule search
#[derive(Clone)]
pub struct RulesServer {
    /// Shared corpus and settings
    state: Arc<RulesState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RulesServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl RulesServer {
    pub fn new(state: Arc<RulesState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &Arc<RulesState> {
        &self.state
    }

    #[tool(
        description = "Fuzzy search the rules in either language. Tolerates typos, partial words and reordered phrases. A bare number returns that rule directly. Results are ranked by similarity.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_rules(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Find rules containing every given keyword. Each keyword may match in either language. Results are ranked by average similarity.",
        input_schema = inline_schema_for_type::<KeywordsRequest>()
    )]
    async fn search_keywords(
        &self,
        Parameters(request): Parameters<KeywordsRequest>,
    ) -> std::result::Result<String, String> {
        handle_keywords(&self.state, request).await
    }

    #[tool(
        description = "Show a single rule by its number, with both language texts.",
        input_schema = inline_schema_for_type::<GetRuleRequest>()
    )]
    async fn get_rule(
        &self,
        Parameters(request): Parameters<GetRuleRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_rule(&self.state, request).await
    }

    #[tool(description = "Show a random rule, drawn uniformly from the whole corpus.")]
    async fn random_rule(&self) -> std::result::Result<String, String> {
        handle_random_rule(&self.state).await
    }

    #[tool(
        description = "Reload the rules file from disk. The previous rules stay active if loading fails."
    )]
    async fn reload_rules(&self) -> std::result::Result<String, String> {
        handle_reload(&self.state).await
    }
}

#[tool_handler]
impl ServerHandler for RulesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "rulesearch: fuzzy search over a numbered bilingual rule set. \
                 Use search_rules for free text or a rule number, search_keywords to require \
                 several words, get_rule to show one rule, and random_rule for a random one.",
            )
    }
}
