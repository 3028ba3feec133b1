//! Fuzzy search over a small, numbered corpus of bilingual rules.
//!
//! The core is [`RuleSearcher`]: free-text fuzzy search, AND-keyword search and
//! direct lookup by number. Around it sit the corpus loader, the daily rotation
//! store, text formatting, configuration and an MCP server.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod format;
pub mod rotation;
pub(crate) mod schema;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;

pub use config::Config;
pub use corpus::{Corpus, Rule};
pub use rotation::{DailyPick, GroupStore};
pub use search::{MatchResult, MatchedLanguage, RuleSearcher};
pub use server::RulesServer;
pub use state::RulesState;
