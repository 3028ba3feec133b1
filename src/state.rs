//! Shared server state: the current corpus and the settings it was loaded with.
//!
//! The corpus lives behind `RwLock<Arc<Corpus>>`. Searches clone the `Arc` and
//! run without holding the lock; a reload builds a fresh corpus and swaps the
//! `Arc`, so in-flight searches keep the snapshot they started with.

use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::search::RuleSearcher;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct RulesState {
    /// Current corpus snapshot
    corpus: RwLock<Arc<Corpus>>,

    /// Settings used for defaults and reloads
    config: Config,
}

impl std::fmt::Debug for RulesState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesState")
            .field("rules_file", &self.config.rules_file)
            .field(
                "rule_count",
                &self.corpus.try_read().map(|corpus| corpus.len()).ok(),
            )
            .finish()
    }
}

impl RulesState {
    pub fn new(corpus: Arc<Corpus>, config: Config) -> Self {
        Self {
            corpus: RwLock::new(corpus),
            config,
        }
    }

    /// Load the corpus named by `config`.
    pub fn load(config: Config) -> Result<Self> {
        let corpus = Corpus::load(&config.rules_file)
            .with_context(|| format!("Failed to load rules from {}", config.rules_file.display()))?;
        Ok(Self::new(Arc::new(corpus), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Searcher over the current corpus snapshot.
    pub async fn searcher(&self) -> RuleSearcher {
        RuleSearcher::new(self.corpus.read().await.clone())
    }

    /// Re-read the rules file and swap in the new corpus.
    ///
    /// On failure the current corpus stays in place. Returns the new rule count.
    pub async fn reload(&self) -> Result<usize> {
        let path = self.config.rules_file.clone();
        let corpus = tokio::task::spawn_blocking(move || Corpus::load(&path))
            .await
            .context("Rules reload task failed")?
            .with_context(|| {
                format!("Failed to reload rules from {}", self.config.rules_file.display())
            })?;

        let count = corpus.len();
        *self.corpus.write().await = Arc::new(corpus);
        tracing::info!("Reloaded corpus: {} rules", count);
        Ok(count)
    }
}
