//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every fixture writes its own rules file into a fresh temporary directory,
//! so tests can run in parallel and may rewrite or delete files freely.
//!
//! # Available Fixtures
//!
//! - `searcher`: a [`RuleSearcher`] over [`SAMPLE_RULES`] (no filesystem)
//! - `isolated_rules`: a temp directory holding `rules.json` plus a loaded `RulesState`

use rstest::fixture;
use rulesearch::{Config, Corpus, Rule, RuleSearcher, RulesState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A small bilingual corpus in source order: (number, primary, secondary).
pub const SAMPLE_RULES: &[(u32, &str, &str)] = &[
    (1, "Always wear a helmet when riding", "Всегда надевай шлем во время езды"),
    (2, "Check your brakes before every ride", "Проверяй тормоза перед каждой поездкой"),
    (3, "Ride on the right side of the road", "Езди по правой стороне дороги"),
    (4, "Use lights at night and in the rain", "Включай фары ночью и в дождь"),
    (5, "Helmet safety is not optional", "Безопасность шлема не обсуждается"),
    (6, "Signal before you turn or stop", "Подавай сигнал перед поворотом или остановкой"),
    (7, "Never ride with headphones on", "Никогда не езди в наушниках"),
    (10, "Keep a safe distance from cars", "Держи безопасную дистанцию от машин"),
    (12, "Safety first, speed second", "Сначала безопасность, потом скорость"),
];

pub fn sample_rules() -> Vec<Rule> {
    SAMPLE_RULES
        .iter()
        .map(|&(number, primary, secondary)| Rule::new(number, primary, secondary))
        .collect()
}

/// Serialize rules in the on-disk source format.
#[allow(dead_code)] // Used by tools_test only
pub fn rules_json(rules: &[Rule]) -> String {
    let values: Vec<serde_json::Value> = rules
        .iter()
        .map(|rule| {
            serde_json::json!({
                "rule_number": rule.rule_number,
                "text_eng": rule.text_primary,
                "text_rus": rule.text_secondary,
            })
        })
        .collect();
    serde_json::to_string_pretty(&values).expect("Failed to serialize rules")
}

/// A temporary directory holding a rules file and a state loaded from it.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct IsolatedRules {
    _temp: TempDir,
    pub root: PathBuf,
    pub state: Arc<RulesState>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl IsolatedRules {
    /// Creates a workspace with [`SAMPLE_RULES`].
    pub fn new() -> Self {
        Self::with_rules(&sample_rules())
    }

    /// Creates a workspace whose `rules.json` holds `rules`.
    pub fn with_rules(rules: &[Rule]) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        std::fs::write(root.join("rules.json"), rules_json(rules))
            .expect("Failed to write rules.json");

        let config = Config {
            rules_file: root.join("rules.json"),
            groups_file: root.join("data/groups.json"),
            ..Config::default()
        };
        let state = Arc::new(RulesState::load(config).expect("Failed to load sample rules"));

        Self {
            _temp: temp,
            root,
            state,
        }
    }

    pub fn rules_file(&self) -> PathBuf {
        self.root.join("rules.json")
    }

    /// Overwrite the rules file on disk (the loaded state is unchanged).
    pub fn rewrite_rules(&self, content: &str) {
        std::fs::write(self.rules_file(), content).expect("Failed to rewrite rules.json");
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Default for IsolatedRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Searcher over the sample corpus, without touching the filesystem.
#[allow(dead_code)] // Used by search_test only
#[fixture]
pub fn searcher() -> RuleSearcher {
    let corpus = Corpus::from_rules(sample_rules()).expect("Sample rules are valid");
    RuleSearcher::new(Arc::new(corpus))
}

/// Rules file in a temp directory with a loaded `RulesState`.
///
/// Returns the whole `IsolatedRules` rather than just the state because the
/// temp directory must stay alive for the duration of the test.
#[allow(dead_code)]
#[fixture]
pub fn isolated_rules() -> IsolatedRules {
    IsolatedRules::new()
}
