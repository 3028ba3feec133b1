mod common;

use assert2::{check, let_assert};
use common::{SAMPLE_RULES, searcher};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::rstest;
use rulesearch::{Corpus, MatchResult, MatchedLanguage, Rule, RuleSearcher};
use std::collections::BTreeSet;
use std::sync::Arc;

fn numbers(results: &[MatchResult]) -> Vec<u32> {
    results.iter().map(|r| r.rule_number).collect()
}

fn is_sorted_descending(results: &[MatchResult]) -> bool {
    results
        .windows(2)
        .all(|pair| pair[0].similarity_score >= pair[1].similarity_score)
}

// --- Fuzzy search ---

/// Test: Every rule finds itself with a perfect score from either language.
#[rstest]
fn every_rule_matches_its_own_text(searcher: RuleSearcher) {
    for &(number, primary, secondary) in SAMPLE_RULES {
        for text in [primary, secondary] {
            let results = searcher.fuzzy_search(text, 0.99, usize::MAX);
            let hit = results.iter().find(|r| r.rule_number == number);
            let_assert!(Some(hit) = hit, "Rule {} should match its own text {:?}", number, text);
            check!(hit.similarity_score == 1.0);
            check!(!hit.is_direct);
        }
    }
}

/// Test: Scores stay within [0, 1] and results come back best first.
#[rstest]
#[case("helmet")]
#[case("ride safe at night")]
#[case("brakes check")]
#[case("шлем безопасность")]
#[case("completely unrelated words")]
#[case("x")]
fn scores_are_bounded_and_sorted(searcher: RuleSearcher, #[case] query: &str) {
    let results = searcher.fuzzy_search(query, 0.0, usize::MAX);

    check!(results.len() == SAMPLE_RULES.len(), "Threshold 0 keeps every rule");
    check!(results.iter().all(|r| (0.0..=1.0).contains(&r.similarity_score)));
    check!(is_sorted_descending(&results));
}

/// Test: Equal scores keep corpus order.
#[rstest]
fn ties_keep_corpus_order(searcher: RuleSearcher) {
    let results = searcher.fuzzy_search("Safety", 0.6, 10);

    check!(numbers(&results) == [5, 12]);
    check!(results.iter().all(|r| r.similarity_score == 1.0));
}

/// Test: Reordered words still count when all of them are present.
#[rstest]
fn reordered_words_match(searcher: RuleSearcher) {
    let results = searcher.fuzzy_search("helmet wear", 0.6, 10);

    let_assert!([hit] = results.as_slice());
    check!(hit.rule_number == 1);
    check!(hit.similarity_score == 0.7);
    check!(hit.matched_language == MatchedLanguage::Primary);
}

/// Test: A query in the second language is attributed to that language.
#[rstest]
fn secondary_language_query(searcher: RuleSearcher) {
    let results = searcher.fuzzy_search("ШЛЕМ", 0.6, 10);

    check!(numbers(&results) == [1, 5]);
    check!(results.iter().all(|r| r.matched_language == MatchedLanguage::Secondary));
}

/// Test: `max_results` caps the list without changing its order.
#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn max_results_truncates(searcher: RuleSearcher, #[case] max_results: usize) {
    let all = searcher.fuzzy_search("ride", 0.0, usize::MAX);
    let capped = searcher.fuzzy_search("ride", 0.0, max_results);

    check!(capped.len() == max_results);
    check!(capped.as_slice() == &all[..max_results]);
}

/// Test: A threshold above every score returns nothing for text queries.
#[rstest]
fn threshold_above_one_filters_text_queries(searcher: RuleSearcher) {
    check!(searcher.fuzzy_search("helmet", 1.01, 10).is_empty());
}

#[rstest]
#[case("")]
#[case("    ")]
fn empty_query_returns_nothing(searcher: RuleSearcher, #[case] query: &str) {
    check!(searcher.fuzzy_search(query, 0.0, 10).is_empty());
}

// --- Direct number lookup ---

/// Test: A bare number is a direct hit regardless of threshold.
#[rstest]
#[case(0.0)]
#[case(0.6)]
#[case(1.1)]
fn numeric_query_is_direct(searcher: RuleSearcher, #[case] threshold: f64) {
    let results = searcher.fuzzy_search("5", threshold, 10);

    let_assert!([hit] = results.as_slice());
    check!(hit.rule_number == 5);
    check!(hit.is_direct);
    check!(hit.similarity_score == 1.0);
    check!(hit.matched_language == MatchedLanguage::DirectNumber);
}

/// Test: Numbers missing from the corpus give no results, not fuzzy matches.
#[rstest]
#[case("8")]
#[case("99")]
#[case("0")]
#[case("4294967296")]
fn absent_number_returns_nothing(searcher: RuleSearcher, #[case] query: &str) {
    check!(searcher.fuzzy_search(query, 0.0, 10).is_empty());
}

/// Test: Mixed digits and text are searched as text.
#[rstest]
fn number_with_text_is_fuzzy(searcher: RuleSearcher) {
    let results = searcher.fuzzy_search("5 helmet", 0.0, 10);
    check!(results.iter().all(|r| !r.is_direct));
}

// --- Keyword search ---

/// Test: Keywords may match in different languages of the same rule.
#[rstest]
fn keywords_match_across_languages(searcher: RuleSearcher) {
    let results = searcher.search_by_keywords(&["helmet", "шлем"], 0.5);

    check!(numbers(&results) == [1, 5]);
    check!(results.iter().all(|r| r.matched_language == MatchedLanguage::Both));
    check!(results.iter().all(|r| r.similarity_score == 1.0));
}

/// Test: Every keyword must be present somewhere in the rule.
#[rstest]
fn keywords_require_all(searcher: RuleSearcher) {
    check!(searcher.search_by_keywords(&["helmet", "brakes"], 0.0).is_empty());
}

#[rstest]
fn keywords_ignore_case(searcher: RuleSearcher) {
    let results = searcher.search_by_keywords(&["HELMET"], 0.5);
    check!(numbers(&results) == [1, 5]);
}

/// Test: Keywords are matched as given, spaces included.
#[test]
fn keyword_spaces_are_significant() {
    let corpus = Corpus::from_rules(vec![
        Rule::new(1, "Ride a bike", "Катайся на велосипеде"),
        Rule::new(2, "Always ride", "Всегда катайся"),
    ])
    .expect("Rules are valid");
    let searcher = RuleSearcher::new(Arc::new(corpus));

    let results = searcher.search_by_keywords(&["ride "], 0.5);
    check!(numbers(&results) == [1]);
    check!(results[0].similarity_score == 1.0);

    check!(searcher.search_by_keywords(&["   "], 0.0).is_empty());
    check!(searcher.search_by_keywords(&["ride", "  "], 0.0).is_empty());
}

#[rstest]
fn empty_keywords_return_nothing(searcher: RuleSearcher) {
    let keywords: [&str; 0] = [];
    check!(searcher.search_by_keywords(&keywords, 0.0).is_empty());
}

// --- Random rule ---

/// Test: Random picks always come from the corpus and cover it.
#[rstest]
fn random_rule_draws_corpus_members(searcher: RuleSearcher) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = BTreeSet::new();

    for _ in 0..500 {
        let_assert!(Some(hit) = searcher.random_rule(&mut rng));
        check!(SAMPLE_RULES.iter().any(|&(number, ..)| number == hit.rule_number));
        check!(hit.is_direct);
        seen.insert(hit.rule_number);
    }
    check!(seen.len() == SAMPLE_RULES.len());
}

/// Test: A NaN threshold keeps nothing in either search.
#[rstest]
fn nan_threshold_matches_nothing(searcher: RuleSearcher) {
    check!(searcher.fuzzy_search("helmet", f64::NAN, 10).is_empty());
    check!(searcher.search_by_keywords(&["helmet"], f64::NAN).is_empty());
}

// --- Scoring constants ---

/// Test: The cascade tiers stay ordered so a weaker strategy never outranks a stronger one.
#[test]
fn cascade_tiers_are_ordered() {
    use rulesearch::search::{
        ALL_WORDS_SCORE, EDIT_RATIO_WEIGHT, EXACT_SCORE, GAP_PENALTY, MAX_GAP_PENALTY,
        MOST_WORDS_BASE, MOST_WORDS_SCALE, PARTIAL_HIT, PARTIAL_WEIGHT, SEQUENCE_BASE_SCORE,
        SEQUENCE_CUTOFF, WORD_JACCARD_WEIGHT, sequence_score,
    };

    check!(SEQUENCE_BASE_SCORE < EXACT_SCORE);
    check!(SEQUENCE_BASE_SCORE - GAP_PENALTY < SEQUENCE_CUTOFF + 1e-9);
    check!(SEQUENCE_BASE_SCORE - MAX_GAP_PENALTY < SEQUENCE_CUTOFF);
    check!(MOST_WORDS_BASE + MOST_WORDS_SCALE <= ALL_WORDS_SCORE);

    let composite_ceiling = EDIT_RATIO_WEIGHT + WORD_JACCARD_WEIGHT + PARTIAL_HIT * PARTIAL_WEIGHT;
    check!(composite_ceiling < MOST_WORDS_BASE);

    check!(sequence_score(&["ride", "safe"], &["always", "ride", "safe"]) == SEQUENCE_BASE_SCORE);
}

// --- Concurrency ---

/// Test: Searches share one corpus across threads and agree with each other.
#[rstest]
fn concurrent_searches_agree(searcher: RuleSearcher) {
    let expected = searcher.fuzzy_search("ride safe", 0.0, 5);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let searcher = searcher.clone();
                scope.spawn(move || searcher.fuzzy_search("ride safe", 0.0, 5))
            })
            .collect();
        for handle in handles {
            let_assert!(Ok(results) = handle.join());
            check!(results == expected);
        }
    });
}
