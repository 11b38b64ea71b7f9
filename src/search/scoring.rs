//! Composite relevance scoring between a file name and the original query.
//!
//! Signals are cumulative: a name can collect the exact, prefix, substring,
//! diacritic, word, and fuzzy bonuses simultaneously, so there is no upper
//! bound on a score. The weights are part of the ranking contract — tests
//! pin them, and result ordering relies on their relative magnitudes.

use crate::search::levenshtein;
use crate::search::normalize::{normalize, split_words};

/// Exact case-insensitive match of the full name.
const EXACT_MATCH: f64 = 1000.0;
/// Name starts with the query.
const STARTS_WITH: f64 = 500.0;
/// Name contains the query.
const CONTAINS: f64 = 300.0;
/// Diacritic-stripped name contains the diacritic-stripped query.
const CONTAINS_NORMALIZED: f64 = 250.0;
/// A name word equals a query word.
const WORD_EXACT: f64 = 200.0;
/// A name word contains a query word as a substring.
const WORD_PARTIAL: f64 = 150.0;
/// Scale for the normalized Levenshtein similarity.
const FUZZY_SCALE: f64 = 100.0;

/// Scores `file_name` against the user's original query.
///
/// Always finite and non-negative; both inputs are compared lower-cased.
pub fn relevance_score(file_name: &str, query: &str) -> f64 {
    let name_lower = file_name.to_lowercase();
    let query_lower = query.to_lowercase();
    let name_normalized = normalize(&name_lower);
    let query_normalized = normalize(&query_lower);

    let mut score = 0.0;

    if name_lower == query_lower {
        score += EXACT_MATCH;
    }
    if name_lower.starts_with(&query_lower) {
        score += STARTS_WITH;
    }
    if name_lower.contains(&query_lower) {
        score += CONTAINS;
    }
    if name_normalized.contains(&query_normalized) {
        score += CONTAINS_NORMALIZED;
    }

    let name_words = split_words(&name_lower);
    for query_word in split_words(&query_lower) {
        if query_word.chars().count() < 2 {
            continue;
        }
        // Exact word equality takes priority; only one bonus per query word.
        if name_words.contains(&query_word) {
            score += WORD_EXACT;
        } else if name_words.iter().any(|word| word.contains(query_word)) {
            score += WORD_PARTIAL;
        }
    }

    score += FUZZY_SCALE * similarity(&name_lower, &query_lower);

    score
}

/// Normalized Levenshtein similarity in [0, 1].
///
/// Contributes 0 when both strings are empty (divide-by-zero guard).
fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let dist = levenshtein::distance(a, b);
    1.0 - (dist as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Report")]
    #[case("REPORT")]
    #[case("Đà Nẵng")]
    fn exact_match_scores_at_least_exact_bonus(#[case] name: &str) {
        check!(relevance_score(name, name) >= EXACT_MATCH);
    }

    #[test]
    fn exact_match_collects_every_signal() {
        // exact + starts-with + contains + normalized-contains + word
        // + full fuzzy similarity.
        let score = relevance_score("Report", "Report");
        check!((score - 2350.0).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn starts_with_outranks_plain_contains() {
        let starts = relevance_score("reportx", "Report");
        let contains = relevance_score("Annual Report 2023", "Report");
        check!(starts > contains);
    }

    #[test]
    fn ranking_example() {
        // The end-to-end ordering the search contract promises.
        let exact = relevance_score("Report", "Report");
        let starts = relevance_score("reportx", "Report");
        let contains = relevance_score("Annual Report 2023", "Report");
        check!(exact >= 1000.0);
        check!(starts >= 500.0);
        check!(contains >= 300.0);
        check!(exact > starts);
        check!(starts > contains);
    }

    #[test]
    fn diacritic_bonus_fires_without_literal_match() {
        let score = relevance_score("Bao cao Da Nang", "Báo cáo Đà Nẵng");
        check!(score >= 250.0, "score = {score}");
    }

    #[test]
    fn word_exact_beats_word_partial() {
        let exact_word = relevance_score("quarterly report final", "report");
        let partial_word = relevance_score("quarterly reporting final", "report");
        check!(exact_word > partial_word);
    }

    #[test]
    fn single_char_query_words_are_ignored_at_word_level() {
        // "q" is below the 2-char threshold, so the word-level bonus must not
        // fire: contains (300) + normalized contains (250) + fuzzy (< 100)
        // leaves the total under 650.
        let score = relevance_score("alpha q", "q");
        check!(score < 650.0, "score = {score}");
        check!(score >= CONTAINS + CONTAINS_NORMALIZED);
    }

    #[test]
    fn score_is_non_negative_for_disjoint_strings() {
        check!(relevance_score("zzzz", "aaaa") >= 0.0);
    }

    #[test]
    fn empty_inputs_do_not_divide_by_zero() {
        let score = relevance_score("", "");
        check!(score.is_finite());
    }

    #[test]
    fn deterministic() {
        let a = relevance_score("Annual Report 2023", "report");
        let b = relevance_score("Annual Report 2023", "report");
        check!(a.to_bits() == b.to_bits());
    }
}
