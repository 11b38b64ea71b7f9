//! Query variant generation.
//!
//! Drive's search operator is a literal substring match, so a single query
//! misses files named with different casing, separators, or diacritics. The
//! generator expands one query into a set of alternate renderings, each sent
//! to the API as its own `name contains` filter.
//!
//! The construction order below is load-bearing: the orchestrator merges
//! per-variant results first-occurrence-wins, so reordering variants changes
//! which response contributes a duplicated file's record.

use crate::search::normalize::{is_separator, strip_diacritics};
use ahash::AHashSet;

/// Fixed expansion applied when the query mentions "get task info". A leaked
/// caller-specific special case kept for compatibility with agents that rely
/// on it. See DESIGN.md before extending this list.
const GET_TASK_INFO_VARIANTS: &[&str] = &[
    "GetTaskInfo",
    "gettaskinfo",
    "task info",
    "Task Info",
    "get task",
    "task",
    "info",
];

/// Expands `query` into a duplicate-free list of search variants.
///
/// Always non-empty: the original query is the first entry. Identity is
/// case-sensitive, so "Report" and "report" are distinct variants.
pub fn generate_variants(query: &str) -> Vec<String> {
    let mut variants = VariantSet::default();

    variants.add(query.to_string());
    variants.add(query.to_lowercase());
    variants.add(query.to_uppercase());

    let stripped = strip_diacritics(query);
    if stripped != query {
        let stripped_lower = stripped.to_lowercase();
        variants.add(stripped);
        variants.add(stripped_lower);
    }

    let parts: Vec<&str> = query.split(is_separator).collect();
    if parts.len() > 1 {
        let joined = parts.concat();
        let joined_lower = joined.to_lowercase();
        variants.add(joined);
        variants.add(joined_lower);

        let capitalized: String = parts.iter().map(|part| capitalize(part)).collect();
        variants.add(capitalized);

        for part in &parts {
            if part.chars().count() >= 2 {
                variants.add((*part).to_string());
                variants.add(part.to_lowercase());
            }
        }
    }

    if query.to_lowercase().contains("get task info") {
        for fixed in GET_TASK_INFO_VARIANTS {
            variants.add((*fixed).to_string());
        }
    }

    // Prefix fan-out lets a partially remembered name still hit.
    let len = query.chars().count();
    if len > 3 {
        for end in 3..=len {
            variants.add(query.chars().take(end).collect());
        }
    }

    variants.into_vec()
}

/// First char uppercased, remainder lowercased.
fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Insertion-ordered string set.
#[derive(Default)]
struct VariantSet {
    seen: AHashSet<String>,
    ordered: Vec<String>,
}

impl VariantSet {
    fn add(&mut self, variant: String) {
        if self.seen.insert(variant.clone()) {
            self.ordered.push(variant);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn assert_no_duplicates(variants: &[String]) {
        let unique: AHashSet<&String> = variants.iter().collect();
        check!(unique.len() == variants.len(), "duplicates in {:?}", variants);
    }

    #[rstest]
    #[case("Report")]
    #[case("q1-budget_final.v2")]
    #[case("Đà Nẵng")]
    #[case("x")]
    fn contains_original_and_is_duplicate_free(#[case] query: &str) {
        let variants = generate_variants(query);
        check!(variants[0] == query);
        assert_no_duplicates(&variants);
    }

    #[test]
    fn original_comes_first() {
        // First-seen-wins downstream depends on this ordering.
        let variants = generate_variants("Báo Cáo");
        check!(variants[0] == "Báo Cáo");
        check!(variants[1] == "báo cáo");
        check!(variants[2] == "BÁO CÁO");
    }

    #[test]
    fn case_variants_present() {
        let variants = generate_variants("Report");
        check!(variants.contains(&"report".to_string()));
        check!(variants.contains(&"REPORT".to_string()));
    }

    #[test]
    fn diacritic_stripped_forms_only_when_changed() {
        let with = generate_variants("Đà Nẵng");
        check!(with.contains(&"da nang".to_string()));
        check!(with.contains(&"Da Nang".to_string()));

        // ASCII query: stripping is a no-op, so no extra members beyond the
        // case/part/prefix expansions.
        let without = generate_variants("plain");
        check!(!without.iter().any(|v| v == "plain "));
        assert_no_duplicates(&without);
    }

    #[test]
    fn multi_part_queries_expand_parts() {
        let variants = generate_variants("weekly-status_report");
        check!(variants.contains(&"weeklystatusreport".to_string()));
        check!(variants.contains(&"WeeklyStatusReport".to_string()));
        check!(variants.contains(&"weekly".to_string()));
        check!(variants.contains(&"status".to_string()));
        check!(variants.contains(&"report".to_string()));
    }

    #[test]
    fn single_char_parts_are_skipped() {
        let variants = generate_variants("a report");
        check!(!variants.contains(&"a".to_string()));
        check!(variants.contains(&"report".to_string()));
    }

    #[test]
    fn get_task_info_expansion() {
        let variants = generate_variants("Get Task Info");
        for fixed in GET_TASK_INFO_VARIANTS {
            check!(variants.contains(&(*fixed).to_string()), "missing {fixed}");
        }
    }

    #[test]
    fn prefixes_from_three_chars_up() {
        let variants = generate_variants("Budget");
        check!(variants.contains(&"Bud".to_string()));
        check!(variants.contains(&"Budg".to_string()));
        check!(variants.contains(&"Budge".to_string()));
        // Full-length prefix equals the original, already present once.
        assert_no_duplicates(&variants);
    }

    #[test]
    fn short_queries_get_no_prefixes() {
        let variants = generate_variants("abc");
        check!(variants == vec!["abc".to_string(), "ABC".to_string()]);
    }

    #[test]
    fn prefixes_respect_char_boundaries() {
        // Must not panic on multi-byte chars.
        let variants = generate_variants("Nẵng2024");
        check!(variants.iter().any(|v| v == "Nẵn"));
    }
}
