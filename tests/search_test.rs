mod common;

use assert2::check;
use common::{at, file, MockDrive};
use drive_mcp::search::{generate_variants, search_files, SearchOptions};

fn options(max_results: usize) -> SearchOptions {
    SearchOptions {
        max_results,
        ..Default::default()
    }
}

/// Test: the canonical ranking example. With the literal weights, an exact
/// match beats a starts-with match, which beats a plain contains match.
#[tokio::test(flavor = "multi_thread")]
async fn ranking_orders_exact_then_prefix_then_contains() {
    let mock = MockDrive::with_files(vec![
        file("a1", "Annual Report 2023", at(2023, 11, 1)),
        file("b2", "Report", at(2022, 1, 1)),
        file("c3", "reportx", at(2024, 6, 1)),
    ]);

    let results = search_files(&mock, "Report", &options(20)).await.unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.file.id.as_str()).collect();
    check!(ids == vec!["b2", "c3", "a1"], "results: {results:?}");

    check!(results[0].score >= 1000.0, "exact match bonus missing");
    check!(results[1].score >= 500.0, "starts-with bonus missing");
    check!(results[2].score >= 300.0, "contains bonus missing");
}

/// Test: files returned by several variants appear exactly once.
#[tokio::test(flavor = "multi_thread")]
async fn merged_results_are_deduplicated_by_id() {
    // "Report" matches the original, lowercase, uppercase and prefix
    // variants; without dedup it would appear once per variant.
    let mock = MockDrive::with_files(vec![
        file("x", "Report", at(2023, 1, 1)),
        file("y", "Reporting Guide", at(2023, 2, 1)),
    ]);

    let results = search_files(&mock, "Report", &options(20)).await.unwrap();

    let mut ids: Vec<&str> = results.iter().map(|r| r.file.id.as_str()).collect();
    check!(ids.len() == 2);
    ids.sort_unstable();
    ids.dedup();
    check!(ids.len() == 2, "duplicate ids in merged results");
}

/// Test: the result set never exceeds max_results.
#[tokio::test(flavor = "multi_thread")]
async fn truncates_to_max_results() {
    let files = (0u32..12)
        .map(|i| {
            file(
                &format!("f{i}"),
                &format!("Project Plan {i}"),
                at(2023, 1, 1 + i),
            )
        })
        .collect();
    let mock = MockDrive::with_files(files);

    let results = search_files(&mock, "Project", &options(5)).await.unwrap();
    check!(results.len() == 5);
}

/// Test: a failing variant is skipped; survivors still produce results.
#[tokio::test(flavor = "multi_thread")]
async fn partial_variant_failure_is_tolerated() {
    let mock =
        MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]).failing_on("report");

    let results = search_files(&mock, "Report", &options(20)).await.unwrap();
    check!(results.len() == 1);
    check!(results[0].file.id == "x");
}

/// Test: when every variant fails the search fails — never an empty success.
#[tokio::test(flavor = "multi_thread")]
async fn total_failure_surfaces_an_error() {
    let mock = MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]).failing_always();

    let result = search_files(&mock, "Report", &options(20)).await;
    check!(result.is_err(), "all-variants failure must not yield Ok");

    let message = result.unwrap_err().to_string();
    check!(
        message.contains("backend unavailable"),
        "error should carry the cause: {message}"
    );
}

/// Test: identical inputs over an unchanged file set give identical output.
#[tokio::test(flavor = "multi_thread")]
async fn search_is_deterministic() {
    let files = vec![
        file("a", "Budget Q1", at(2023, 3, 1)),
        file("b", "Budget Q2", at(2023, 6, 1)),
        file("c", "budget-final", at(2023, 9, 1)),
    ];

    let first = {
        let mock = MockDrive::with_files(files.clone());
        search_files(&mock, "Budget", &options(10)).await.unwrap()
    };
    let second = {
        let mock = MockDrive::with_files(files);
        search_files(&mock, "Budget", &options(10)).await.unwrap()
    };

    let first_ids: Vec<&str> = first.iter().map(|r| r.file.id.as_str()).collect();
    let second_ids: Vec<&str> = second.iter().map(|r| r.file.id.as_str()).collect();
    check!(first_ids == second_ids);
}

/// Test: equal scores fall back to modification time, newest first.
#[tokio::test(flavor = "multi_thread")]
async fn ties_break_on_modified_time_descending() {
    let mock = MockDrive::with_files(vec![
        file("old", "Budget", at(2021, 1, 1)),
        file("new", "Budget", at(2024, 1, 1)),
    ]);

    let results = search_files(&mock, "Budget", &options(10)).await.unwrap();
    check!(results.len() == 2);
    check!(results[0].file.id == "new");
    check!(results[1].file.id == "old");
}

/// Test: one listing request per generated variant.
#[tokio::test(flavor = "multi_thread")]
async fn issues_one_request_per_variant() {
    let mock = MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]);

    search_files(&mock, "Report", &options(20)).await.unwrap();

    let expected = generate_variants("Report").len();
    check!(mock.request_count() == expected);
}

/// Test: per-variant page size is 2×max_results, capped at 100.
#[tokio::test(flavor = "multi_thread")]
async fn page_size_has_reranking_headroom_and_a_cap() {
    let mock = MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]);
    search_files(&mock, "Report", &options(20)).await.unwrap();
    check!(mock.page_sizes.lock().unwrap().iter().all(|&p| p == 40));

    let mock = MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]);
    search_files(&mock, "Report", &options(60)).await.unwrap();
    check!(mock.page_sizes.lock().unwrap().iter().all(|&p| p == 100));
}

/// Test: filters carry the MIME restriction and trash exclusion.
#[tokio::test(flavor = "multi_thread")]
async fn filters_include_type_and_trash_clauses() {
    let mock = MockDrive::with_files(vec![file("x", "Report", at(2023, 1, 1))]);
    let opts = SearchOptions {
        max_results: 10,
        file_type: Some("application/pdf".to_string()),
        order_by: None,
        include_trashed: false,
    };
    search_files(&mock, "Report", &opts).await.unwrap();

    let filters = mock.filters.lock().unwrap();
    check!(!filters.is_empty());
    for filter in filters.iter() {
        check!(filter.contains("mimeType = 'application/pdf'"));
        check!(filter.contains("trashed = false"));
    }
}

/// Test: a diacritic-bearing query still finds the unaccented file via the
/// stripped variant, and the match scores on the normalized signal.
#[tokio::test(flavor = "multi_thread")]
async fn diacritic_query_finds_unaccented_names() {
    let mock = MockDrive::with_files(vec![file("dn", "Bao cao Da Nang", at(2023, 5, 1))]);

    let results = search_files(&mock, "Báo cáo Đà Nẵng", &options(10))
        .await
        .unwrap();
    check!(results.len() == 1);
    check!(results[0].file.id == "dn");
    check!(results[0].score >= 250.0);
}
