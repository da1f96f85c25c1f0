//! Multi-document comparison and rewrite validation.

mod common;

use common::*;
use geoscore::GeoError;

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn reader() -> StubReader {
    StubReader::new()
        .page("https://good.example", "Good", GOOD_PAGE)
        .page("https://weak.example", "Weak", WEAK_PAGE)
        .page("https://other.example", "Other", "# Notes\nRust compiles code. It checks borrows.")
}

#[tokio::test]
async fn test_compare_ranks_and_records_failures() {
    let analyzer = analyzer(reader(), None);
    let report = analyzer
        .compare_urls(
            &urls(&[
                "https://weak.example",
                "https://down.example",
                "https://good.example",
            ]),
            "rust adoption",
            None,
        )
        .await
        .unwrap();
    let comparison = &report.comparison;

    assert_eq!(comparison.winner.url, "https://good.example");
    assert_eq!(comparison.results.len(), 2);
    assert_eq!(comparison.results[0].rank, 1);
    assert!(comparison.results[0].is_winner);
    assert_eq!(comparison.results[1].url, "https://weak.example");
    assert!(comparison.results[0].scores.overall >= comparison.results[1].scores.overall);
    assert_eq!(
        comparison.insights.score_range.max,
        comparison.results[0].scores.overall
    );

    assert_eq!(comparison.errors.len(), 1);
    assert_eq!(comparison.errors[0].url, "https://down.example");
    assert!(comparison.errors[0].error.contains("404"));
}

#[tokio::test]
async fn test_compare_runs_semantic_per_document() {
    let generator = StubGenerator::text(SEMANTIC_REPLY);
    let analyzer = analyzer(reader(), Some(generator.clone()));
    analyzer
        .compare_urls(
            &urls(&["https://good.example", "https://weak.example", "https://other.example"]),
            "rust",
            Some("custom-model"),
        )
        .await
        .unwrap();
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn test_compare_insufficient_analyses() {
    let analyzer = analyzer(reader(), None);
    let err = analyzer
        .compare_urls(
            &urls(&["https://good.example", "https://down.example", "https://gone.example"]),
            "rust",
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Not enough successful analyses (minimum 2 required): \
         https://down.example: Failed to read content: \
         Reader returned HTTP 404 for https://down.example; \
         https://gone.example: Failed to read content: \
         Reader returned HTTP 404 for https://gone.example"
    );
    let failed: Vec<_> = err.failures().iter().map(|f| f.url.as_str()).collect();
    assert_eq!(failed, vec!["https://down.example", "https://gone.example"]);
}

#[tokio::test]
async fn test_compare_url_count_bounds() {
    let analyzer = analyzer(reader(), None);

    let err = analyzer
        .compare_urls(&urls(&["https://good.example"]), "rust", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::ComparisonInput(_)));
    assert_eq!(err.status_code(), 422);

    let six = urls(&[
        "https://a.example",
        "https://b.example",
        "https://c.example",
        "https://d.example",
        "https://e.example",
        "https://f.example",
    ]);
    let err = analyzer.compare_urls(&six, "rust", None).await.unwrap_err();
    assert!(matches!(err, GeoError::ComparisonInput(_)));

    let err = analyzer
        .compare_urls(&urls(&["https://good.example", "https://weak.example"]), " ", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Validation(_)));
}

#[tokio::test]
async fn test_validate_rewrite_improvement() {
    let analyzer = analyzer(reader(), None);
    let validation = analyzer
        .validate_rewrite("https://weak.example", GOOD_PAGE, "rust adoption", None, None)
        .await
        .unwrap();

    assert_eq!(validation.title, "Optimized Content");
    assert_eq!(validation.original_url, "https://weak.example");
    assert!(validation.delta.improved);
    assert!(validation.delta.improvements.overall.improved);
    assert!(validation.delta.after.overall > validation.delta.before.overall);
    assert!(validation.delta.recommendations_after.len() <= 3);
    assert_eq!(validation.delta.metrics.list_structures.before, 0.0);
    assert_eq!(validation.delta.metrics.list_structures.after, 2.0);
}

#[tokio::test]
async fn test_validate_rewrite_regression() {
    let analyzer = analyzer(reader(), None);
    let validation = analyzer
        .validate_rewrite("https://good.example", WEAK_PAGE, "rust", Some("Shorter"), None)
        .await
        .unwrap();

    assert_eq!(validation.title, "Shorter");
    assert!(!validation.delta.improved);
    assert!(validation
        .delta
        .improvements
        .regressions
        .contains(&"Overall score decreased".to_string()));
    assert_eq!(
        validation.delta.next_steps,
        vec![
            "Address the identified regressions",
            "Review areas that did not improve"
        ]
    );
}

#[tokio::test]
async fn test_validate_rewrite_errors() {
    let analyzer = analyzer(reader(), None);

    let err = analyzer
        .validate_rewrite("https://down.example", GOOD_PAGE, "rust", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Read(_)));

    let err = analyzer
        .validate_rewrite("https://good.example", "", "rust", None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required fields: originalUrl, optimizedContent, targetQuery"
    );
}
