//! End-to-end analysis through the service layer with stubbed backends.

mod common;

use common::*;
use geoscore::analysis::semantic::FALLBACK_NOTE;
use geoscore::models::{ContentDocument, GeoScores};
use geoscore::services::{AnalyzeOptions, TextOptions, FEATURE_FALLBACK_PREFIX};
use geoscore::GeoError;

#[tokio::test]
async fn test_short_text_end_to_end() {
    let analyzer = analyzer(StubReader::new(), None);
    let report = analyzer
        .analyze_raw_text(
            "Short sentence. Another short one.",
            "short sentence",
            &TextOptions::default(),
        )
        .await
        .unwrap();

    let metrics = &report.analysis.metrics;
    assert_eq!(metrics.sentence_length.average, 2.5);
    assert_eq!(metrics.query_alignment.primary_query, "short sentence");
    assert!(metrics.semantic.is_none());
    assert_eq!(report.document.title, "Optimized Content");
    assert_eq!(report.document.url, "text://optimized-content");
    assert_eq!(report.request.url, "text://optimized-content");
    assert_eq!(
        report.meta.features_used,
        vec!["pattern-analysis", "text-input"]
    );
    assert_eq!(report.meta.version, "1.0.0");

    let scores = report.analysis.scores;
    assert_eq!(
        scores,
        GeoScores::new(scores.extractability, scores.readability, scores.citability)
    );
}

#[tokio::test]
async fn test_semantic_extraction_updates_citability_only() {
    let generator = StubGenerator::text(SEMANTIC_REPLY);
    let with_llm = analyzer(StubReader::new(), Some(generator.clone()));
    let pattern_only = analyzer(StubReader::new(), None);
    let options = TextOptions::default();

    let report = with_llm
        .analyze_raw_text(GOOD_PAGE, "rust adoption", &options)
        .await
        .unwrap();
    let baseline = pattern_only
        .analyze_raw_text(GOOD_PAGE, "rust adoption", &options)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 1);
    assert!(report
        .meta
        .features_used
        .contains(&"llm-semantic-analysis".to_string()));
    assert!(!report.meta.used_fallback());

    let (scores, base) = (report.analysis.scores, baseline.analysis.scores);
    assert_eq!(scores.extractability, base.extractability);
    assert_eq!(scores.readability, base.readability);
    // mean(min(10, 3 * 2), min(10, 4 / 2))
    assert_eq!(scores.citability, 4.0);
    assert_ne!(scores.citability, base.citability);

    let metrics = &report.analysis.metrics;
    assert_eq!(metrics.semantic_triples.total, 3);
    assert_eq!(metrics.semantic_triples.quality, 0.8);
    assert_eq!(metrics.entities.total, 4);
    assert_eq!(metrics.entities.diversity, 4);
    let semantic = metrics.semantic.as_ref().unwrap();
    assert_eq!(semantic.relevance, 0.9);
    assert!(!semantic.used_fallback);
    assert_eq!(report.analysis.recommendations, baseline.analysis.recommendations);
}

async fn assert_fallback(reply: Reply) {
    let generator = StubGenerator::new(reply);
    let analyzer = analyzer(StubReader::new(), Some(generator.clone()));
    let report = analyzer
        .analyze_raw_text(GOOD_PAGE, "rust adoption", &TextOptions::default())
        .await
        .unwrap();

    assert_eq!(generator.calls(), 1);
    assert!(report.meta.used_fallback());
    assert!(report
        .meta
        .features_used
        .iter()
        .any(|f| f.starts_with(FEATURE_FALLBACK_PREFIX)));
    assert!(!report
        .meta
        .features_used
        .contains(&"llm-semantic-analysis".to_string()));

    let metrics = &report.analysis.metrics;
    let semantic = metrics.semantic.as_ref().unwrap();
    assert!(semantic.used_fallback);
    assert_eq!(semantic.missing_context, vec![FALLBACK_NOTE]);
    assert_eq!(semantic.relevance, 1.0);
    assert_eq!(metrics.semantic_triples.total, 0);
    assert_eq!(metrics.entities.total, 0);
    assert_eq!(report.analysis.scores.citability, 0.0);
}

#[tokio::test]
async fn test_fallback_when_generator_errors() {
    assert_fallback(Reply::Fail("connection refused".to_string())).await;
}

#[tokio::test]
async fn test_fallback_on_empty_reply() {
    assert_fallback(Reply::Text(String::new())).await;
    assert_fallback(Reply::Missing).await;
}

#[tokio::test]
async fn test_fallback_on_prose_reply() {
    assert_fallback(Reply::Text(
        "I'm sorry, I can't analyse this content right now.".to_string(),
    ))
    .await;
}

#[tokio::test]
async fn test_fallback_on_payload_without_facts() {
    assert_fallback(Reply::Text(
        r#"{"coherence": {"coherent": true}, "relevance": 0.7}"#.to_string(),
    ))
    .await;
}

#[tokio::test]
async fn test_fallback_reason_is_reported() {
    let generator = StubGenerator::new(Reply::Fail("timeout".to_string()));
    let analyzer = analyzer(StubReader::new(), Some(generator));
    let report = analyzer
        .analyze_raw_text(WEAK_PAGE, "rust", &TextOptions::default())
        .await
        .unwrap();
    assert_eq!(
        report.meta.features_used.last().unwrap(),
        "llm-fallback: LLM call failed: Connection error: timeout"
    );
}

#[tokio::test]
async fn test_semantic_disabled_skips_generator() {
    let generator = StubGenerator::text(SEMANTIC_REPLY);
    let analyzer = analyzer(StubReader::new(), Some(generator.clone()));
    let options = TextOptions {
        semantic: false,
        ..TextOptions::default()
    };
    let report = analyzer
        .analyze_raw_text(GOOD_PAGE, "rust", &options)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 0);
    assert!(report.analysis.metrics.semantic.is_none());
    assert_eq!(
        report.meta.features_used,
        vec!["pattern-analysis", "text-input"]
    );
}

#[tokio::test]
async fn test_raw_text_validation() {
    let analyzer = analyzer(StubReader::new(), None);
    let err = analyzer
        .analyze_raw_text("   ", "rust", &TextOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: content, query");
    assert_eq!(err.status_code(), 400);

    let err = analyzer
        .analyze_raw_text("Some text.", "", &TextOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Validation(_)));
}

#[tokio::test]
async fn test_raw_text_size_ceiling() {
    let mut config = test_config();
    config.limits.max_content_chars = 20;
    let analyzer =
        geoscore::GeoAnalyzer::new(std::sync::Arc::new(StubReader::new()), None, &config);

    let err = analyzer
        .analyze_raw_text(&"a".repeat(21), "rust", &TextOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GeoError::PayloadTooLarge {
            limit: 20,
            actual: 21
        }
    ));
    assert_eq!(err.status_code(), 413);

    assert!(analyzer
        .analyze_raw_text(&"a".repeat(20), "rust", &TextOptions::default())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_analyze_url() {
    let reader = StubReader::new().page("https://rust.example/adoption", "Adoption", GOOD_PAGE);
    let analyzer = analyzer(reader, None);
    let report = analyzer
        .analyze_url(
            "https://rust.example/adoption",
            "rust adoption",
            &AnalyzeOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(report.document.title, "Adoption");
    assert_eq!(report.request.url, "https://rust.example/adoption");
    assert_eq!(report.meta.features_used, vec!["pattern-analysis"]);
    assert!(report.competitors.is_none());
    assert_eq!(report.analysis.metrics.structure.heading_count, 3);
}

#[tokio::test]
async fn test_analyze_url_failures() {
    let analyzer = analyzer(StubReader::new(), None);

    let err = analyzer
        .analyze_url("https://missing.example", "rust", &AnalyzeOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Read(_)));
    assert_eq!(err.status_code(), 502);

    let err = analyzer
        .analyze_url("not a url", "rust", &AnalyzeOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Validation(_)));

    let err = analyzer
        .analyze_url("", "rust", &AnalyzeOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: url, query");
}

#[tokio::test]
async fn test_explicit_competitors_take_precedence() {
    let reader = StubReader::new()
        .page("https://a.example", "A", GOOD_PAGE)
        .page("https://b.example", "B", WEAK_PAGE);
    let analyzer = analyzer(reader, None);
    let options = AnalyzeOptions {
        competitor_urls: vec![
            "https://b.example".to_string(),
            "https://gone.example".to_string(),
        ],
        auto_discover_competitors: true,
        ..AnalyzeOptions::default()
    };

    let report = analyzer
        .analyze_url("https://a.example", "rust", &options)
        .await
        .unwrap();
    let competitors = report.competitors.unwrap();

    assert_eq!(competitors.query, "rust");
    assert_eq!(competitors.analyses.len(), 1);
    let summary = &competitors.analyses[0];
    assert_eq!(summary.url, "https://b.example");
    assert_eq!(summary.word_count, 10);
    assert_eq!(summary.sentence_count, 3);
    assert_eq!(summary.heading_count, 0);

    assert_eq!(competitors.errors.len(), 1);
    assert_eq!(competitors.errors[0].url, "https://gone.example");
    assert_eq!(report.request.competitor_urls.len(), 2);
}

#[tokio::test]
async fn test_auto_discovered_competitors() {
    let reader = StubReader::new().search_results(vec![
        ContentDocument::new("One", "https://one.example", "# Title\nFirst point. Second point."),
        ContentDocument::new("Two", "https://two.example", WEAK_PAGE),
    ]);
    let analyzer = analyzer(reader, None);
    let options = AnalyzeOptions {
        auto_discover_competitors: true,
        ..AnalyzeOptions::default()
    };

    let document = ContentDocument::new("Mine", "https://mine.example", GOOD_PAGE);
    let report = analyzer.analyze_document(document, "rust", &options).await;
    let competitors = report.competitors.unwrap();
    assert_eq!(competitors.analyses.len(), 2);
    assert_eq!(competitors.analyses[0].heading_count, 1);
    assert!(competitors.errors.is_empty());
}

#[tokio::test]
async fn test_failed_discovery_is_recorded() {
    let analyzer = analyzer(StubReader::new(), None);
    let options = AnalyzeOptions {
        auto_discover_competitors: true,
        ..AnalyzeOptions::default()
    };

    let document = ContentDocument::new("Mine", "https://mine.example", GOOD_PAGE);
    let report = analyzer.analyze_document(document, "rust", &options).await;
    let competitors = report.competitors.unwrap();
    assert!(competitors.analyses.is_empty());
    assert_eq!(competitors.errors[0].url, "rust");
}
