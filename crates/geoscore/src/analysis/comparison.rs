//! Ranking and before/after deltas over finished analyses.
//!
//! Pure functions: no reads, no model calls.

use chrono::Utc;

use crate::config::ScoringConfig;
use crate::error::GeoError;
use crate::models::{
    round0, round1, ComparisonResult, DeltaResult, DocumentFailure, GeoScores, Insights,
    MetricComparison, MetricComparisons, RankedEntry, RewriteDelta, ScoreDelta, ScoreRange,
    ScoredDocument, UnifiedAnalysis, Winner,
};

const IMPROVEMENT_AREAS: usize = 5;
const RECOMMENDATION_SAMPLE: usize = 3;

/// Rank documents by overall score, best first.
///
/// Ties keep their input order.
pub fn rank(
    query: &str,
    mut documents: Vec<ScoredDocument>,
    errors: Vec<DocumentFailure>,
    config: &ScoringConfig,
) -> Result<ComparisonResult, GeoError> {
    if documents.len() < 2 {
        return Err(GeoError::ComparisonInput(format!(
            "At least 2 analyzed documents are required, got {}",
            documents.len()
        )));
    }

    documents.sort_by(|a, b| {
        b.analysis
            .scores
            .overall
            .total_cmp(&a.analysis.scores.overall)
    });

    let first = &documents[0].analysis.scores;
    let last = &documents[documents.len() - 1].analysis.scores;
    let key_differences = key_differences(first, last, config.key_difference_margin);

    let overall: Vec<f64> = documents.iter().map(|d| d.analysis.scores.overall).collect();
    let min = overall.iter().copied().fold(f64::INFINITY, f64::min);
    let max = overall.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = overall.iter().sum::<f64>() / overall.len() as f64;

    let winner = Winner {
        url: documents[0].url.clone(),
        overall_score: first.overall,
        reason: if key_differences.is_empty() {
            "Highest overall GEO score".to_string()
        } else {
            key_differences.join("; ")
        },
    };

    let results = documents
        .into_iter()
        .enumerate()
        .map(|(i, doc)| RankedEntry {
            rank: i + 1,
            is_winner: i == 0,
            scores: doc.analysis.scores,
            top_recommendation: doc
                .analysis
                .recommendations
                .first()
                .map(|r| r.method.clone()),
            improvement_areas: doc
                .analysis
                .recommendations
                .into_iter()
                .take(IMPROVEMENT_AREAS)
                .collect(),
            url: doc.url,
        })
        .collect();

    Ok(ComparisonResult {
        query: query.to_string(),
        analyzed_at: Utc::now(),
        results,
        winner,
        insights: Insights {
            score_range: ScoreRange { min, max },
            average_score: round1(average),
            key_differences,
        },
        errors,
    })
}

fn key_differences(winner: &GeoScores, last: &GeoScores, margin: f64) -> Vec<String> {
    let mut differences = Vec::new();
    if winner.extractability > last.extractability + margin {
        differences.push(format!(
            "Winner has significantly better extractability ({} vs {})",
            winner.extractability, last.extractability
        ));
    }
    if winner.readability > last.readability + margin {
        differences.push(format!(
            "Winner has better readability score ({} vs {})",
            winner.readability, last.readability
        ));
    }
    if winner.citability > last.citability + margin {
        differences.push(format!(
            "Winner has higher citability ({} vs {})",
            winner.citability, last.citability
        ));
    }
    differences
}

/// Change of a single score dimension.
pub fn score_delta(before: f64, after: f64) -> ScoreDelta {
    let delta = after - before;
    ScoreDelta {
        delta: round1(delta),
        delta_percent: if before > 0.0 {
            round0(delta / before * 100.0) as i64
        } else {
            0
        },
        improved: delta > 0.0,
    }
}

/// Per-dimension deltas plus the list of dimensions that did not improve.
pub fn delta(before: &GeoScores, after: &GeoScores) -> DeltaResult {
    let overall = score_delta(before.overall, after.overall);
    let extractability = score_delta(before.extractability, after.extractability);
    let readability = score_delta(before.readability, after.readability);
    let citability = score_delta(before.citability, after.citability);

    let regressions = [
        (overall, "Overall score decreased"),
        (extractability, "Extractability decreased"),
        (readability, "Readability decreased"),
        (citability, "Citability decreased"),
    ]
    .into_iter()
    .filter(|(d, _)| !d.improved)
    .map(|(_, label)| label.to_string())
    .collect();

    DeltaResult {
        overall,
        extractability,
        readability,
        citability,
        regressions,
    }
}

/// Before/after view of one raw metric.
pub fn compare_metric(before: f64, after: f64) -> MetricComparison {
    let change = after - before;
    let percent = if before > 0.0 {
        round0(change / before * 100.0) as i64
    } else {
        0
    };
    MetricComparison {
        before: round1(before),
        after: round1(after),
        improvement: if change > 0.0 {
            format!("+{percent}%")
        } else {
            format!("{percent}%")
        },
    }
}

/// Full comparison of an original document against its rewrite.
pub fn compare_rewrite(before: &UnifiedAnalysis, after: &UnifiedAnalysis) -> RewriteDelta {
    let improvements = delta(&before.scores, &after.scores);
    let (b, a) = (&before.metrics, &after.metrics);

    let metrics = MetricComparisons {
        claim_density: compare_metric(b.claim_density.current, a.claim_density.current),
        avg_sentence_length: compare_metric(b.sentence_length.average, a.sentence_length.average),
        list_structures: compare_metric(
            b.structure.list_count as f64,
            a.structure.list_count as f64,
        ),
        entity_density: compare_metric(b.entities.density as f64, a.entities.density as f64),
    };

    let next_steps = if improvements.regressions.is_empty() {
        vec![
            "Content successfully optimised".to_string(),
            "Consider A/B testing the changes".to_string(),
        ]
    } else {
        vec![
            "Address the identified regressions".to_string(),
            "Review areas that did not improve".to_string(),
        ]
    };

    RewriteDelta {
        improved: improvements.overall.improved,
        before: before.scores,
        after: after.scores,
        improvements,
        metrics,
        recommendations_before: sample(before),
        recommendations_after: sample(after),
        next_steps,
    }
}

fn sample(analysis: &UnifiedAnalysis) -> Vec<crate::models::Recommendation> {
    analysis
        .recommendations
        .iter()
        .take(RECOMMENDATION_SAMPLE)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PatternAnalyzer, ScoreMerger};

    fn analysis(text: &str) -> UnifiedAnalysis {
        ScoreMerger::default().merge(PatternAnalyzer::default().analyze(text, "rust"), None)
    }

    fn scored(url: &str, overall: f64) -> ScoredDocument {
        let mut analysis = analysis("Rust is fast.");
        analysis.scores = GeoScores {
            overall,
            extractability: overall,
            readability: overall,
            citability: overall,
        };
        ScoredDocument {
            url: url.to_string(),
            analysis,
        }
    }

    #[test]
    fn test_rank_orders_and_summarises() {
        let docs = vec![scored("a", 7.2), scored("b", 9.1), scored("c", 5.0)];
        let result = rank("rust", docs, Vec::new(), &ScoringConfig::default()).unwrap();

        assert_eq!(result.winner.url, "b");
        assert_eq!(result.winner.overall_score, 9.1);
        assert_eq!(result.insights.score_range, ScoreRange { min: 5.0, max: 9.1 });
        assert_eq!(result.insights.average_score, 7.1);

        let order: Vec<_> = result.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert!(result.results[0].is_winner);
        assert!(!result.results[1].is_winner);
        assert_eq!(result.results[2].rank, 3);
    }

    #[test]
    fn test_key_differences() {
        let docs = vec![scored("a", 9.1), scored("b", 5.0)];
        let result = rank("rust", docs, Vec::new(), &ScoringConfig::default()).unwrap();
        assert_eq!(
            result.insights.key_differences,
            vec![
                "Winner has significantly better extractability (9.1 vs 5)",
                "Winner has better readability score (9.1 vs 5)",
                "Winner has higher citability (9.1 vs 5)",
            ]
        );
        assert!(result.winner.reason.contains("; "));

        let docs = vec![scored("a", 6.0), scored("b", 5.5)];
        let result = rank("rust", docs, Vec::new(), &ScoringConfig::default()).unwrap();
        assert!(result.insights.key_differences.is_empty());
        assert_eq!(result.winner.reason, "Highest overall GEO score");
    }

    #[test]
    fn test_key_difference_margin_from_config() {
        let config = ScoringConfig {
            key_difference_margin: 0.25,
            ..ScoringConfig::default()
        };
        let docs = vec![scored("a", 6.0), scored("b", 5.5)];
        let result = rank("rust", docs, Vec::new(), &config).unwrap();
        assert_eq!(result.insights.key_differences.len(), 3);
        assert_eq!(
            result.insights.key_differences[2],
            "Winner has higher citability (6 vs 5.5)"
        );
    }

    #[test]
    fn test_rank_ties_are_stable() {
        let docs = vec![scored("first", 6.0), scored("second", 6.0)];
        let result = rank("rust", docs, Vec::new(), &ScoringConfig::default()).unwrap();
        assert_eq!(result.winner.url, "first");
    }

    #[test]
    fn test_rank_requires_two() {
        let docs = vec![scored("a", 5.0)];
        let err = rank("rust", docs, Vec::new(), &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, GeoError::ComparisonInput(_)));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_rank_keeps_errors() {
        let errors = vec![DocumentFailure {
            url: "https://down.example".to_string(),
            error: "Jina Reader failed: 503".to_string(),
        }];
        let docs = vec![scored("a", 5.0), scored("b", 4.0)];
        let result = rank("rust", docs, errors.clone(), &ScoringConfig::default()).unwrap();
        assert_eq!(result.errors, errors);
    }

    #[test]
    fn test_score_delta() {
        assert_eq!(
            score_delta(5.0, 7.5),
            ScoreDelta {
                delta: 2.5,
                delta_percent: 50,
                improved: true
            }
        );
        assert_eq!(
            score_delta(0.0, 3.0),
            ScoreDelta {
                delta: 3.0,
                delta_percent: 0,
                improved: true
            }
        );
        let unchanged = score_delta(4.0, 4.0);
        assert_eq!(unchanged.delta, 0.0);
        assert!(!unchanged.improved);
        assert_eq!(score_delta(8.0, 6.0).delta_percent, -25);
    }

    #[test]
    fn test_delta_regressions() {
        let before = GeoScores::new(5.0, 5.0, 5.0);
        let after = GeoScores::new(6.0, 5.0, 4.0);
        let result = delta(&before, &after);

        assert!(result.extractability.improved);
        assert_eq!(
            result.regressions,
            vec![
                "Overall score decreased",
                "Readability decreased",
                "Citability decreased"
            ]
        );
    }

    #[test]
    fn test_compare_metric() {
        let m = compare_metric(2.0, 3.0);
        assert_eq!(m.improvement, "+50%");
        let m = compare_metric(4.0, 3.0);
        assert_eq!(m.improvement, "-25%");
        let m = compare_metric(0.0, 3.26);
        assert_eq!(m.improvement, "+0%");
        assert_eq!(m.after, 3.3);
        assert_eq!(compare_metric(1.0, 1.0).improvement, "0%");
    }

    #[test]
    fn test_compare_rewrite() {
        let before = analysis(
            "This is a very long sentence that keeps going without any facts or figures to back it up at all and never stops for a breath.",
        );
        let after = analysis(
            "# Rust in 2024\n## Speed\nRust is 45% faster. In 2024, teams saved $2 million.\n- Yesterday, 3 companies adopted it.\n## Safety\nMemory bugs fell by 70 percent.",
        );
        let result = compare_rewrite(&before, &after);

        assert!(result.improved);
        assert_eq!(result.before, before.scores);
        assert_eq!(result.after, after.scores);
        assert_eq!(result.metrics.list_structures.after, 1.0);
        assert!(result.recommendations_before.len() <= 3);
        assert!(result.recommendations_after.len() <= 3);
        if result.improvements.regressions.is_empty() {
            assert_eq!(result.next_steps[0], "Content successfully optimised");
        } else {
            assert_eq!(result.next_steps[0], "Address the identified regressions");
        }
    }

    #[test]
    fn test_compare_rewrite_regression_steps() {
        let good = analysis("# Rust in 2024\nRust is 45% faster. In 2024, teams saved $2 million.");
        let bad = analysis("words");
        let result = compare_rewrite(&good, &bad);
        assert!(!result.improved);
        assert_eq!(
            result.next_steps,
            vec![
                "Address the identified regressions",
                "Review areas that did not improve"
            ]
        );
    }
}
