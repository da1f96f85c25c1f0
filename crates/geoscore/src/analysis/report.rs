//! Human-oriented views of a unified analysis.

use serde::{Deserialize, Serialize};

use crate::models::{GeoScores, Priority, Recommendation, UnifiedAnalysis};

const MAX_PRIMARY_ISSUES: usize = 5;
const QUICK_WINS: usize = 3;
const TOP_RECOMMENDATIONS: usize = 3;
/// Sub-scores below this are reported as primary issues.
const ISSUE_THRESHOLD: f64 = 6.0;
const LONG_SENTENCE_ISSUE_COUNT: usize = 5;

/// Coarse rating band of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Rating::Excellent
        } else if score >= 6.0 {
            Rating::Good
        } else if score >= 4.0 {
            Rating::Fair
        } else {
            Rating::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub overall_score: f64,
    pub rating: Rating,
    pub primary_issues: Vec<String>,
    pub quick_wins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedRecommendations {
    pub high_priority: Vec<Recommendation>,
    pub medium_priority: Vec<Recommendation>,
    pub low_priority: Vec<Recommendation>,
}

/// Full report: rating, issues, quick wins and bucketed recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub summary: ReportSummary,
    pub scores: GeoScores,
    pub detailed_analysis: UnifiedAnalysis,
    pub recommendations: PrioritizedRecommendations,
}

/// Condensed view: scores plus the first few recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub scores: GeoScores,
    pub top_recommendations: Vec<Recommendation>,
}

impl DetailedReport {
    pub fn new(analysis: &UnifiedAnalysis) -> Self {
        let scores = analysis.scores;
        Self {
            summary: ReportSummary {
                overall_score: scores.overall,
                rating: Rating::from_score(scores.overall),
                primary_issues: primary_issues(analysis),
                quick_wins: quick_wins(&analysis.recommendations),
            },
            scores,
            detailed_analysis: analysis.clone(),
            recommendations: prioritize(&analysis.recommendations),
        }
    }
}

impl SummaryReport {
    pub fn new(analysis: &UnifiedAnalysis) -> Self {
        Self {
            scores: analysis.scores,
            top_recommendations: analysis
                .recommendations
                .iter()
                .take(TOP_RECOMMENDATIONS)
                .cloned()
                .collect(),
        }
    }
}

fn primary_issues(analysis: &UnifiedAnalysis) -> Vec<String> {
    let scores = &analysis.scores;
    let mut issues = Vec::new();

    if scores.extractability < ISSUE_THRESHOLD {
        issues.push(
            "Low extractability score - content may be difficult for AI engines to parse",
        );
    }
    if scores.readability < ISSUE_THRESHOLD {
        issues.push(
            "Readability issues detected - content may be too complex or poorly structured",
        );
    }
    if scores.citability < ISSUE_THRESHOLD {
        issues.push("Limited citability - lacking verifiable claims and semantic triples");
    }
    if analysis.metrics.sentence_length.problematic.len() > LONG_SENTENCE_ISSUE_COUNT {
        issues.push("Multiple sentences exceed optimal length for AI processing");
    }

    issues
        .into_iter()
        .take(MAX_PRIMARY_ISSUES)
        .map(String::from)
        .collect()
}

fn quick_wins(recommendations: &[Recommendation]) -> Vec<String> {
    recommendations
        .iter()
        .take(QUICK_WINS)
        .map(|r| format!("{}: {}", r.method, r.suggested_text))
        .collect()
}

fn prioritize(recommendations: &[Recommendation]) -> PrioritizedRecommendations {
    let mut buckets = PrioritizedRecommendations::default();
    for rec in recommendations {
        let bucket = match rec.priority {
            Priority::High => &mut buckets.high_priority,
            Priority::Medium => &mut buckets.medium_priority,
            Priority::Low => &mut buckets.low_priority,
        };
        bucket.push(rec.clone());
    }
    buckets
}
