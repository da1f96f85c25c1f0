//! Deterministic pattern-based analysis.
//!
//! Computes structural and lexical metrics with fixed regular expressions,
//! derives the three sub-scores, simulates chunking and emits rule-based
//! recommendations. No I/O and no randomness.

use std::sync::LazyLock;

use regex::Regex;

use super::text_stats::{term_coverage, TextStatistics, HEADING};
use crate::config::ScoringConfig;
use crate::models::{
    round0, round1, Chunking, ClaimDensityMetrics, ContentChunk, DateMarkerMetrics,
    EntityMetrics, GeoScores, LatentIntent, MetricBundle, PatternAnalysis, Priority,
    ProblematicSentence, QueryAlignmentMetrics, Recommendation, SemanticTripleMetrics,
    SentenceLengthMetrics, StructureMetrics,
};

/// Fact-signal patterns. Each one counts at most once per sentence.
static CLAIM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+%",
        r"\$[\d,]+",
        r"(?i)\d+\s*(users|customers|companies|people)",
        r"(?i)(increases?|decreases?|improves?|reduces?)\s+by\s+\d+",
        r"(?i)(more|less|faster|slower)\s+than",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Temporal markers: years, month names, relative words, "N units ago".
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d{4}",
        r"(?i)(january|february|march|april|may|june|july|august|september|october|november|december)",
        r"(?i)(today|yesterday|tomorrow|recently|currently|now)",
        r"(?i)\d+\s+(days?|weeks?|months?|years?)\s+ago",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static TABLE_OF_CONTENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)table of contents").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Pattern analyzer with its scoring constants.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: ScoringConfig,
}

impl PatternAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Analyze `content` against `query`.
    pub fn analyze(&self, content: &str, query: &str) -> PatternAnalysis {
        let stats = TextStatistics::new(content);

        let sentence_length = self.sentence_length(&stats);
        let claim_density = self.claim_density(&stats);
        let date_markers = self.date_markers(&stats);
        let structure = self.structure(content, &stats);
        let query_alignment = query_alignment(content, query);

        let scores = GeoScores::new(
            self.extractability(&sentence_length, &claim_density, &date_markers),
            self.readability(&sentence_length, &structure),
            citability(&date_markers),
        );

        let recommendations =
            self.recommendations(&sentence_length, &claim_density, &date_markers, &structure);

        PatternAnalysis {
            scores,
            metrics: MetricBundle {
                sentence_length,
                claim_density,
                date_markers,
                structure,
                // Pattern matching cannot extract entities or triples reliably, so
                // these stay zeroed until a semantic record is merged in.
                semantic_triples: SemanticTripleMetrics::default(),
                entities: EntityMetrics::default(),
                query_alignment,
                semantic: None,
            },
            chunking: self.simulate_chunking(content),
            recommendations,
        }
    }

    fn sentence_length(&self, stats: &TextStatistics<'_>) -> SentenceLengthMetrics {
        let counts = stats.sentence_word_counts();
        let problematic = stats
            .sentences
            .iter()
            .zip(&counts)
            .enumerate()
            .filter(|(_, (_, &count))| count > self.config.problematic_sentence_words)
            .take(self.config.sample_cap)
            .map(|(i, (sentence, &count))| ProblematicSentence {
                sentence: sentence.to_string(),
                word_count: count,
                location: format!("Sentence {}", i + 1),
            })
            .collect();

        SentenceLengthMetrics {
            average: round1(stats.average_sentence_length()),
            target: self.config.sentence_target,
            problematic,
        }
    }

    fn claim_density(&self, stats: &TextStatistics<'_>) -> ClaimDensityMetrics {
        let claims: usize = stats
            .sentences
            .iter()
            .map(|s| CLAIM_PATTERNS.iter().filter(|p| p.is_match(s)).count())
            .sum();

        let current = if stats.words.is_empty() {
            0.0
        } else {
            claims as f64 / stats.words.len() as f64 * 100.0
        };

        ClaimDensityMetrics {
            current: round1(current),
            target: self.config.claim_density_target,
        }
    }

    fn date_markers(&self, stats: &TextStatistics<'_>) -> DateMarkerMetrics {
        let found = stats
            .sentences
            .iter()
            .filter(|s| DATE_PATTERNS.iter().any(|p| p.is_match(s)))
            .count();

        let scaled =
            (stats.sentences.len() as f64 * self.config.date_marker_ratio).floor() as usize;

        DateMarkerMetrics {
            found,
            recommended: scaled.max(self.config.date_marker_floor),
        }
    }

    fn structure(&self, content: &str, stats: &TextStatistics<'_>) -> StructureMetrics {
        let sections: Vec<usize> = HEADING.split(content).map(|s| s.chars().count()).collect();
        let avg_section_length = if sections.is_empty() {
            0.0
        } else {
            sections.iter().sum::<usize>() as f64 / sections.len() as f64
        };

        StructureMetrics {
            heading_count: stats.headings.len(),
            list_count: stats.list_items.len(),
            avg_section_length: round0(avg_section_length),
            has_table_of_contents: TABLE_OF_CONTENTS.is_match(content),
        }
    }

    fn extractability(
        &self,
        sentence_length: &SentenceLengthMetrics,
        claim_density: &ClaimDensityMetrics,
        date_markers: &DateMarkerMetrics,
    ) -> f64 {
        let sentence_score =
            (10.0 - (sentence_length.average - sentence_length.target).abs() / 2.0).max(0.0);
        let claim_score = if claim_density.target > 0.0 {
            (claim_density.current / claim_density.target * 10.0).min(10.0)
        } else {
            10.0
        };
        let date_score = coverage_score(date_markers);

        (sentence_score + claim_score + date_score) / 3.0
    }

    fn readability(
        &self,
        sentence_length: &SentenceLengthMetrics,
        structure: &StructureMetrics,
    ) -> f64 {
        // Gentler decay than extractability's sentence score.
        let sentence_score =
            (10.0 - (sentence_length.average - self.config.sentence_target).abs() / 3.0).max(0.0);
        let structure_score =
            (structure.heading_count as f64 * self.config.heading_weight).min(10.0);

        (sentence_score + structure_score) / 2.0
    }

    fn simulate_chunking(&self, content: &str) -> Chunking {
        let chars: Vec<char> = content.chars().collect();
        let chunks = chars
            .chunks(self.config.chunk_size.max(1))
            .take(self.config.chunk_cap)
            .map(|window| {
                let text: String = window.iter().collect();
                let words = WHITESPACE.split(&text).count();
                ContentChunk {
                    token_count: (words as f64 * self.config.token_factor).floor() as usize,
                    content: text,
                    semantic_coherence: self.config.chunk_coherence,
                    self_contained: true,
                    missing_context: Vec::new(),
                }
            })
            .collect();

        Chunking {
            chunks,
            average_coherence: self.config.chunk_coherence,
            problematic_boundaries: 0,
        }
    }

    fn recommendations(
        &self,
        sentence_length: &SentenceLengthMetrics,
        claim_density: &ClaimDensityMetrics,
        date_markers: &DateMarkerMetrics,
        structure: &StructureMetrics,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if sentence_length.average > self.config.long_sentence_threshold {
            recommendations.push(Recommendation {
                method: "Sentence Simplification".to_string(),
                priority: Priority::High,
                location: "Throughout document".to_string(),
                current_text: format!("Average sentence length: {} words", sentence_length.average),
                suggested_text: "Break long sentences into shorter ones (15-20 words) to improve AI parsing and fact extraction".to_string(),
                rationale: "Shorter sentences are easier for AI systems to parse and extract discrete facts from. The optimal length for LLM comprehension is 15-20 words per sentence.".to_string(),
            });
        }

        if claim_density.current < claim_density.target {
            recommendations.push(Recommendation {
                method: "Claim Density Enhancement".to_string(),
                priority: Priority::High,
                location: "Key sections".to_string(),
                current_text: format!("{} claims per 100 words", claim_density.current),
                suggested_text: format!(
                    "Add specific statistics, numbers, and factual claims to increase claim density towards target of {} per 100 words",
                    claim_density.target
                ),
                rationale: "Higher claim density provides more extractable facts for AI systems to cite. Quantitative statements, statistics, and specific claims are easier for LLMs to verify and reference.".to_string(),
            });
        }

        if date_markers.found < date_markers.recommended {
            recommendations.push(Recommendation {
                method: "Temporal Markers".to_string(),
                priority: Priority::Medium,
                location: "Claims and statistics".to_string(),
                current_text: format!("{} temporal markers found", date_markers.found),
                suggested_text: "Add dates to claims (e.g., \"As of 2024...\", \"In Q2 2025...\") to establish temporal context".to_string(),
                rationale: "Temporal markers improve claim verifiability and provide freshness signals to AI systems. Dated information helps LLMs assess relevance and recency.".to_string(),
            });
        }

        if structure.heading_count < self.config.min_headings {
            recommendations.push(Recommendation {
                method: "Structural Enhancement".to_string(),
                priority: Priority::Medium,
                location: "Document structure".to_string(),
                current_text: format!("{} headings found", structure.heading_count),
                suggested_text: "Add descriptive headings to break content into logical sections, improving both readability and AI parsing".to_string(),
                rationale: "Clear headings help AI systems understand content hierarchy and identify relevant sections for specific queries. Structured content is easier to chunk and cite.".to_string(),
            });
        }

        recommendations
    }
}

/// Date-marker coverage on a 0-10 scale.
fn coverage_score(date_markers: &DateMarkerMetrics) -> f64 {
    (date_markers.found as f64 / date_markers.recommended.max(1) as f64 * 10.0).min(10.0)
}

/// Pattern-only citability: date-marker coverage until semantic data arrives.
fn citability(date_markers: &DateMarkerMetrics) -> f64 {
    coverage_score(date_markers)
}

fn query_alignment(content: &str, query: &str) -> QueryAlignmentMetrics {
    QueryAlignmentMetrics {
        primary_query: query.to_string(),
        latent_intents: vec![LatentIntent {
            intent: "Informational".to_string(),
            kind: "informational".to_string(),
            coverage: round0(term_coverage(content, query) * 10.0) as u32,
        }],
    }
}
