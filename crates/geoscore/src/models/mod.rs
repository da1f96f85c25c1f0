//! Data types shared by the analyzers, the service layer and the outer surfaces.
//!
//! Everything here serializes with camelCase keys to keep the JSON output
//! stable for API consumers.

mod analysis;
mod comparison;
mod document;
mod metrics;
mod scores;
mod semantic;

pub use analysis::{
    Chunking, ContentChunk, PatternAnalysis, Priority, Recommendation, UnifiedAnalysis,
    ANALYSIS_VERSION,
};
pub use comparison::{
    ComparisonResult, DeltaResult, DocumentFailure, Insights, MetricComparison,
    MetricComparisons, RankedEntry, RewriteDelta, ScoreDelta, ScoreRange, ScoredDocument,
    Winner,
};
pub use document::{CompetitorSummary, ContentDocument};
pub use metrics::{
    ClaimDensityMetrics, DateMarkerMetrics, EntityMetrics, LatentIntent, MetricBundle,
    ProblematicSentence, QueryAlignmentMetrics, SemanticSummary, SemanticTripleMetrics,
    SentenceLengthMetrics, StructureMetrics,
};
pub use scores::{round0, round1, round2, GeoScores};
pub use semantic::{Coherence, Entity, EntityType, SemanticOutcome, SemanticRecord, SemanticTriple};
