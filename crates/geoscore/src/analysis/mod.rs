//! Scoring engine components.
//!
//! Data flows one way: text statistics feed the pattern analyzer, whose
//! result is optionally fused with a semantic record by the merger. The
//! comparison functions work on finished records only.

pub mod comparison;
pub mod merge;
pub mod pattern;
pub mod report;
pub mod semantic;
mod text_stats;

pub use merge::ScoreMerger;
pub use pattern::PatternAnalyzer;
pub use semantic::SemanticExtractor;
pub use text_stats::{query_terms, term_coverage, TextStatistics};
