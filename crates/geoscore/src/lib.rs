//! geoscore - generative engine optimization scoring.
//!
//! Core library exposing the scoring engine for the workspace crates:
//! pattern analysis, model-assisted semantic extraction, score merging,
//! and comparison of scored documents.

// Config types use `from_str` methods that return Option<Self>.
#![allow(clippy::should_implement_trait)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod reader;
pub mod services;

pub use config::Config;
pub use error::{ExtractionError, GeoError, LlmError, ReaderError};
pub use services::GeoAnalyzer;
