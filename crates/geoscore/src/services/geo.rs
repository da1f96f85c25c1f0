//! GEO analysis service: read, score, compare.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::types::*;
use crate::analysis::{comparison, PatternAnalyzer, ScoreMerger, SemanticExtractor};
use crate::config::{Config, LimitsConfig};
use crate::error::GeoError;
use crate::llm::{LlmClient, TextGenerator};
use crate::models::{
    CompetitorSummary, ContentDocument, DocumentFailure, ScoredDocument, SemanticOutcome,
    UnifiedAnalysis, ANALYSIS_VERSION,
};
use crate::reader::{ContentReader, JinaReader, ReadOptions, ReturnFormat, SearchOptions};

/// Successful analyses needed before a comparison can be ranked.
const MIN_SUCCESSFUL_ANALYSES: usize = 2;

/// Orchestrates reading, pattern analysis, semantic extraction and merging.
///
/// Holds no per-request state; one instance can serve concurrent requests.
pub struct GeoAnalyzer {
    reader: Arc<dyn ContentReader>,
    extractor: Option<SemanticExtractor>,
    pattern: PatternAnalyzer,
    merger: ScoreMerger,
    limits: LimitsConfig,
}

impl GeoAnalyzer {
    /// Create an analyzer. Without a generator every analysis is pattern-only.
    pub fn new(
        reader: Arc<dyn ContentReader>,
        generator: Option<Arc<dyn TextGenerator>>,
        config: &Config,
    ) -> Self {
        Self {
            reader,
            extractor: generator.map(|g| SemanticExtractor::new(g, config.extraction.clone())),
            pattern: PatternAnalyzer::new(config.scoring.clone()),
            merger: ScoreMerger::new(config.extraction.clone()),
            limits: config.limits.clone(),
        }
    }

    /// Create an analyzer backed by the Jina reader and the configured LLM.
    pub fn from_config(config: &Config) -> Self {
        let reader: Arc<dyn ContentReader> = Arc::new(JinaReader::new(config.reader.clone()));
        let generator: Option<Arc<dyn TextGenerator>> = if config.llm.enabled {
            debug!(
                "Semantic extraction via {} ({})",
                config.llm.provider.as_str(),
                config.llm.model()
            );
            Some(Arc::new(LlmClient::new(config.llm.clone())))
        } else {
            debug!("LLM disabled, analyses will be pattern-only");
            None
        };
        Self::new(reader, generator, config)
    }

    /// Whether semantic extraction is available at all.
    pub fn has_generator(&self) -> bool {
        self.extractor.is_some()
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Analyze an already-read document.
    pub async fn analyze_document(
        &self,
        document: ContentDocument,
        query: &str,
        options: &AnalyzeOptions,
    ) -> AnalysisReport {
        let url = document.url.clone();
        self.report(
            Instant::now(),
            &url,
            document,
            query,
            options,
            vec![FEATURE_PATTERN.to_string()],
        )
        .await
    }

    /// Read a URL and analyze it. Read failures are fatal.
    pub async fn analyze_url(
        &self,
        url: &str,
        query: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport, GeoError> {
        if url.trim().is_empty() || query.trim().is_empty() {
            return Err(GeoError::Validation(
                "Missing required fields: url, query".to_string(),
            ));
        }
        validate_url(url)?;

        let start = Instant::now();
        let mut document = self.reader.read(url, &ReadOptions::for_analysis()).await?;
        if document.url.is_empty() {
            document.url = url.to_string();
        }

        Ok(self
            .report(
                start,
                url,
                document,
                query,
                options,
                vec![FEATURE_PATTERN.to_string()],
            )
            .await)
    }

    /// Analyze caller-supplied text.
    pub async fn analyze_raw_text(
        &self,
        text: &str,
        query: &str,
        options: &TextOptions,
    ) -> Result<AnalysisReport, GeoError> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Err(GeoError::Validation(
                "Missing required fields: content, query".to_string(),
            ));
        }
        self.check_size(text)?;

        let title = non_empty(options.title.as_deref()).unwrap_or(DEFAULT_TEXT_TITLE);
        let url = non_empty(options.url.as_deref()).unwrap_or(DEFAULT_TEXT_URL);
        let document = ContentDocument::new(title, url, text);
        let analyze = AnalyzeOptions {
            ai_model: options.ai_model.clone(),
            semantic: options.semantic,
            ..AnalyzeOptions::default()
        };

        Ok(self
            .report(
                Instant::now(),
                url,
                document,
                query,
                &analyze,
                vec![FEATURE_PATTERN.to_string(), FEATURE_TEXT_INPUT.to_string()],
            )
            .await)
    }

    /// Analyze several URLs concurrently and rank them.
    ///
    /// Failed URLs are recorded rather than aborting the comparison, as long
    /// as at least two analyses succeed.
    pub async fn compare_urls(
        &self,
        urls: &[String],
        query: &str,
        ai_model: Option<&str>,
    ) -> Result<ComparisonReport, GeoError> {
        if urls.is_empty() || query.trim().is_empty() {
            return Err(GeoError::Validation(
                "Missing required fields: urls, query".to_string(),
            ));
        }
        let (min, max) = (self.limits.min_compare, self.limits.max_compare);
        if urls.len() < min || urls.len() > max {
            return Err(GeoError::ComparisonInput(format!(
                "Provide between {} and {} URLs to compare ({} given)",
                min,
                max,
                urls.len()
            )));
        }

        let start = Instant::now();
        let options = AnalyzeOptions::default().with_model(ai_model);
        let results = join_all(urls.iter().map(|url| self.analyze_url(url, query, &options))).await;

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(report) => documents.push(ScoredDocument {
                    url: url.clone(),
                    analysis: report.analysis,
                }),
                Err(e) => {
                    warn!("Comparison analysis failed for {}: {}", url, e);
                    failures.push(DocumentFailure {
                        url: url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if documents.len() < MIN_SUCCESSFUL_ANALYSES {
            return Err(GeoError::InsufficientAnalyses {
                required: MIN_SUCCESSFUL_ANALYSES,
                failures,
            });
        }

        let comparison = comparison::rank(query, documents, failures, self.pattern.config())?;
        info!(
            "Compared {} URLs for \"{}\": winner {} ({})",
            urls.len(),
            query,
            comparison.winner.url,
            comparison.winner.overall_score
        );

        Ok(ComparisonReport {
            comparison,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Score a rewrite against the page it replaces.
    pub async fn validate_rewrite(
        &self,
        original_url: &str,
        optimized_text: &str,
        query: &str,
        title: Option<&str>,
        ai_model: Option<&str>,
    ) -> Result<RewriteValidation, GeoError> {
        if original_url.trim().is_empty()
            || optimized_text.trim().is_empty()
            || query.trim().is_empty()
        {
            return Err(GeoError::Validation(
                "Missing required fields: originalUrl, optimizedContent, targetQuery".to_string(),
            ));
        }
        self.check_size(optimized_text)?;

        let start = Instant::now();
        let title = non_empty(title).unwrap_or(DEFAULT_TEXT_TITLE).to_string();
        let options = AnalyzeOptions::default().with_model(ai_model);
        let text_options = TextOptions {
            title: Some(title.clone()),
            url: Some(original_url.to_string()),
            ai_model: ai_model.map(String::from),
            ..TextOptions::default()
        };

        let (before, after) = tokio::try_join!(
            self.analyze_url(original_url, query, &options),
            self.analyze_raw_text(optimized_text, query, &text_options),
        )?;
        let delta = comparison::compare_rewrite(&before.analysis, &after.analysis);
        info!(
            "Rewrite of {}: overall {} -> {}",
            original_url, delta.before.overall, delta.after.overall
        );

        Ok(RewriteValidation {
            query: query.to_string(),
            original_url: original_url.to_string(),
            title,
            analyzed_at: Utc::now(),
            delta,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn check_size(&self, text: &str) -> Result<(), GeoError> {
        let actual = text.chars().count();
        if actual > self.limits.max_content_chars {
            return Err(GeoError::PayloadTooLarge {
                limit: self.limits.max_content_chars,
                actual,
            });
        }
        Ok(())
    }

    async fn report(
        &self,
        start: Instant,
        url: &str,
        document: ContentDocument,
        query: &str,
        options: &AnalyzeOptions,
        mut features: Vec<String>,
    ) -> AnalysisReport {
        let (scored, competitors) = tokio::join!(
            self.score(&document.body, query, options),
            self.competitors(query, options),
        );
        let (analysis, semantic_feature) = scored;
        features.extend(semantic_feature);

        info!(
            "Analyzed {} for \"{}\": overall {}",
            url, query, analysis.scores.overall
        );

        AnalysisReport {
            request: RequestInfo {
                url: url.to_string(),
                query: query.to_string(),
                competitor_urls: options.competitor_urls.clone(),
                analyzed_at: Utc::now(),
            },
            document,
            analysis,
            competitors,
            meta: ReportMeta {
                version: ANALYSIS_VERSION.to_string(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                features_used: features,
            },
        }
    }

    /// Pattern pass, optional extraction, merge. Returns the feature tag
    /// describing what the semantic step did, if it ran.
    async fn score(
        &self,
        body: &str,
        query: &str,
        options: &AnalyzeOptions,
    ) -> (UnifiedAnalysis, Option<String>) {
        let pattern = self.pattern.analyze(body, query);

        let outcome = match &self.extractor {
            Some(extractor) if options.semantic => {
                let model = options
                    .ai_model
                    .as_deref()
                    .unwrap_or_else(|| extractor.default_model());
                Some(extractor.extract(body, query, model).await)
            }
            _ => None,
        };

        let feature = outcome.as_ref().map(|o| match o {
            SemanticOutcome::Extracted(_) => FEATURE_SEMANTIC.to_string(),
            SemanticOutcome::Fallback { reason, .. } => {
                format!("{}{}", FEATURE_FALLBACK_PREFIX, reason)
            }
        });

        (self.merger.merge(pattern, outcome.as_ref()), feature)
    }

    async fn competitors(&self, query: &str, options: &AnalyzeOptions) -> Option<CompetitorReport> {
        let (analyses, errors) = if !options.competitor_urls.is_empty() {
            let results = self
                .reader
                .read_batch(&options.competitor_urls, &ReadOptions::json())
                .await;

            let mut analyses = Vec::new();
            let mut errors = Vec::new();
            for (url, result) in options.competitor_urls.iter().zip(results) {
                match result {
                    Ok(doc) => analyses.push(CompetitorSummary::from(&doc)),
                    Err(e) => {
                        warn!("Failed to read competitor {}: {}", url, e);
                        errors.push(DocumentFailure {
                            url: url.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
            (analyses, errors)
        } else if options.auto_discover_competitors {
            let search = SearchOptions {
                return_format: ReturnFormat::Json,
                ..SearchOptions::default()
            };
            match self.reader.search(query, &search).await {
                Ok(docs) => (docs.iter().map(CompetitorSummary::from).collect(), Vec::new()),
                Err(e) => {
                    warn!("Competitor search failed for \"{}\": {}", query, e);
                    (
                        Vec::new(),
                        vec![DocumentFailure {
                            url: query.to_string(),
                            error: e.to_string(),
                        }],
                    )
                }
            }
        } else {
            return None;
        };

        Some(CompetitorReport {
            query: query.to_string(),
            retrieved_at: Utc::now(),
            analyses,
            errors,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_url(url: &str) -> Result<(), GeoError> {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(GeoError::Validation(format!("Invalid URL: {}", url))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(matches!(
            validate_url("example.com"),
            Err(GeoError::Validation(_))
        ));
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("Title")), Some("Title"));
    }
}
