//! Analysis commands.

use std::path::Path;

use console::style;
use tokio::io::AsyncReadExt;

use geoscore::services::{AnalyzeOptions, TextOptions};
use geoscore::{Config, GeoAnalyzer};

use crate::cli::output;
use crate::cli::OutputFormat;

fn build_analyzer(config: &Config, format: OutputFormat) -> GeoAnalyzer {
    let analyzer = GeoAnalyzer::from_config(config);
    if !analyzer.has_generator() && format != OutputFormat::Json {
        eprintln!(
            "{} LLM disabled, running pattern analysis only",
            style("!").yellow()
        );
    }
    analyzer
}

/// Fetch and score a single URL.
pub async fn cmd_analyze(
    config: &Config,
    url: &str,
    query: &str,
    competitors: Vec<String>,
    discover: bool,
    model: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config, format);
    let options = AnalyzeOptions {
        competitor_urls: competitors,
        auto_discover_competitors: discover,
        ..AnalyzeOptions::default()
    }
    .with_model(model);

    if format != OutputFormat::Json {
        eprintln!("{} Analyzing {}", style("→").cyan(), url);
    }
    let report = analyzer.analyze_url(url, query, &options).await?;
    output::print_analysis(&report, format)
}

/// Score text from a file or stdin.
pub async fn cmd_text(
    config: &Config,
    file: Option<&Path>,
    query: &str,
    title: Option<String>,
    model: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let content = read_input(file).await?;
    let analyzer = build_analyzer(config, format);
    let options = TextOptions {
        title,
        ai_model: model.map(str::to_string),
        ..TextOptions::default()
    };

    let report = analyzer.analyze_raw_text(&content, query, &options).await?;
    output::print_analysis(&report, format)
}

/// Rank several URLs.
pub async fn cmd_compare(
    config: &Config,
    urls: &[String],
    query: &str,
    model: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config, format);
    if format != OutputFormat::Json {
        eprintln!("{} Comparing {} URLs", style("→").cyan(), urls.len());
    }
    let report = analyzer.compare_urls(urls, query, model).await?;
    output::print_comparison(&report, format)
}

/// Compare a rewrite file against the page it replaces.
pub async fn cmd_validate(
    config: &Config,
    original: &str,
    optimized: &Path,
    query: &str,
    title: Option<&str>,
    model: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let content = read_input(Some(optimized)).await?;
    let analyzer = build_analyzer(config, format);
    let validation = analyzer
        .validate_rewrite(original, &content, query, title, model)
        .await?;
    output::print_validation(&validation, format)
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Ok(tokio::fs::read_to_string(path).await?)
        }
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            Ok(content)
        }
    }
}
