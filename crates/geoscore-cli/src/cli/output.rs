//! Terminal rendering of reports.

use console::{style, StyledObject};

use geoscore::analysis::report::{DetailedReport, Rating, SummaryReport};
use geoscore::models::{GeoScores, MetricComparison, Priority, Recommendation, ScoreDelta};
use geoscore::services::{AnalysisReport, ComparisonReport, RewriteValidation};

use super::OutputFormat;

fn rating_style(rating: Rating) -> StyledObject<&'static str> {
    let text = rating.as_str();
    match rating {
        Rating::Excellent => style(text).green().bold(),
        Rating::Good => style(text).cyan(),
        Rating::Fair => style(text).yellow(),
        Rating::NeedsImprovement => style(text).red(),
    }
}

fn score_style(score: f64) -> StyledObject<String> {
    let text = format!("{:.1}", score);
    match Rating::from_score(score) {
        Rating::Excellent => style(text).green(),
        Rating::Good => style(text).cyan(),
        Rating::Fair => style(text).yellow(),
        Rating::NeedsImprovement => style(text).red(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_scores(scores: &GeoScores) {
    println!(
        "  Overall:        {} / 10",
        score_style(scores.overall).bold()
    );
    println!("  Extractability: {}", score_style(scores.extractability));
    println!("  Readability:    {}", score_style(scores.readability));
    println!("  Citability:     {}", score_style(scores.citability));
}

fn print_recommendation(rec: &Recommendation) {
    let marker = match rec.priority {
        Priority::High => style("●").red(),
        Priority::Medium => style("●").yellow(),
        Priority::Low => style("●").dim(),
    };
    println!("  {} {} ({})", marker, style(&rec.method).bold(), rec.location);
    println!("      {}", rec.suggested_text);
    if !rec.rationale.is_empty() {
        println!("      {}", style(&rec.rationale).dim());
    }
}

pub fn print_analysis(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => return print_json(report),
        OutputFormat::Summary => {
            let summary = SummaryReport::new(&report.analysis);
            println!("\n{} {}", style("GEO score for").bold(), report.document.url);
            print_scores(&summary.scores);
            if !summary.top_recommendations.is_empty() {
                println!("\n{}", style("Top recommendations").bold());
                for rec in &summary.top_recommendations {
                    print_recommendation(rec);
                }
            }
        }
        OutputFormat::Detailed => {
            let detailed = DetailedReport::new(&report.analysis);
            println!(
                "\n{} {} ({})",
                style("GEO report for").bold(),
                report.document.url,
                rating_style(detailed.summary.rating)
            );
            if !report.document.title.is_empty() {
                println!("  {}", style(&report.document.title).dim());
            }
            println!("  Query: \"{}\"\n", report.request.query);
            print_scores(&detailed.scores);

            if !detailed.summary.primary_issues.is_empty() {
                println!("\n{}", style("Primary issues").bold());
                for issue in &detailed.summary.primary_issues {
                    println!("  {} {}", style("✗").red(), issue);
                }
            }
            if !detailed.summary.quick_wins.is_empty() {
                println!("\n{}", style("Quick wins").bold());
                for win in &detailed.summary.quick_wins {
                    println!("  {} {}", style("→").cyan(), win);
                }
            }

            let buckets = [
                ("High priority", &detailed.recommendations.high_priority),
                ("Medium priority", &detailed.recommendations.medium_priority),
                ("Low priority", &detailed.recommendations.low_priority),
            ];
            for (label, recs) in buckets {
                if recs.is_empty() {
                    continue;
                }
                println!("\n{}", style(label).bold());
                for rec in recs {
                    print_recommendation(rec);
                }
            }

            if let Some(competitors) = &report.competitors {
                println!("\n{}", style("Competitors").bold());
                for c in &competitors.analyses {
                    println!(
                        "  {} {} ({} words, {} headings, avg sentence {:.1})",
                        style("•").dim(),
                        c.url,
                        c.word_count,
                        c.heading_count,
                        c.avg_sentence_length
                    );
                }
                for failure in &competitors.errors {
                    println!("  {} {}: {}", style("✗").red(), failure.url, failure.error);
                }
            }
        }
    }

    if report.meta.used_fallback() {
        eprintln!(
            "\n{} Semantic extraction fell back to pattern scores",
            style("!").yellow()
        );
    }
    println!(
        "\n{}",
        style(format!(
            "{} in {}ms",
            report.meta.features_used.join(", "),
            report.meta.processing_time_ms
        ))
        .dim()
    );
    Ok(())
}

pub fn print_comparison(report: &ComparisonReport, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(report);
    }

    let comparison = &report.comparison;
    println!(
        "\n{} \"{}\"\n",
        style("Comparison for").bold(),
        comparison.query
    );
    for entry in &comparison.results {
        let rank = format!("#{}", entry.rank);
        let rank = if entry.is_winner {
            style(rank).green().bold()
        } else {
            style(rank).dim()
        };
        println!(
            "  {} {} {}",
            rank,
            score_style(entry.scores.overall),
            entry.url
        );
        if format == OutputFormat::Detailed {
            println!(
                "      extractability {:.1}, readability {:.1}, citability {:.1}",
                entry.scores.extractability, entry.scores.readability, entry.scores.citability
            );
            if let Some(top) = &entry.top_recommendation {
                println!("      {} {}", style("→").cyan(), top);
            }
        }
    }

    println!(
        "\n{} {}: {}",
        style("Winner").bold(),
        comparison.winner.url,
        comparison.winner.reason
    );
    let insights = &comparison.insights;
    println!(
        "  Range {:.1} to {:.1}, average {:.1}",
        insights.score_range.min, insights.score_range.max, insights.average_score
    );

    for failure in &comparison.errors {
        println!("  {} {}: {}", style("✗").red(), failure.url, failure.error);
    }
    Ok(())
}

fn delta_line(label: &str, delta: &ScoreDelta) {
    let text = format!("{:+.1} ({}%)", delta.delta, delta.delta_percent);
    let text = if delta.improved {
        style(text).green()
    } else if delta.delta < 0.0 {
        style(text).red()
    } else {
        style(text).dim()
    };
    println!("  {:<15} {}", label, text);
}

fn metric_line(label: &str, metric: &MetricComparison) {
    println!(
        "  {:<24} {:.1} → {:.1} ({})",
        label, metric.before, metric.after, metric.improvement
    );
}

pub fn print_validation(
    validation: &RewriteValidation,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(validation);
    }

    let delta = &validation.delta;
    let verdict = if delta.improved {
        style("improved").green().bold()
    } else {
        style("not improved").red().bold()
    };
    println!(
        "\n{} {} vs \"{}\": {}\n",
        style("Rewrite of").bold(),
        validation.original_url,
        validation.title,
        verdict
    );
    println!(
        "  Overall {} → {}",
        score_style(delta.before.overall),
        score_style(delta.after.overall)
    );
    delta_line("Overall", &delta.improvements.overall);
    delta_line("Extractability", &delta.improvements.extractability);
    delta_line("Readability", &delta.improvements.readability);
    delta_line("Citability", &delta.improvements.citability);

    if format == OutputFormat::Detailed {
        println!("\n{}", style("Metrics").bold());
        metric_line("Claim density", &delta.metrics.claim_density);
        metric_line("Avg sentence length", &delta.metrics.avg_sentence_length);
        metric_line("Lists", &delta.metrics.list_structures);
        metric_line("Entity density", &delta.metrics.entity_density);

        if !delta.recommendations_after.is_empty() {
            println!("\n{}", style("Remaining recommendations").bold());
            for rec in &delta.recommendations_after {
                print_recommendation(rec);
            }
        }
    }

    for regression in &delta.improvements.regressions {
        println!("  {} {}", style("✗").red(), regression);
    }
    println!("\n{}", style("Next steps").bold());
    for step in &delta.next_steps {
        println!("  {} {}", style("→").cyan(), step);
    }
    Ok(())
}
