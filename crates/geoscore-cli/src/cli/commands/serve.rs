//! Web server command.

use console::style;

use geoscore::Config;

/// Start the HTTP API server.
pub async fn cmd_serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    println!(
        "{} Starting geoscore API at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    if config.llm.enabled {
        println!(
            "  {} Semantic extraction: {} ({})",
            style("✓").green(),
            config.llm.provider.as_str(),
            config.llm.model()
        );
    } else {
        println!("  {} Semantic extraction disabled", style("!").yellow());
    }
    println!("  Press Ctrl+C to stop");

    geoscore_server::serve(config, host, port).await
}
