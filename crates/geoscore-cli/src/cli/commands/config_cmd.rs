//! Configuration management commands.

use console::style;

use geoscore::Config;

/// Print the effective configuration. Secrets are never serialized.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    eprintln!("{} Source: {}", style("→").dim(), source);

    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
