//! CLI parser and command dispatch.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use geoscore::Config;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rating, issues, quick wins and all recommendations
    #[default]
    Detailed,
    /// Scores and the top recommendations
    Summary,
    /// Raw JSON report
    Json,
}

#[derive(Parser)]
#[command(name = "geoscore")]
#[command(about = "Score content for generative engine optimization")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "detailed")]
    format: OutputFormat,

    /// Model identifier for semantic extraction
    #[arg(short, long, global = true, env = "GEO_MODEL")]
    model: Option<String>,

    /// Skip semantic extraction (pattern analysis only)
    #[arg(long, global = true)]
    no_llm: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and score it against a query
    Analyze {
        /// Page to analyze
        url: String,
        /// Target search query
        #[arg(short, long)]
        query: String,
        /// Competitor pages to summarise alongside (repeatable)
        #[arg(long = "competitor")]
        competitors: Vec<String>,
        /// Discover competitors by searching for the query
        #[arg(long)]
        discover: bool,
    },

    /// Score text from a file, or stdin when no file is given
    Text {
        /// Text or Markdown file
        file: Option<PathBuf>,
        /// Target search query
        #[arg(short, long)]
        query: String,
        /// Title to report for the text
        #[arg(long)]
        title: Option<String>,
    },

    /// Rank several URLs for one query
    Compare {
        /// Pages to compare
        #[arg(required = true)]
        urls: Vec<String>,
        /// Target search query
        #[arg(short, long)]
        query: String,
    },

    /// Check whether a rewrite improves on the original page
    Validate {
        /// URL of the current page
        #[arg(long)]
        original: String,
        /// File containing the rewritten content
        #[arg(long)]
        optimized: PathBuf,
        /// Target search query
        #[arg(short, long)]
        query: String,
        /// Title for the rewrite
        #[arg(long)]
        title: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000", env = "PORT")]
        port: u16,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(&Config::expand_path(path)).await?,
        None => Config::load().await,
    };
    if cli.no_llm {
        config.llm.enabled = false;
    }

    let format = cli.format;
    let model = cli.model.as_deref();

    match cli.command {
        Commands::Analyze {
            url,
            query,
            competitors,
            discover,
        } => {
            commands::cmd_analyze(&config, &url, &query, competitors, discover, model, format)
                .await
        }
        Commands::Text { file, query, title } => {
            commands::cmd_text(&config, file.as_deref(), &query, title, model, format).await
        }
        Commands::Compare { urls, query } => {
            commands::cmd_compare(&config, &urls, &query, model, format).await
        }
        Commands::Validate {
            original,
            optimized,
            query,
            title,
        } => {
            commands::cmd_validate(
                &config,
                &original,
                &optimized,
                &query,
                title.as_deref(),
                model,
                format,
            )
            .await
        }
        Commands::Serve { host, port } => commands::cmd_serve(&config, &host, port).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::cmd_config_show(&config),
        },
    }
}
