//! HTTP API for the geoscore content scoring engine.
//!
//! Exposes the analysis service as JSON endpoints:
//! - Single URL and raw text analysis
//! - Multi-URL comparison
//! - Rewrite validation against the original page

mod handlers;
mod routes;

pub use handlers::{ApiResponse, EmptyContext, ErrorData};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use geoscore::{Config, GeoAnalyzer};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<GeoAnalyzer>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_analyzer(GeoAnalyzer::from_config(config))
    }

    pub fn with_analyzer(analyzer: GeoAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Start the web server.
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config);
    if !state.analyzer.has_generator() {
        tracing::info!("LLM disabled; serving pattern-only analysis");
    }
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
