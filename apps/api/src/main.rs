mod analysis;
mod config;
mod errors;
mod ingest;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::scoring::scorer_for;
use crate::analysis::stopwords::StopwordSet;
use crate::config::Config;
use crate::ingest::job_descriptions::load_job_descriptions;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rolematch API v{}", env!("CARGO_PKG_VERSION"));

    // Stopwords are fixed for the life of the process
    let stopwords = match &config.stopwords_path {
        Some(path) => StopwordSet::load(path)?,
        None => StopwordSet::english(),
    };
    let normalizer = TextNormalizer::new(stopwords);
    if normalizer.stopwords().is_empty() {
        warn!("Stopword set is empty; every token will be kept");
    } else {
        info!("Using {} stopwords", normalizer.stopwords().len());
    }

    let roles = load_job_descriptions(&config.job_descriptions_path, &normalizer).with_context(
        || {
            format!(
                "Failed to load job descriptions from '{}'",
                config.job_descriptions_path.display()
            )
        },
    )?;
    info!("Loaded {} job roles", roles.len());

    let scorer = scorer_for(config.scorer);
    info!("Match scorer initialized (backend: {})", scorer.backend());

    let state = AppState {
        config: config.clone(),
        roles: Arc::new(roles),
        normalizer,
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
