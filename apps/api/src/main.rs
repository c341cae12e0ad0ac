mod analysis;
mod config;
mod errors;
mod knowledge;
mod llm_client;
mod research;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Orchestrator;
use crate::config::Config;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::research::{PerplexicaClient, QueryExecutor, ResearchDispatcher, RetryPolicy};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Insight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.anthropic_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize research backend
    let research = Arc::new(PerplexicaClient::new(config.perplexica.clone())?);
    let policy = RetryPolicy::from(config.research);
    let dispatcher = ResearchDispatcher::new(
        QueryExecutor::new(research, policy),
        config.research.max_parallel,
    );
    info!(
        "Research backend: {} (max {} in flight, {} attempt(s), {:?} timeout)",
        config.perplexica.api_url,
        dispatcher.max_parallel(),
        policy.max_attempts,
        policy.attempt_timeout
    );
    let orchestrator = Orchestrator::new(llm.clone(), dispatcher);

    // Initialize knowledge base
    let knowledge_base = Arc::new(KnowledgeBase::load(config.knowledge_base_path.as_deref())?);

    // Build app state
    let state = AppState {
        llm,
        knowledge_base,
        orchestrator,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
