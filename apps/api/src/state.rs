use std::sync::Arc;

use crate::analysis::Orchestrator;
use crate::config::Config;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    /// Read-only after startup.
    pub knowledge_base: Arc<KnowledgeBase>,
    pub orchestrator: Orchestrator,
    pub config: Config,
}
