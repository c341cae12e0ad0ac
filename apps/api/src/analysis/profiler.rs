//! Profiler agent: turns a structured resume into targeted market-research queries.

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::prompts::PROFILER_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, LanguageModel, LlmError};

const EXPECTED_QUERIES: std::ops::RangeInclusive<usize> = 5..=7;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchBrief {
    pub search_queries: Vec<String>,
}

/// Returns the profiler's queries in the order the model produced them.
///
/// Malformed output (no `search_queries` list, or nothing but blank strings) is an error:
/// the research stage must never run silently with zero queries.
pub async fn create_search_queries(
    resume_json: &str,
    llm: &dyn LanguageModel,
) -> Result<Vec<String>, AppError> {
    let prompt = fill_template(PROFILER_PROMPT_TEMPLATE, &[("resume_json", resume_json)]);
    let brief: SearchBrief = complete_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| match e {
            LlmError::Parse(e) => AppError::MalformedOutput(format!(
                "Profiler did not return a search_queries list: {e}"
            )),
            other => AppError::Llm(format!("Profiler call failed: {other}")),
        })?;

    let queries: Vec<String> = brief
        .search_queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if queries.is_empty() {
        return Err(AppError::MalformedOutput(
            "Profiler returned no usable search queries".to_string(),
        ));
    }
    if !EXPECTED_QUERIES.contains(&queries.len()) {
        warn!(
            "Profiler returned {} queries (expected {}-{})",
            queries.len(),
            EXPECTED_QUERIES.start(),
            EXPECTED_QUERIES.end()
        );
    }

    info!("Profiler produced {} search queries", queries.len());
    Ok(queries)
}
