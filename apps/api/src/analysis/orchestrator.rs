//! Multi-agent market analysis pipeline.
//!
//! Flow: classify_seniority → create_search_queries → ResearchDispatcher::dispatch →
//!       report synthesis.
//!
//! Stages run once, in order, with no retries at this level. Research failures are
//! absorbed into the Brief; any other stage failure ends the run.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::profiler::create_search_queries;
use crate::analysis::prompts::REPORT_PROMPT_TEMPLATE;
use crate::analysis::seniority::{classify_seniority, SeniorityLabel};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, CAREER_WRITER_SYSTEM};
use crate::llm_client::LanguageModel;
use crate::research::{Brief, ResearchDispatcher};
use crate::resume::StructuredResume;

#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub run_id: Uuid,
    pub seniority: SeniorityLabel,
    pub report: String,
    pub query_count: usize,
    pub failed_queries: usize,
}

#[derive(Clone)]
pub struct Orchestrator {
    llm: Arc<dyn LanguageModel>,
    dispatcher: ResearchDispatcher,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LanguageModel>, dispatcher: ResearchDispatcher) -> Self {
        Self { llm, dispatcher }
    }

    pub async fn run(&self, resume: &StructuredResume) -> Result<MarketReport, AppError> {
        let run_id = Uuid::new_v4();
        self.run_stages(run_id, resume)
            .instrument(info_span!("market_analysis", %run_id))
            .await
    }

    async fn run_stages(
        &self,
        run_id: Uuid,
        resume: &StructuredResume,
    ) -> Result<MarketReport, AppError> {
        info!("Starting multi-agent analysis pipeline");
        let resume_json = resume.to_prompt_json()?;

        // Stage 1: seniority
        let seniority = classify_seniority(&resume_json, self.llm.as_ref()).await?;
        info!("Determined seniority: {}", seniority);

        // Stage 2: profiler
        let queries = create_search_queries(&resume_json, self.llm.as_ref()).await?;

        // Stage 3: research fan-out
        let brief = self.dispatcher.dispatch(&queries).await;
        for entry in brief.entries().iter().filter(|e| e.result.is_failed()) {
            warn!("Report will be written without research for '{}'", entry.query);
        }

        // Stage 4: report
        let report = self.synthesize_report(&resume_json, &brief, seniority).await?;

        info!("Pipeline complete");
        Ok(MarketReport {
            run_id,
            seniority,
            report,
            query_count: brief.len(),
            failed_queries: brief.failed_count(),
        })
    }

    async fn synthesize_report(
        &self,
        resume_json: &str,
        brief: &Brief,
        seniority: SeniorityLabel,
    ) -> Result<String, AppError> {
        let market_brief = brief.to_string();
        let prompt = fill_template(
            REPORT_PROMPT_TEMPLATE,
            &[
                ("seniority", seniority.as_str()),
                ("market_brief", market_brief.as_str()),
                ("resume_json", resume_json),
            ],
        );

        let report = self
            .llm
            .complete(&prompt, CAREER_WRITER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Report synthesis failed: {e}")))?;

        if report.trim().is_empty() {
            return Err(AppError::MalformedOutput(
                "Report synthesis returned an empty report".to_string(),
            ));
        }
        Ok(report)
    }
}
