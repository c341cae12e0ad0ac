//! Axum route handlers for the resume analysis API.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::generators::{
    generate_cover_letter, generate_resume_summary, CoverLetterRequest, CoverLetterResponse,
    ResumeSummaryRequest, ResumeSummaryResponse,
};
use crate::analysis::rag::{analyze_resume, analyze_resume_for_job};
use crate::analysis::seniority::SeniorityLabel;
use crate::analysis::upload::ResumeUpload;
use crate::errors::AppError;
use crate::resume::{structure_resume, StructuredResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub structured_resume: StructuredResume,
}

#[derive(Debug, Serialize)]
pub struct ResearchSummary {
    pub query_count: usize,
    pub failed_queries: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub run_id: Uuid,
    pub seniority: SeniorityLabel,
    pub report: String,
    pub research: ResearchSummary,
    pub structured_resume: StructuredResume,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub analysis: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/parse
///
/// PDF upload → extracted text → structured resume JSON.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart?).await?;
    let text = upload.resume_text().await?;
    let structured_resume = structure_resume(&text, state.llm.as_ref()).await?;

    Ok(Json(ParseResponse { structured_resume }))
}

/// POST /api/v1/resume/analyze
///
/// Full multi-agent run: structure → seniority → profiler → live research → report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart?).await?;
    let text = upload.resume_text().await?;
    let structured_resume = structure_resume(&text, state.llm.as_ref()).await?;

    let outcome = state.orchestrator.run(&structured_resume).await?;

    Ok(Json(AnalyzeResponse {
        run_id: outcome.run_id,
        seniority: outcome.seniority,
        report: outcome.report,
        research: ResearchSummary {
            query_count: outcome.query_count,
            failed_queries: outcome.failed_queries,
        },
        structured_resume,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/resume/insights
///
/// Knowledge-base grounded insight report for an uploaded resume.
pub async fn handle_insights(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InsightsResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart?).await?;
    let text = upload.resume_text().await?;
    let resume_json = structure_resume(&text, state.llm.as_ref())
        .await?
        .to_prompt_json()?;

    let insights =
        analyze_resume(&resume_json, state.llm.as_ref(), &state.knowledge_base).await?;

    Ok(Json(InsightsResponse { insights }))
}

/// POST /api/v1/resume/match
///
/// Gap analysis between an uploaded resume and the `job_description` form field.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart?).await?;
    let job_description = upload.require_job_description()?.to_string();
    let text = upload.resume_text().await?;
    let resume_json = structure_resume(&text, state.llm.as_ref())
        .await?
        .to_prompt_json()?;

    let analysis = analyze_resume_for_job(
        &resume_json,
        &job_description,
        state.llm.as_ref(),
        &state.knowledge_base,
    )
    .await?;

    Ok(Json(MatchResponse { analysis }))
}

/// POST /api/v1/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(request) = payload?;
    let cover_letter = generate_cover_letter(&request, state.llm.as_ref()).await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/resume-summary
pub async fn handle_resume_summary(
    State(state): State<AppState>,
    payload: Result<Json<ResumeSummaryRequest>, JsonRejection>,
) -> Result<Json<ResumeSummaryResponse>, AppError> {
    let Json(request) = payload?;
    let resume_summary = generate_resume_summary(&request, state.llm.as_ref()).await?;
    Ok(Json(ResumeSummaryResponse { resume_summary }))
}
