//! Single-call writers: cover letters and tailored professional summaries.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{COVER_LETTER_PROMPT_TEMPLATE, RESUME_SUMMARY_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, CAREER_WRITER_SYSTEM};
use crate::llm_client::LanguageModel;

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    pub company: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeSummaryRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummaryResponse {
    pub resume_summary: String,
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("resume_text", &self.resume_text)?;
        require("job_description", &self.job_description)?;
        require("company", &self.company)?;
        require("job_title", &self.job_title)
    }
}

impl ResumeSummaryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("resume_text", &self.resume_text)?;
        require("job_description", &self.job_description)
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub async fn generate_cover_letter(
    request: &CoverLetterRequest,
    llm: &dyn LanguageModel,
) -> Result<String, AppError> {
    request.validate()?;
    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("resume_text", request.resume_text.as_str()),
            ("job_description", request.job_description.as_str()),
            ("company", request.company.as_str()),
            ("job_title", request.job_title.as_str()),
        ],
    );
    write(llm, &prompt, "Cover letter generation").await
}

pub async fn generate_resume_summary(
    request: &ResumeSummaryRequest,
    llm: &dyn LanguageModel,
) -> Result<String, AppError> {
    request.validate()?;
    let prompt = fill_template(
        RESUME_SUMMARY_PROMPT_TEMPLATE,
        &[
            ("resume_text", request.resume_text.as_str()),
            ("job_description", request.job_description.as_str()),
        ],
    );
    write(llm, &prompt, "Resume summary generation").await
}

async fn write(llm: &dyn LanguageModel, prompt: &str, stage: &str) -> Result<String, AppError> {
    let text = llm
        .complete(prompt, CAREER_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("{stage} failed: {e}")))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::MalformedOutput(format!("{stage} returned no text")));
    }
    Ok(text.to_string())
}
