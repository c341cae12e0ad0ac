//! Seniority classification.
//!
//! Policy: strict. A label outside the closed set fails the run with
//! `AppError::MalformedOutput`; no default level is ever substituted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::SENIORITY_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, CLASSIFIER_SYSTEM};
use crate::llm_client::LanguageModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeniorityLabel {
    Intern,
    #[serde(rename = "Entry-Level")]
    EntryLevel,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl SeniorityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLabel::Intern => "Intern",
            SeniorityLabel::EntryLevel => "Entry-Level",
            SeniorityLabel::MidLevel => "Mid-Level",
            SeniorityLabel::Senior => "Senior",
        }
    }
}

impl fmt::Display for SeniorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeniority(pub String);

impl fmt::Display for UnknownSeniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised seniority label '{}'", self.0)
    }
}

impl FromStr for SeniorityLabel {
    type Err = UnknownSeniority;

    /// Accepts the first non-empty line, ignoring case, quotes, markdown emphasis,
    /// trailing punctuation, and space/underscore/hyphen spelling differences.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let line = raw.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
        let cleaned = line
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*' | '.' | '!' | ':'))
            .trim()
            .to_lowercase()
            .replace(['_', ' '], "-");

        match cleaned.as_str() {
            "intern" => Ok(SeniorityLabel::Intern),
            "entry-level" | "entrylevel" => Ok(SeniorityLabel::EntryLevel),
            "mid-level" | "midlevel" => Ok(SeniorityLabel::MidLevel),
            "senior" => Ok(SeniorityLabel::Senior),
            _ => Err(UnknownSeniority(line.to_string())),
        }
    }
}

/// Classifies the candidate with one model call. Failure is fatal to the caller's run.
pub async fn classify_seniority(
    resume_json: &str,
    llm: &dyn LanguageModel,
) -> Result<SeniorityLabel, AppError> {
    let prompt = fill_template(SENIORITY_PROMPT_TEMPLATE, &[("resume_json", resume_json)]);
    let answer = llm
        .complete(&prompt, CLASSIFIER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Seniority classification failed: {e}")))?;

    answer
        .parse::<SeniorityLabel>()
        .map_err(|e| AppError::MalformedOutput(format!("Seniority classification: {e}")))
}
