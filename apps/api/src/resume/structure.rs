use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::resume::prompts::STRUCTURE_PROMPT_TEMPLATE;

/// Resume as structured by the model. Section contents are kept as loose JSON
/// because they are only ever serialized back into downstream prompts.
///
/// Field shapes are coerced rather than rejected: a non-string summary is flattened
/// to text and a single object where a list is expected becomes a one-item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    #[serde(default)]
    pub personal_info: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default)]
    pub skills: Value,
    #[serde(default, deserialize_with = "lenient_list")]
    pub work_experience: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub education: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub projects: Vec<Value>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten_text(&Value::deserialize(deserializer)?))
}

fn flatten_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_text)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => map
            .values()
            .map(flatten_text)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        single => vec![single],
    })
}

impl StructuredResume {
    /// True when the model returned none of the expected sections.
    pub fn is_empty(&self) -> bool {
        is_blank(&self.personal_info)
            && self.summary.trim().is_empty()
            && is_blank(&self.skills)
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.projects.is_empty()
    }

    /// Pretty JSON used as the resume payload of every downstream prompt.
    pub fn to_prompt_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(is_blank),
        _ => false,
    }
}

/// Converts cleaned resume text into a `StructuredResume` with one model call.
pub async fn structure_resume(
    resume_text: &str,
    llm: &dyn LanguageModel,
) -> Result<StructuredResume, AppError> {
    let prompt = fill_template(STRUCTURE_PROMPT_TEMPLATE, &[("resume_text", resume_text)]);
    let resume: StructuredResume = complete_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| match e {
            LlmError::Parse(e) => {
                AppError::MalformedOutput(format!("Resume structuring returned invalid JSON: {e}"))
            }
            other => AppError::Llm(format!("Resume structuring failed: {other}")),
        })?;

    if resume.is_empty() {
        return Err(AppError::MalformedOutput(
            "Resume structuring returned no recognisable sections".to_string(),
        ));
    }

    info!(
        "Structured resume: {} jobs, {} education entries, {} projects",
        resume.work_experience.len(),
        resume.education.len(),
        resume.projects.len()
    );
    Ok(resume)
}
