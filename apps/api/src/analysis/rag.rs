//! Knowledge-base backed analyses: general resume insights and job-match gap analysis.
//!
//! Both follow the same shape: a short pre-analysis call distils the search text,
//! the knowledge base supplies the nearest market documents, and one final call
//! writes the Markdown report.

use tracing::{debug, info};

use crate::analysis::prompts::{
    INSIGHT_PROMPT_TEMPLATE, JOB_MATCH_PRE_ANALYSIS_TEMPLATE, JOB_MATCH_PROMPT_TEMPLATE,
    NO_CONTEXT, PRE_ANALYSIS_PROMPT_TEMPLATE,
};
use crate::analysis::seniority::{classify_seniority, SeniorityLabel};
use crate::errors::AppError;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::prompts::{fill_template, CAREER_WRITER_SYSTEM};
use crate::llm_client::LanguageModel;

/// Number of knowledge-base documents fed into each report.
pub const CONTEXT_DOCUMENTS: usize = 5;

/// Resume insight report grounded in the knowledge base.
pub async fn analyze_resume(
    resume_json: &str,
    llm: &dyn LanguageModel,
    knowledge_base: &KnowledgeBase,
) -> Result<String, AppError> {
    let seniority = classify_seniority(resume_json, llm).await?;
    info!("Insight analysis for a {} candidate", seniority);

    let pre_analysis = ask(
        llm,
        &fill_template(PRE_ANALYSIS_PROMPT_TEMPLATE, &[("resume_json", resume_json)]),
        "Resume pre-analysis",
    )
    .await?;
    let search_text = format!("{} Seniority: {}", pre_analysis.trim(), seniority);

    let context = retrieve_context(knowledge_base, &search_text);
    let prompt = build_insight_prompt(resume_json, &context, seniority);
    ask(llm, &prompt, "Insight report").await
}

/// Gap analysis between a resume and one job description.
pub async fn analyze_resume_for_job(
    resume_json: &str,
    job_description: &str,
    llm: &dyn LanguageModel,
    knowledge_base: &KnowledgeBase,
) -> Result<String, AppError> {
    let pre_analysis = ask(
        llm,
        &fill_template(
            JOB_MATCH_PRE_ANALYSIS_TEMPLATE,
            &[("resume_json", resume_json), ("job_description", job_description)],
        ),
        "Job-match pre-analysis",
    )
    .await?;

    let context = retrieve_context(knowledge_base, pre_analysis.trim());
    let prompt = fill_template(
        JOB_MATCH_PROMPT_TEMPLATE,
        &[
            ("context", context.as_str()),
            ("resume_json", resume_json),
            ("job_description", job_description),
        ],
    );
    ask(llm, &prompt, "Job-match report").await
}

fn retrieve_context(knowledge_base: &KnowledgeBase, search_text: &str) -> String {
    let documents = knowledge_base.query(search_text, CONTEXT_DOCUMENTS);
    debug!("Retrieved {} knowledge-base documents", documents.len());
    join_context(&documents)
}

fn join_context(documents: &[String]) -> String {
    if documents.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        documents.join("\n---\n")
    }
}

fn build_insight_prompt(resume_json: &str, context: &str, seniority: SeniorityLabel) -> String {
    fill_template(
        INSIGHT_PROMPT_TEMPLATE,
        &[
            ("seniority", seniority.as_str()),
            ("context", context),
            ("resume_json", resume_json),
        ],
    )
}

async fn ask(llm: &dyn LanguageModel, prompt: &str, stage: &str) -> Result<String, AppError> {
    let answer = llm
        .complete(prompt, CAREER_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("{stage} failed: {e}")))?;
    if answer.trim().is_empty() {
        return Err(AppError::MalformedOutput(format!("{stage} returned no text")));
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLlm;

    const SENIORITY: &str = "classify the candidate's seniority level";
    const PRE_ANALYSIS: &str = "identify the candidate's primary field";
    const INSIGHT: &str = "AI Resume Insight Assistant";
    const JOB_PRE: &str = "Extract the primary field";
    const JOB_MATCH: &str = "Talent Acquisition Specialist";

    #[tokio::test]
    async fn test_analyze_resume_feeds_retrieved_context_into_report() {
        let llm = ScriptedLlm::new()
            .on(SENIORITY, "Entry-Level")
            .on(PRE_ANALYSIS, "Field: Data Science. Skills: Tableau, Power BI, SQL")
            .on(INSIGHT, "## Identified Field\nData");
        let kb = KnowledgeBase::seeded();

        let report = analyze_resume("{\"skills\": [\"SQL\"]}", &llm, &kb).await.unwrap();

        assert_eq!(report, "## Identified Field\nData");
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 3);
        let insight_prompt = &prompts[2];
        assert!(insight_prompt.contains("seniority level is: Entry-Level"));
        assert!(insight_prompt.contains("Tableau"));
        assert!(!insight_prompt.contains(NO_CONTEXT));
    }

    #[tokio::test]
    async fn test_analyze_resume_with_empty_knowledge_base_says_so() {
        let llm = ScriptedLlm::new()
            .on(SENIORITY, "Senior")
            .on(PRE_ANALYSIS, "Field: Design. Skills: Figma")
            .on(INSIGHT, "report");
        let kb = KnowledgeBase::default();

        analyze_resume("{}", &llm, &kb).await.unwrap();

        assert!(llm.prompts()[2].contains(NO_CONTEXT));
    }

    #[tokio::test]
    async fn test_analyze_resume_stops_on_bad_seniority() {
        let llm = ScriptedLlm::new().on(SENIORITY, "Overlord").fallback("unused");
        let kb = KnowledgeBase::seeded();

        let err = analyze_resume("{}", &llm, &kb).await.unwrap_err();

        assert!(matches!(err, AppError::MalformedOutput(_)));
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_job_match_includes_job_description_and_context() {
        let llm = ScriptedLlm::new()
            .on(JOB_PRE, "Field: Software Development. Resume Skills: React, Django. Job Requirements: Kubernetes, AWS")
            .on(JOB_MATCH, "Overall Match Score: 70%");
        let kb = KnowledgeBase::seeded();

        let analysis = analyze_resume_for_job("{}", "Platform engineer, Kubernetes", &llm, &kb)
            .await
            .unwrap();

        assert_eq!(analysis, "Overall Match Score: 70%");
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Platform engineer, Kubernetes"));
        assert!(prompts[1].contains("Platform engineer, Kubernetes"));
        assert!(prompts[1].contains("Kubernetes for container orchestration"));
    }

    #[tokio::test]
    async fn test_job_match_model_failure_propagates() {
        let llm = ScriptedLlm::new().fail_on(JOB_PRE);
        let err = analyze_resume_for_job("{}", "jd", &llm, &KnowledgeBase::seeded())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_join_context_separates_documents() {
        let joined = join_context(&["a".to_string(), "b".to_string()]);
        assert_eq!(joined, "a\n---\nb");
        assert_eq!(join_context(&[]), NO_CONTEXT);
    }
}
