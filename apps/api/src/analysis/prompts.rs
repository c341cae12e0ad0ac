// All LLM prompt templates for the analysis agents.
// Placeholders are `{name}` and are filled in one pass with `fill_template` before sending.

/// Seniority classification. Replace `{resume_json}`.
pub const SENIORITY_PROMPT_TEMPLATE: &str = r#"Analyze the "work_experience" and "education" sections of the structured resume below.
Based on the total years of experience, job titles, and graduation dates, classify the candidate's seniority level.

- If there is no work experience and the candidate is still in university, classify as 'Intern'.
- If there is 0-2 years of experience and a recent graduation date, classify as 'Entry-Level'.
- If there are 2-7 years of relevant experience, classify as 'Mid-Level'.
- If there are 7+ years of experience with progressive titles, classify as 'Senior'.

Return ONLY ONE of the following keywords: Intern, Entry-Level, Mid-Level, Senior.

Structured resume (JSON):
{resume_json}"#;

/// Profiler agent: resume → search queries. Replace `{resume_json}`.
pub const PROFILER_PROMPT_TEMPLATE: &str = r#"You are a Resume Profiler. Analyze the structured resume below and produce 5-7 highly specific web search queries.
The queries must find the latest job market trends, in-demand skills, and typical job responsibilities relevant to this specific candidate.

Include queries for:
1. Overall job descriptions for their likely role.
2. Specific technical skill trends related to their primary technologies.
3. Salary expectations or career path information.

Return a JSON object with this EXACT schema:
{"search_queries": ["query one", "query two"]}

Structured resume (JSON):
{resume_json}"#;

/// Final report agent. Replace `{seniority}`, `{market_brief}` and `{resume_json}`.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"You are the Chief Career Analyst. Combine the candidate's resume with the live market research below into one actionable career report.
The candidate has been classified as: {seniority}. Calibrate every recommendation to that level.

Live market research (one section per search query; sections starting with "Error:" could not be retrieved and must be ignored):
{market_brief}
---
Structured resume (JSON):
{resume_json}
---
Write the report in Markdown using EXACTLY these sections:
Market Snapshot, Key Strengths, Skill Gaps vs. Market Demand, ATS Optimization Tips, Suitable Job Roles, Upskilling Plan, Career Growth Roadmap, Final Summary."#;

/// Pre-analysis used to build the knowledge-base lookup. Replace `{resume_json}`.
pub const PRE_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Read the resume below and identify the candidate's primary field/domain and their top 5-7 key skills.
Your output must be a single, concise line formatted like this: "Field: [Identified Field]. Skills: [Skill1, Skill2, Skill3]".

Resume:
{resume_json}"#;

/// Knowledge-base insight report. Replace `{seniority}`, `{context}` and `{resume_json}`.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"You are an AI Resume Insight Assistant. Conduct a detailed analysis of the candidate's resume, provided as structured JSON, and generate actionable feedback.
You MUST use the "Market & ATS Context" provided below. The candidate's seniority level is: {seniority}.

Market & ATS Context:
{context}
---
Candidate's structured resume (JSON):
{resume_json}
---
Generate a professional report in Markdown using EXACTLY these sections:
Identified Field, Key Skills, Skill Gaps / Missing Keywords, ATS Optimization Tips, Suitable Job Roles, Upskilling Recommendations, Career Growth Roadmap, Final Insight Summary."#;

/// Job-match pre-analysis. Replace `{resume_json}` and `{job_description}`.
pub const JOB_MATCH_PRE_ANALYSIS_TEMPLATE: &str = r#"Compare the resume and the job description below. Extract the primary field, 5-7 key skills from the resume, and 5-7 key requirements from the job description.
Format your output as a single, concise line:
"Field: [Identified Field]. Resume Skills: [Skill1, Skill2]. Job Requirements: [Req1, Req2]".

Resume:
{resume_json}

Job description:
{job_description}"#;

/// Resume vs. job description gap analysis. Replace `{context}`, `{resume_json}` and `{job_description}`.
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"You are an expert Talent Acquisition Specialist. Perform a detailed gap analysis between the candidate's resume (structured JSON) and the job description.
You MUST use the "Market Context" to inform your analysis.

Market Context:
{context}
---
Candidate's structured resume (JSON):
{resume_json}
---
Job description:
{job_description}
---
Provide a structured analysis in Markdown using EXACTLY these sections:
Overall Match Score, Key Strengths & Matches, Critical Gaps & Mismatches, Resume Tailoring Suggestions."#;

/// Cover letter. Replace `{resume_text}`, `{job_description}`, `{company}` and `{job_title}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Your task is to write a compelling and professional cover letter based on the resume and job description below.

Candidate's resume:
{resume_text}
---
Job description for the role of {job_title} at {company}:
{job_description}
---
Instructions:
1. Write a 3-4 paragraph cover letter.
2. In the first paragraph, state the position being applied for ({job_title}) and express enthusiasm for {company}.
3. In the body paragraphs, highlight 2-3 key skills and experiences from the resume that DIRECTLY align with the most important requirements in the job description. Explain how they make the candidate a great fit.
4. In the final paragraph, reiterate interest and include a call to action.
5. Maintain a professional and confident tone."#;

/// Resume summary. Replace `{resume_text}` and `{job_description}`.
pub const RESUME_SUMMARY_PROMPT_TEMPLATE: &str = r#"You specialise in ATS optimization. Write a powerful, 3-4 sentence "Professional Summary" for the resume below, tailored specifically to the job description.

Candidate's resume:
{resume_text}
---
Target job description:
{job_description}
---
Instructions:
1. Distill the candidate's most relevant experiences from their resume.
2. Integrate the most important keywords and skills from the job description.
3. Frame the candidate's experience so it directly addresses the needs in the job description.
4. The output must be a single paragraph."#;

/// Stand-in for an empty knowledge-base lookup.
pub const NO_CONTEXT: &str = "No matching market context is available.";
