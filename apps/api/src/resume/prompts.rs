/// Resume structuring prompt. Replace `{resume_text}` before sending.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Extract the information from the resume text below into a structured JSON object.

Return a JSON object with EXACTLY these keys:
{
  "personal_info": {"name": "", "email": "", "phone": "", "location": "", "links": []},
  "summary": "",
  "skills": {"languages": [], "frameworks": [], "tools": []},
  "work_experience": [
    {"title": "", "company": "", "start_date": "", "end_date": "", "highlights": []}
  ],
  "education": [
    {"degree": "", "institution": "", "graduation_date": ""}
  ],
  "projects": [
    {"name": "", "description": "", "technologies": []}
  ]
}

Rules:
- "work_experience", "education" and "projects" are lists of objects.
- If a section is not present in the resume, use an empty list or an empty string.
- Categorise skills where possible (e.g. "languages", "frameworks", "tools").
- Copy facts verbatim. Do not infer dates or employers that are not in the text.

Resume text:
---
{resume_text}
---"#;
