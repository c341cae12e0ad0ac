// Shared system prompts.
// Each stage that needs LLM calls defines its own prompt templates alongside it.
// This file contains the cross-cutting system fragments.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text career writing (reports, letters, summaries).
pub const CAREER_WRITER_SYSTEM: &str = "You are an experienced career coach, \
    technical recruiter and resume writer. \
    Base every statement on the material you are given. \
    Do NOT invent employers, titles, dates or credentials.";

/// System prompt for single-keyword classification answers.
pub const CLASSIFIER_SYSTEM: &str = "You are a strict classifier. \
    Answer with exactly one of the allowed keywords and nothing else.";

/// Fills `{name}` placeholders in one pass. Substituted values are never re-scanned,
/// so a value containing `{other}` is inserted verbatim. Unknown placeholders are kept.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
