// Resume intake: PDF bytes → cleaned text → structured resume.
// The structuring call goes through the LanguageModel trait like every other agent.

pub mod intake;
pub mod prompts;
pub mod structure;

pub use intake::{extract_pdf_text, preprocess_text};
pub use structure::{structure_resume, StructuredResume};
