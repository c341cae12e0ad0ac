pub mod generators;
pub mod handlers;
pub mod orchestrator;
pub mod profiler;
pub mod prompts;
pub mod rag;
pub mod seniority;
pub mod upload;

pub use orchestrator::Orchestrator;
