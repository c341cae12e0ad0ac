//! Market research fan-out.
//!
//! Flow: ResearchDispatcher → QueryExecutor × N (bounded by a semaphore) → Brief.
//! A query that exhausts its attempts degrades into a failure marker inside the
//! Brief; it never aborts its siblings or the dispatch call.

use std::fmt;

pub mod client;
pub mod dispatcher;
pub mod executor;

pub use client::{PerplexicaClient, ResearchClient, ResearchError};
pub use dispatcher::ResearchDispatcher;
pub use executor::{QueryExecutor, RetryPolicy};

/// One search query and its position in the submitted list.
/// Identity is the index: duplicate texts are still distinct queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub index: usize,
    pub text: String,
}

/// Outcome of one query. Exactly one is produced per query, however many attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Answered(String),
    /// Terminal failure marker carrying a human-readable diagnostic.
    Failed(String),
}

impl QueryResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, QueryResult::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefEntry {
    pub query: String,
    pub result: QueryResult,
}

/// Query results joined back into submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Brief {
    entries: Vec<BriefEntry>,
}

impl Brief {
    pub(crate) fn from_entries(entries: Vec<BriefEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BriefEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_failed()).count()
    }
}

impl fmt::Display for Brief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "## Query: {}\n\n", entry.query)?;
            match &entry.result {
                QueryResult::Answered(answer) => write!(f, "{answer}")?,
                QueryResult::Failed(diagnostic) => {
                    write!(f, "Error: Could not retrieve information ({diagnostic}).")?
                }
            }
            write!(f, "\n\n---\n\n")?;
        }
        Ok(())
    }
}
