use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::ResearchSettings;
use crate::research::client::{ResearchClient, ResearchError};
use crate::research::{Query, QueryResult};

/// How hard a single query is tried before it is given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Always at least 1.
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    /// Fixed pause between attempts. Not applied after the last one.
    pub retry_delay: Duration,
}

impl From<ResearchSettings> for RetryPolicy {
    fn from(settings: ResearchSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            attempt_timeout: settings.attempt_timeout,
            retry_delay: settings.retry_delay,
        }
    }
}

/// Runs one query against the research backend with timeout and retry.
///
/// `execute` never returns an error: exhausted attempts become `QueryResult::Failed`.
#[derive(Clone)]
pub struct QueryExecutor {
    client: Arc<dyn ResearchClient>,
    policy: RetryPolicy,
}

impl QueryExecutor {
    pub fn new(client: Arc<dyn ResearchClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn execute(&self, query: &Query) -> QueryResult {
        let max_attempts = self.policy.max_attempts.max(1);
        info!(
            "Submitting query {}: '{}'",
            query.index,
            preview(&query.text)
        );

        let mut last_error = None;
        for attempt in 1..=max_attempts {
            match self.attempt(&query.text).await {
                Ok(answer) => {
                    info!("Query {} succeeded on attempt {}", query.index, attempt);
                    return QueryResult::Answered(answer);
                }
                Err(e) => {
                    warn!(
                        "Query {} failed (attempt {}/{}): {}",
                        query.index, attempt, max_attempts, e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }

        let diagnostic = match last_error {
            Some(e) => format!("gave up after {max_attempts} attempt(s): {e}"),
            None => format!("gave up after {max_attempts} attempt(s)"),
        };
        QueryResult::Failed(diagnostic)
    }

    async fn attempt(&self, text: &str) -> Result<String, ResearchError> {
        match tokio::time::timeout(self.policy.attempt_timeout, self.client.search(text)).await {
            Ok(result) => result,
            Err(_) => Err(ResearchError::Timeout(self.policy.attempt_timeout)),
        }
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 60;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
