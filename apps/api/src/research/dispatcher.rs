use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, Instrument, Span};

use crate::research::executor::QueryExecutor;
use crate::research::{Brief, BriefEntry, Query, QueryResult};

/// Fans a list of queries out over at most `max_parallel` concurrent executions and
/// joins every result back in submission order.
#[derive(Clone)]
pub struct ResearchDispatcher {
    executor: QueryExecutor,
    max_parallel: usize,
}

impl ResearchDispatcher {
    pub fn new(executor: QueryExecutor, max_parallel: usize) -> Self {
        Self {
            executor,
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Blocks until every query has an answer or a failure marker. Never fails as a whole.
    pub async fn dispatch(&self, queries: &[String]) -> Brief {
        if queries.is_empty() {
            return Brief::default();
        }

        info!(
            "Dispatching {} research queries (max {} in flight)",
            queries.len(),
            self.max_parallel
        );

        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let mut join_set = JoinSet::new();

        for (index, text) in queries.iter().enumerate() {
            // The semaphore is never closed, so acquisition cannot fail.
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let executor = self.executor.clone();
            let query = Query {
                index,
                text: text.clone(),
            };

            join_set.spawn(
                async move {
                    let _permit: OwnedSemaphorePermit = permit;
                    let result = executor.execute(&query).await;
                    (query.index, result)
                }
                .instrument(Span::current()),
            );
        }

        // Only this loop writes the slots; each index is written at most once.
        let mut slots: Vec<Option<QueryResult>> = vec![None; queries.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => error!("Research worker aborted: {e}"),
            }
        }

        let entries: Vec<BriefEntry> = queries
            .iter()
            .zip(slots)
            .map(|(text, slot)| BriefEntry {
                query: text.clone(),
                result: slot.unwrap_or_else(|| {
                    QueryResult::Failed("research worker aborted before reporting".to_string())
                }),
            })
            .collect();

        let brief = Brief::from_entries(entries);
        info!(
            "All research queries processed: {} answered, {} failed",
            brief.len() - brief.failed_count(),
            brief.failed_count()
        );
        brief
    }
}
