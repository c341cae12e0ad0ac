//! Scripted stand-ins for the language model and the research backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{LanguageModel, LlmError};
use crate::research::{ResearchClient, ResearchError};

/// Answers each prompt with the reply of the first rule whose marker the prompt contains.
#[derive(Default)]
pub struct ScriptedLlm {
    rules: Vec<(String, Option<String>)>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, marker: &str, reply: &str) -> Self {
        self.rules.push((marker.to_string(), Some(reply.to_string())));
        self
    }

    /// Prompts containing `marker` fail with an API error.
    pub fn fail_on(mut self, marker: &str) -> Self {
        self.rules.push((marker.to_string(), None));
        self
    }

    pub fn fallback(mut self, reply: &str) -> Self {
        self.fallback = Some(reply.to_string());
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, marker: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(marker)).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self
            .rules
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone());

        reply.ok_or(LlmError::Api {
            status: 500,
            message: "scripted failure".to_string(),
        })
    }
}

/// One scripted reaction of the research backend.
#[derive(Debug, Clone)]
pub enum Step {
    Answer(String),
    Fail,
    /// Sleeps for the duration, then answers.
    Delay(Duration, String),
    Panic,
}

/// Research backend keyed by exact query text. The last step of a script repeats.
#[derive(Default)]
pub struct ScriptedResearch {
    scripts: HashMap<String, Vec<Step>>,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedResearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn always(self, query: &str, step: Step) -> Self {
        self.script(query, vec![step])
    }

    pub fn script(mut self, query: &str, steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        self.scripts.insert(query.to_string(), steps);
        self
    }

    pub fn calls(&self, query: &str) -> usize {
        self.calls.lock().unwrap().get(query).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResearchClient for ScriptedResearch {
    async fn search(&self, query: &str) -> Result<String, ResearchError> {
        let step = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(query.to_string()).or_insert(0);
            let index = *count;
            *count += 1;
            self.scripts
                .get(query)
                .map(|steps| steps[index.min(steps.len() - 1)].clone())
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        match step {
            Some(Step::Answer(answer)) => Ok(answer),
            Some(Step::Delay(duration, answer)) => {
                tokio::time::sleep(duration).await;
                Ok(answer)
            }
            Some(Step::Fail) => Err(ResearchError::Status {
                status: 503,
                body: "scripted failure".to_string(),
            }),
            Some(Step::Panic) => panic!("scripted panic for '{query}'"),
            None => Err(ResearchError::Status {
                status: 404,
                body: format!("no script for '{query}'"),
            }),
        }
    }
}
