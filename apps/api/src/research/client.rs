use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PerplexicaSettings;

const USER_AGENT: &str = concat!("resume-insight/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const NO_ANSWER: &str = "No answer found.";

const RESEARCH_SYSTEM_INSTRUCTIONS: &str = "You are an expert market research analyst. \
    Provide concise, factual information based on the web search results. \
    Focus on skills, job responsibilities, and industry trends.";

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid research configuration: {0}")]
    InvalidConfig(String),
}

/// A single request/response research backend.
#[async_trait]
pub trait ResearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, ResearchError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    focus_mode: &'a str,
    chat_model: ModelRef<'a>,
    embedding_model: ModelRef<'a>,
    system_instructions: &'a str,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ModelRef<'a> {
    provider: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: Option<String>,
}

/// Client for a self-hosted Perplexica search endpoint.
#[derive(Clone)]
pub struct PerplexicaClient {
    client: Client,
    settings: PerplexicaSettings,
}

impl PerplexicaClient {
    /// Validates provider/model settings up front so a bad deployment fails at startup.
    pub fn new(settings: PerplexicaSettings) -> Result<Self, ResearchError> {
        for (name, value) in [
            ("api_url", &settings.api_url),
            ("provider", &settings.provider),
            ("chat_model", &settings.chat_model),
            ("embedding_model", &settings.embedding_model),
        ] {
            if value.trim().is_empty() {
                return Err(ResearchError::InvalidConfig(format!(
                    "perplexica {name} cannot be empty"
                )));
            }
        }

        // Per-attempt timeouts are enforced by the executor.
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, settings })
    }

    fn request_body<'a>(&'a self, query: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            query,
            focus_mode: "all",
            chat_model: ModelRef {
                provider: &self.settings.provider,
                name: &self.settings.chat_model,
            },
            embedding_model: ModelRef {
                provider: &self.settings.provider,
                name: &self.settings.embedding_model,
            },
            system_instructions: RESEARCH_SYSTEM_INSTRUCTIONS,
            stream: false,
        }
    }
}

#[async_trait]
impl ResearchClient for PerplexicaClient {
    async fn search(&self, query: &str) -> Result<String, ResearchError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .json(&self.request_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchResponse = response.json().await?;
        Ok(payload.response.unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}
