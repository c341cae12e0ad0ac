use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_PERPLEXICA_URL: &str = "http://localhost:3000/api/search";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub perplexica: PerplexicaSettings,
    pub research: ResearchSettings,
    /// Optional JSON file of extra documents upserted into the knowledge base at startup.
    pub knowledge_base_path: Option<PathBuf>,
}

/// Provider and model selection forwarded to the Perplexica search API.
#[derive(Debug, Clone)]
pub struct PerplexicaSettings {
    pub api_url: String,
    pub provider: String,
    pub chat_model: String,
    pub embedding_model: String,
}

/// Fan-out limits for the research stage.
#[derive(Debug, Clone, Copy)]
pub struct ResearchSettings {
    pub max_parallel: usize,
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub retry_delay: Duration,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            max_parallel: 5,
            max_attempts: 2,
            attempt_timeout: Duration::from_secs(90),
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let anthropic_api_key = var("ANTHROPIC_API_KEY")
            .with_context(|| "Required environment variable 'ANTHROPIC_API_KEY' is not set")?;

        let perplexica = PerplexicaSettings {
            api_url: var("PERPLEXICA_API_URL")
                .unwrap_or_else(|| DEFAULT_PERPLEXICA_URL.to_string()),
            provider: var("PERPLEXICA_PROVIDER").unwrap_or_else(|| "openai".to_string()),
            chat_model: var("PERPLEXICA_CHAT_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            embedding_model: var("PERPLEXICA_EMBEDDING_MODEL")
                .unwrap_or_else(|| "text-embedding-3-small".to_string()),
        };

        let defaults = ResearchSettings::default();
        let research = ResearchSettings {
            max_parallel: parse_or(
                "RESEARCH_MAX_PARALLEL",
                var("RESEARCH_MAX_PARALLEL"),
                defaults.max_parallel,
            )?,
            max_attempts: parse_or(
                "RESEARCH_MAX_ATTEMPTS",
                var("RESEARCH_MAX_ATTEMPTS"),
                defaults.max_attempts,
            )?,
            attempt_timeout: Duration::from_secs(parse_or(
                "RESEARCH_TIMEOUT_SECS",
                var("RESEARCH_TIMEOUT_SECS"),
                defaults.attempt_timeout.as_secs(),
            )?),
            retry_delay: Duration::from_secs(parse_or(
                "RESEARCH_RETRY_DELAY_SECS",
                var("RESEARCH_RETRY_DELAY_SECS"),
                defaults.retry_delay.as_secs(),
            )?),
        };

        if research.max_parallel == 0 {
            bail!("RESEARCH_MAX_PARALLEL must be at least 1");
        }
        if research.max_attempts == 0 {
            bail!("RESEARCH_MAX_ATTEMPTS must be at least 1");
        }
        if research.attempt_timeout.is_zero() {
            bail!("RESEARCH_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            anthropic_api_key,
            port: parse_or("PORT", var("PORT"), 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                var("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            perplexica,
            research,
            knowledge_base_path: var("KNOWLEDGE_BASE_PATH").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
