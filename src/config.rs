use crate::domain::error::DomainError;
use crate::infrastructure::azure::search_index::DEFAULT_API_VERSION;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_INDEX_NAME: &str = "it-ticket-solutions-index";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Gemini,
    OpenAi,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::Gemini => write!(f, "gemini"),
            EmbeddingBackend::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(EmbeddingBackend::Gemini),
            "openai" => Ok(EmbeddingBackend::OpenAi),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
    pub api_version: String,
}

#[derive(Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Everything the pipeline needs to reach its two external services.
/// Built once at startup and handed to constructors.
#[derive(Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub embedding: EmbeddingConfig,
    pub request_timeout: Duration,
    pub min_score: Option<f64>,
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.search.endpoint)
            .field("index_name", &self.search.index_name)
            .field("api_version", &self.search.api_version)
            .field("embedding_backend", &self.embedding.backend)
            .field("embedding_model", &self.embedding.model)
            .field("request_timeout", &self.request_timeout)
            .field("min_score", &self.min_score)
            .finish()
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| DomainError::Config(format!("{key} is not set")))
        };

        let backend: EmbeddingBackend = get("TICKETKB_EMBEDDING_PROVIDER")
            .unwrap_or_else(|| "gemini".into())
            .parse()
            .map_err(DomainError::Config)?;

        let fallback_key = match backend {
            EmbeddingBackend::Gemini => "GEMINI_API_KEY",
            EmbeddingBackend::OpenAi => "OPENAI_API_KEY",
        };
        let embedding_key = match get("TICKETKB_EMBEDDING_API_KEY") {
            Some(key) => key,
            None => require(fallback_key)?,
        };

        let timeout_secs = match get("TICKETKB_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|e| {
                DomainError::Config(format!("TICKETKB_REQUEST_TIMEOUT_SECS={v}: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(DomainError::Config(
                "TICKETKB_REQUEST_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        let min_score = get("TICKETKB_MIN_SCORE")
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|e| DomainError::Config(format!("TICKETKB_MIN_SCORE={v}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            search: SearchConfig {
                endpoint: require("AZURE_SEARCH_ENDPOINT")?,
                api_key: require("AZURE_SEARCH_KEY")?,
                index_name: get("AZURE_SEARCH_INDEX_NAME")
                    .unwrap_or_else(|| DEFAULT_INDEX_NAME.into()),
                api_version: get("AZURE_SEARCH_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            },
            embedding: EmbeddingConfig {
                backend,
                api_key: embedding_key,
                model: get("TICKETKB_EMBEDDING_MODEL"),
                base_url: get("TICKETKB_EMBEDDING_BASE_URL"),
            },
            request_timeout: Duration::from_secs(timeout_secs),
            min_score,
        })
    }
}
