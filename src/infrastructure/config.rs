use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    pub embeddings_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub trend_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            dataset: DatasetConfig {
                path: "data/NYC_Jobs_Cleaned.csv".to_string(),
                embeddings_path: "data/job_embeddings.bin".to_string(),
            },
            embedding: EmbeddingConfig {
                model: "text-embedding-ada-002".to_string(),
                dimension: 1536,
            },
            llm: LlmConfig {
                model: "gpt-4".to_string(),
                timeout_seconds: 30,
            },
            retrieval: RetrievalConfig {
                top_k: 3,
                trend_top_k: 5,
            },
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables where set. Call after
    /// `dotenvy::dotenv()` so a local `.env` participates.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                host: env_or("SERVER_HOST", defaults.server.host),
                port: env_or("SERVER_PORT", defaults.server.port),
            },
            dataset: DatasetConfig {
                path: env_or("DATASET_PATH", defaults.dataset.path),
                embeddings_path: env_or("EMBEDDINGS_PATH", defaults.dataset.embeddings_path),
            },
            embedding: EmbeddingConfig {
                model: env_or("EMBEDDING_MODEL", defaults.embedding.model),
                dimension: env_or("EMBEDDING_DIMENSION", defaults.embedding.dimension),
            },
            llm: LlmConfig {
                model: env_or("LLM_MODEL", defaults.llm.model),
                timeout_seconds: env_or("PROVIDER_TIMEOUT_SECONDS", defaults.llm.timeout_seconds),
            },
            retrieval: RetrievalConfig {
                top_k: env_or("RETRIEVAL_TOP_K", defaults.retrieval.top_k),
                trend_top_k: env_or("TREND_TOP_K", defaults.retrieval.trend_top_k),
            },
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
