use async_trait::async_trait;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// OpenAI-backed embedding provider. The reported dimension is what the
/// configured model produces; the cache and index trust it only after
/// checking the vectors themselves.
pub struct OpenAiEmbedding {
    client: openai::Client,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedding {
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self {
            client: openai::Client::from_env(),
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let mut embedded = EmbeddingsBuilder::new(self.client.embedding_model(&self.model))
            .document(text)
            .map_err(|e| DomainError::provider(e.to_string()))?
            .build()
            .await
            .map_err(|e| DomainError::provider(e.to_string()))?;

        if embedded.is_empty() {
            return Err(DomainError::provider("no embedding returned"));
        }
        let (_doc, embedding) = embedded.swap_remove(0);
        let values: Vec<f32> = embedding.first().vec.into_iter().map(|v| v as f32).collect();
        Ok(Embedding::new(values))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
