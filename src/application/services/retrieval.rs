use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::instrument;

use crate::domain::{ports::EmbeddingService, DomainError, Result, RetrievedPosting};
use crate::infrastructure::{DatasetStore, EmbeddingCache, FlatIndex};

/// Answers "top-k postings relevant to text Q" by embedding the query and
/// searching the exact index. The query embedding is a single uncached
/// provider call; query text is not assumed to repeat.
pub struct RetrievalService {
    store: Arc<DatasetStore>,
    cache: Arc<EmbeddingCache>,
    embedding: Arc<dyn EmbeddingService>,
    index: OnceCell<Arc<FlatIndex>>,
    default_top_k: usize,
    provider_timeout: Duration,
}

impl RetrievalService {
    pub fn new(
        store: Arc<DatasetStore>,
        cache: Arc<EmbeddingCache>,
        embedding: Arc<dyn EmbeddingService>,
        default_top_k: usize,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            embedding,
            index: OnceCell::new(),
            default_top_k,
            provider_timeout,
        }
    }

    /// Builds the index ahead of the first query. Useful at startup so the
    /// cold-start provider sweep doesn't land on a user request.
    pub async fn warm(&self) -> Result<()> {
        self.index().await.map(|_| ())
    }

    async fn index(&self) -> Result<Arc<FlatIndex>> {
        self.index
            .get_or_try_init(|| async {
                let matrix = self.cache.ensure_loaded(&self.store).await?;
                Ok(Arc::new(FlatIndex::build(&matrix)?))
            })
            .await
            .cloned()
    }

    #[instrument(skip(self))]
    pub async fn query(&self, text: &str) -> Result<Vec<RetrievedPosting>> {
        self.query_top_k(text, self.default_top_k).await
    }

    #[instrument(skip(self))]
    pub async fn query_top_k(&self, text: &str, top_k: usize) -> Result<Vec<RetrievedPosting>> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("query text is empty"));
        }

        let index = self.index().await?;
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding =
            tokio::time::timeout(self.provider_timeout, self.embedding.embed(text))
                .await
                .map_err(|_| DomainError::timeout("query embedding timed out"))??;

        let hits = index.search(&query_embedding, top_k)?;
        hits.into_iter()
            .map(|(row, distance)| {
                self.store
                    .get(row)
                    .cloned()
                    .map(|posting| RetrievedPosting::new(posting, distance))
                    .ok_or_else(|| {
                        DomainError::internal(format!("index row {row} missing from dataset"))
                    })
            })
            .collect()
    }
}
