use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::{ports::EmbeddingService, DomainError, EmbeddingMatrix, Result};
use crate::infrastructure::dataset::DatasetStore;

/// Caller-visible cache state, surfaced by the readiness probe. `Building`
/// covers both "not started" and "provider sweep in flight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Building,
    Ready,
}

/// Persisted embedding matrix for the dataset, one vector per posting in row
/// order. Cold start embeds every posting description through the provider
/// (the dominant cost of the whole system) and persists the matrix; warm
/// start loads the file and never contacts the provider.
pub struct EmbeddingCache {
    path: PathBuf,
    provider: Arc<dyn EmbeddingService>,
    provider_timeout: Duration,
    matrix: OnceCell<Arc<EmbeddingMatrix>>,
}

impl EmbeddingCache {
    pub fn new(
        path: impl Into<PathBuf>,
        provider: Arc<dyn EmbeddingService>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            provider,
            provider_timeout,
            matrix: OnceCell::new(),
        }
    }

    pub fn status(&self) -> CacheStatus {
        if self.matrix.initialized() {
            CacheStatus::Ready
        } else {
            CacheStatus::Building
        }
    }

    /// Loads the persisted matrix, or builds and persists it on first ever
    /// use. Concurrent callers share a single in-flight build; nobody
    /// re-triggers the provider sweep or races a second write to the file.
    pub async fn ensure_loaded(&self, store: &DatasetStore) -> Result<Arc<EmbeddingMatrix>> {
        self.matrix
            .get_or_try_init(|| self.load_or_build(store))
            .await
            .cloned()
    }

    async fn load_or_build(&self, store: &DatasetStore) -> Result<Arc<EmbeddingMatrix>> {
        if self.path.exists() {
            let matrix = read_matrix(&self.path)?;
            if matrix.len() != store.len() {
                // Stale cache is fatal; truncating or padding would silently
                // misalign rows against postings.
                return Err(DomainError::dimension_mismatch(format!(
                    "persisted matrix has {} rows but the dataset has {}; \
delete {} to regenerate",
                    matrix.len(),
                    store.len(),
                    self.path.display()
                )));
            }
            info!(rows = matrix.len(), "embeddings loaded from cache");
            return Ok(Arc::new(matrix));
        }

        info!(rows = store.len(), "no embedding cache found, generating");
        let mut vectors = Vec::with_capacity(store.len());
        for posting in store.postings() {
            let embedding = tokio::time::timeout(
                self.provider_timeout,
                self.provider.embed(&posting.job_description),
            )
            .await
            .map_err(|_| {
                DomainError::timeout(format!("embedding for posting {} timed out", posting.row))
            })??;
            vectors.push(embedding);
        }

        let matrix = EmbeddingMatrix::from_vectors(vectors)?;
        write_matrix(&self.path, &matrix)?;
        info!(
            rows = matrix.len(),
            path = %self.path.display(),
            "embeddings generated and persisted"
        );
        Ok(Arc::new(matrix))
    }
}

fn read_matrix(path: &Path) -> Result<EmbeddingMatrix> {
    let file = std::fs::File::open(path)
        .map_err(|e| DomainError::internal(format!("cannot open {}: {e}", path.display())))?;
    bincode::deserialize_from(std::io::BufReader::new(file))
        .map_err(|e| DomainError::dimension_mismatch(format!("corrupt embedding cache: {e}")))
}

fn write_matrix(path: &Path, matrix: &EmbeddingMatrix) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| DomainError::internal(format!("cannot create {}: {e}", parent.display())))?;
    }
    let file = std::fs::File::create(path)
        .map_err(|e| DomainError::internal(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = std::io::BufWriter::new(file);
    bincode::serialize_into(&mut writer, matrix)
        .map_err(|e| DomainError::internal(format!("cannot persist embeddings: {e}")))?;
    writer
        .flush()
        .map_err(|e| DomainError::internal(e.to_string()))
}
