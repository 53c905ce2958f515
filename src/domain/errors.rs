use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No conversation context: {0}")]
    NoContext(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Provider timeout: {0}")]
    ProviderTimeout(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn no_context(msg: impl Into<String>) -> Self {
        Self::NoContext(msg.into())
    }

    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::EmbeddingProvider(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::ProviderTimeout(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
