use crate::domain::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, DomainError>;
}
