pub mod config;
pub mod dataset;
pub mod embedding;
pub mod generation;
pub mod index;

pub use config::Config;
pub use dataset::DatasetStore;
pub use embedding::{CacheStatus, EmbeddingCache, OpenAiEmbedding};
pub use generation::{OpenAiGeneration, ResponseGenerator};
pub use index::FlatIndex;
