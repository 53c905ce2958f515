mod embedding;
mod generation;

pub use embedding::EmbeddingService;
pub use generation::TextGeneration;
