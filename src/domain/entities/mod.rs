mod conversation;
mod embedding;
mod posting;
mod retrieval;
mod trend;

pub use conversation::{ConversationTurn, GenerationPayload, Session};
pub use embedding::{Embedding, EmbeddingMatrix};
pub use posting::Posting;
pub use retrieval::RetrievedPosting;
pub use trend::{TrendEntry, TrendField};
