mod conversation;
mod retrieval;
mod session;
mod trends;

pub use conversation::{classify, ConversationService, QueryKind, TurnOutcome};
pub use retrieval::RetrievalService;
pub use session::SessionRegistry;
pub use trends::TrendService;
