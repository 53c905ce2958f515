//! Application layer - Use cases and orchestration.
//!
//! Services here orchestrate the dataset, embedding cache, and vector index
//! against the external provider boundaries (embedding, text generation),
//! which are reached only through domain ports.

pub mod services;

pub use services::{
    classify, ConversationService, QueryKind, RetrievalService, SessionRegistry, TrendService,
    TurnOutcome,
};
