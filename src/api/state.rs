use std::sync::Arc;

use crate::application::{ConversationService, SessionRegistry, TrendService};
use crate::infrastructure::{Config, EmbeddingCache};

#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<ConversationService>,
    pub trends: Arc<TrendService>,
    pub sessions: SessionRegistry,
    pub cache: Arc<EmbeddingCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        conversation: Arc<ConversationService>,
        trends: Arc<TrendService>,
        cache: Arc<EmbeddingCache>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            conversation,
            trends,
            sessions: SessionRegistry::new(),
            cache,
            config,
        }
    }
}
