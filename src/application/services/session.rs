use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::Session;

/// Uuid-keyed registry of conversation sessions. Each session sits behind its
/// own async mutex: one mutation in flight per session, so history ordering
/// cannot interleave, while distinct sessions proceed concurrently.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating it (or minting a fresh id) when
    /// absent.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, Arc<Mutex<Session>>) {
        if let Some(id) = id {
            if let Some(session) = self.sessions.read().await.get(&id) {
                return (id, session.clone());
            }
        }

        let id = id.unwrap_or_else(Uuid::new_v4);
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::with_id(id))))
            .clone();
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Clears the session's history and last retrieval. Returns false when
    /// the session is unknown.
    pub async fn reset(&self, id: Uuid) -> bool {
        match self.get(id).await {
            Some(session) => {
                session.lock().await.reset();
                true
            }
            None => false,
        }
    }
}
