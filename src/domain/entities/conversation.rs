use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{RetrievedPosting, TrendEntry};

/// One exchange: the user's raw text, the retrieval it produced (possibly
/// empty), and the generated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub query: String,
    pub retrieved: Vec<RetrievedPosting>,
    pub response_message: String,
    pub created_at: DateTime<Utc>,
}

/// Per-caller conversation state. `last_retrieval` is overwritten by every
/// fresh search, including searches that came back empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub history: Vec<ConversationTurn>,
    pub last_retrieval: Option<Vec<RetrievedPosting>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            history: Vec::new(),
            last_retrieval: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_turn(
        &mut self,
        query: impl Into<String>,
        retrieved: Vec<RetrievedPosting>,
        response_message: impl Into<String>,
    ) {
        self.history.push(ConversationTurn {
            query: query.into(),
            retrieved,
            response_message: response_message.into(),
            created_at: Utc::now(),
        });
        self.updated_at = Utc::now();
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_retrieval = None;
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured data handed to the text-generation collaborator. The core
/// decides what goes in here; the collaborator decides how the prose reads.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPayload {
    Matches {
        query: String,
        results: Vec<RetrievedPosting>,
    },
    Trends {
        query: String,
        entries: Vec<TrendEntry>,
    },
    FollowUp {
        query: String,
        prior_titles: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_turn_preserves_order() {
        let mut session = Session::new();
        session.record_turn("first", Vec::new(), "a");
        session.record_turn("second", Vec::new(), "b");

        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].query, "first");
        assert_eq!(session.history[1].query, "second");
    }

    #[test]
    fn test_reset_clears_history_and_retrieval() {
        let mut session = Session::new();
        session.record_turn("q", Vec::new(), "r");
        session.last_retrieval = Some(Vec::new());

        session.reset();

        assert!(session.history.is_empty());
        assert!(session.last_retrieval.is_none());
    }
}
