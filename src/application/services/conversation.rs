use std::sync::Arc;

use tracing::instrument;

use crate::application::services::{RetrievalService, TrendService};
use crate::domain::{
    DomainError, GenerationPayload, Result, RetrievedPosting, Session, TrendEntry, TrendField,
};
use crate::infrastructure::ResponseGenerator;

const FOLLOW_UP_MARKER: &str = "tell me more";
const TREND_MARKER: &str = "trending";
const CATEGORY_MARKER: &str = "category";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    FollowUp,
    Trend(TrendField),
    Search,
}

/// Classifies a raw query by its marker phrases, case-insensitively. Pure,
/// so the branch decision is testable without providers.
pub fn classify(query: &str) -> QueryKind {
    let lowered = query.to_lowercase();
    if lowered.contains(FOLLOW_UP_MARKER) {
        QueryKind::FollowUp
    } else if lowered.contains(TREND_MARKER) {
        if lowered.contains(CATEGORY_MARKER) {
            QueryKind::Trend(TrendField::Category)
        } else {
            QueryKind::Trend(TrendField::Title)
        }
    } else {
        QueryKind::Search
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub retrieved_jobs: Option<Vec<RetrievedPosting>>,
    pub trending: Option<Vec<TrendEntry>>,
    pub response_message: String,
}

/// The conversational state machine. Operates purely on the session it is
/// handed: a follow-up reuses the session's last retrieval, a trend query
/// leaves it untouched, and a fresh search overwrites it even when the
/// result is empty, so "last retrieval" always means the most recent search.
pub struct ConversationService {
    retrieval: Arc<RetrievalService>,
    trends: Arc<TrendService>,
    generator: Arc<ResponseGenerator>,
}

impl ConversationService {
    pub fn new(
        retrieval: Arc<RetrievalService>,
        trends: Arc<TrendService>,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        Self {
            retrieval,
            trends,
            generator,
        }
    }

    #[instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn handle(&self, session: &mut Session, query: &str) -> Result<TurnOutcome> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query text is empty"));
        }

        let outcome = match classify(query) {
            QueryKind::FollowUp => self.follow_up(session, query).await?,
            QueryKind::Trend(field) => self.trend(query, field).await?,
            QueryKind::Search => self.search(session, query).await?,
        };

        let retrieved = outcome.retrieved_jobs.clone().unwrap_or_default();
        session.record_turn(query, retrieved, outcome.response_message.clone());
        Ok(outcome)
    }

    async fn follow_up(&self, session: &Session, query: &str) -> Result<TurnOutcome> {
        let last = session
            .last_retrieval
            .as_ref()
            .filter(|results| !results.is_empty())
            .ok_or_else(|| {
                DomainError::no_context("nothing to follow up on; run a search first")
            })?;

        let payload = GenerationPayload::FollowUp {
            query: query.to_string(),
            prior_titles: last
                .iter()
                .map(|r| r.posting.business_title.clone())
                .collect(),
        };
        let response_message = self.generator.respond(&payload).await?;

        Ok(TurnOutcome {
            retrieved_jobs: None,
            trending: None,
            response_message,
        })
    }

    async fn trend(&self, query: &str, field: TrendField) -> Result<TurnOutcome> {
        let entries = self.trends.trending(field);
        let payload = GenerationPayload::Trends {
            query: query.to_string(),
            entries: entries.clone(),
        };
        let response_message = self.generator.respond(&payload).await?;

        Ok(TurnOutcome {
            retrieved_jobs: None,
            trending: Some(entries),
            response_message,
        })
    }

    async fn search(&self, session: &mut Session, query: &str) -> Result<TurnOutcome> {
        let results = self.retrieval.query(query).await?;
        session.last_retrieval = Some(results.clone());

        let payload = GenerationPayload::Matches {
            query: query.to_string(),
            results: results.clone(),
        };
        let response_message = self.generator.respond(&payload).await?;

        Ok(TurnOutcome {
            retrieved_jobs: Some(results),
            trending: None,
            response_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::domain::ports::{EmbeddingService, TextGeneration};
    use crate::domain::{Embedding, Posting};
    use crate::infrastructure::{DatasetStore, EmbeddingCache};

    struct FakeEmbedding {
        calls: AtomicUsize,
    }

    impl FakeEmbedding {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingService for FakeEmbedding {
        async fn embed(&self, text: &str) -> Result<Embedding> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let vector = if text.contains("engineer") {
                vec![1.0, 0.0]
            } else if text.contains("analyst") {
                vec![0.0, 1.0]
            } else {
                vec![0.5, 0.5]
            };
            Ok(Embedding::new(vector))
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct RecordingLlm {
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingLlm {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGeneration for RecordingLlm {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("generated".to_string())
        }
    }

    struct Fixture {
        service: ConversationService,
        embedding: Arc<FakeEmbedding>,
        llm: Arc<RecordingLlm>,
        _dir: tempfile::TempDir,
    }

    fn fixture(postings: Vec<Posting>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DatasetStore::from_postings(postings));
        let embedding = Arc::new(FakeEmbedding::new());
        let cache = Arc::new(EmbeddingCache::new(
            dir.path().join("embeddings.bin"),
            embedding.clone(),
            Duration::from_secs(5),
        ));
        let retrieval = Arc::new(RetrievalService::new(
            store.clone(),
            cache,
            embedding.clone(),
            3,
            Duration::from_secs(5),
        ));
        let trends = Arc::new(TrendService::new(store, 5));
        let llm = Arc::new(RecordingLlm::new());
        let generator = Arc::new(ResponseGenerator::new(llm.clone(), Duration::from_secs(5)));

        Fixture {
            service: ConversationService::new(retrieval, trends, generator),
            embedding,
            llm,
            _dir: dir,
        }
    }

    fn postings() -> Vec<Posting> {
        vec![
            Posting::new(0, "Software Engineer", "senior software engineer role")
                .with_category("Technology"),
            Posting::new(1, "Data Analyst", "reporting data analyst role")
                .with_category("Analytics"),
        ]
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("Tell me MORE about the first"), QueryKind::FollowUp);
        assert_eq!(classify("what's trending?"), QueryKind::Trend(TrendField::Title));
        assert_eq!(
            classify("trending categories please"),
            QueryKind::Trend(TrendField::Category)
        );
        assert_eq!(classify("software engineer jobs"), QueryKind::Search);
    }

    #[test]
    fn test_follow_up_marker_wins_over_trend_marker() {
        assert_eq!(classify("tell me more about trending"), QueryKind::FollowUp);
    }

    #[tokio::test]
    async fn test_fresh_search_records_turn_and_last_retrieval() {
        let f = fixture(postings());
        let mut session = Session::new();

        let outcome = f
            .service
            .handle(&mut session, "software engineer jobs")
            .await
            .unwrap();

        let retrieved = outcome.retrieved_jobs.unwrap();
        assert_eq!(retrieved[0].posting.business_title, "Software Engineer");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.last_retrieval.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_follow_up_reuses_prior_results_without_retrieval() {
        let f = fixture(postings());
        let mut session = Session::new();

        f.service
            .handle(&mut session, "software engineer jobs")
            .await
            .unwrap();
        let calls_after_search = f.embedding.calls.load(Ordering::SeqCst);

        let outcome = f
            .service
            .handle(&mut session, "tell me more about the first one")
            .await
            .unwrap();

        // No new embedding call: the follow-up branch never touches the
        // retrieval engine.
        assert_eq!(f.embedding.calls.load(Ordering::SeqCst), calls_after_search);
        assert!(outcome.retrieved_jobs.is_none());

        let prompts = f.llm.prompts.lock().unwrap();
        let follow_up_prompt = prompts.last().unwrap();
        assert!(follow_up_prompt.contains("Software Engineer"));
        assert!(follow_up_prompt.contains("Data Analyst"));
        assert_eq!(session.history.len(), 2);
    }

    #[tokio::test]
    async fn test_follow_up_without_context_signals_no_context() {
        let f = fixture(postings());
        let mut session = Session::new();

        let err = f
            .service
            .handle(&mut session, "tell me more")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoContext(_)));
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_after_reset_signals_no_context() {
        let f = fixture(postings());
        let mut session = Session::new();

        f.service
            .handle(&mut session, "software engineer jobs")
            .await
            .unwrap();
        session.reset();

        let err = f
            .service
            .handle(&mut session, "tell me more")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoContext(_)));
    }

    #[tokio::test]
    async fn test_trend_branch_leaves_last_retrieval_untouched() {
        let f = fixture(postings());
        let mut session = Session::new();

        f.service
            .handle(&mut session, "software engineer jobs")
            .await
            .unwrap();
        let before = session.last_retrieval.clone();

        let outcome = f
            .service
            .handle(&mut session, "what's trending?")
            .await
            .unwrap();

        assert_eq!(session.last_retrieval, before);
        let entries = outcome.trending.unwrap();
        assert!(entries
            .iter()
            .any(|e| e.label == "Software Engineer" && e.count == 1));
    }

    #[tokio::test]
    async fn test_trend_category_submode_counts_categories() {
        let f = fixture(postings());
        let mut session = Session::new();

        let outcome = f
            .service
            .handle(&mut session, "trending categories")
            .await
            .unwrap();

        let entries = outcome.trending.unwrap();
        assert!(entries.iter().any(|e| e.label == "Technology"));
    }

    #[tokio::test]
    async fn test_empty_search_overwrites_last_retrieval() {
        // Empty dataset: every fresh search comes back empty. A preloaded
        // last retrieval must still be overwritten, so the follow-up that
        // comes next gets the honest "no context" answer.
        let f = fixture(Vec::new());
        let mut session = Session::new();
        session.last_retrieval = Some(vec![RetrievedPosting::new(
            Posting::new(0, "Stale Job", "stale"),
            0.1,
        )]);

        let outcome = f
            .service
            .handle(&mut session, "administrative assistant jobs")
            .await
            .unwrap();

        assert_eq!(outcome.retrieved_jobs.unwrap().len(), 0);
        assert_eq!(session.last_retrieval.as_ref().unwrap().len(), 0);

        let err = f
            .service
            .handle(&mut session, "tell me more")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoContext(_)));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let f = fixture(postings());
        let mut session = Session::new();
        let err = f.service.handle(&mut session, "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
