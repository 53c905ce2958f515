use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{DomainError, RetrievedPosting, TrendEntry};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub session_id: Uuid,
    pub response_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved_jobs: Option<Vec<RetrievedPosting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<TrendEntry>>,
}

pub async fn query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(DomainError::validation("query is missing").into());
    }

    let (session_id, session) = state.sessions.get_or_create(request.session_id).await;
    let mut session = session.lock().await;
    let outcome = state
        .conversation
        .handle(&mut session, &request.query)
        .await?;

    Ok(Json(QueryResponse {
        session_id,
        response_message: outcome.response_message,
        retrieved_jobs: outcome.retrieved_jobs,
        trending: outcome.trending,
    }))
}
