use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::ConversationTurn;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub conversation_history: Vec<ConversationTurn>,
}

pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    match state.sessions.get(params.session_id).await {
        Some(session) => Ok(Json(HistoryResponse {
            session_id: params.session_id,
            conversation_history: session.lock().await.history.clone(),
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub session_id: Uuid,
    pub reset: bool,
}

pub async fn reset_handler(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, StatusCode> {
    if state.sessions.reset(request.session_id).await {
        Ok(Json(ResetResponse {
            session_id: request.session_id,
            reset: true,
        }))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
