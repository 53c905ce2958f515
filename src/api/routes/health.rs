use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::infrastructure::CacheStatus;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub embeddings: CacheStatus,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 503 until the embedding matrix has been loaded or built; before that the
/// first query would pay the cold-start provider sweep.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let embeddings = state.cache.status();
    let (code, status) = match embeddings {
        CacheStatus::Ready => (StatusCode::OK, "ready"),
        CacheStatus::Building => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
    };

    (code, Json(ReadinessResponse { status, embeddings }))
}
