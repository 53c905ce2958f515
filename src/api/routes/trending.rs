use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::domain::{TrendEntry, TrendField};

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub trending_jobs: Vec<TrendEntry>,
    pub trending_categories: Vec<TrendEntry>,
}

pub async fn trending_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Json<TrendingResponse> {
    let top_k = match params.top_k {
        // Negative values are treated as "nothing to show", not an error.
        Some(k) => k.max(0) as usize,
        None => state.config.retrieval.trend_top_k,
    };

    Json(TrendingResponse {
        trending_jobs: state.trends.trending_top_k(TrendField::Title, top_k),
        trending_categories: state.trends.trending_top_k(TrendField::Category, top_k),
    })
}
