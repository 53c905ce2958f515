use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps domain errors onto the HTTP surface. Client mistakes (blank query,
/// follow-up with nothing to follow up on) are 4xx; provider trouble is a
/// gateway problem; integrity failures are ours.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::Validation(_) | DomainError::NoContext(_) => StatusCode::BAD_REQUEST,
            DomainError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            DomainError::EmbeddingProvider(_) | DomainError::Generation(_) => {
                StatusCode::BAD_GATEWAY
            }
            DomainError::Dataset(_)
            | DomainError::DimensionMismatch(_)
            | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
