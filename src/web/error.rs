use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything the JSON endpoints can reject with. Storage failures carry
/// the underlying message through to the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing_field: {0}")]
    MissingField(&'static str),
    #[error("participant_not_found: {0}")]
    ParticipantNotFound(i64),
    #[error("image_not_found: {0}")]
    ImageNotFound(i64),
    #[error("invalid_age")]
    InvalidAge,
    #[error("rating_out_of_range: {0}")]
    RatingOutOfRange(i64),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::InvalidAge | ApiError::RatingOutOfRange(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ParticipantNotFound(_) | ApiError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingField(_) => "missing_field",
            ApiError::ParticipantNotFound(_) => "participant_not_found",
            ApiError::ImageNotFound(_) => "image_not_found",
            ApiError::InvalidAge => "invalid_age",
            ApiError::RatingOutOfRange(_) => "rating_out_of_range",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Storage(e) => {
                tracing::error!("storage failure: {e}");
                json!({ "error": e.to_string() })
            }
            ApiError::MissingField(field) => {
                json!({ "error": self.kind(), "field": field })
            }
            _ => json!({ "error": self.kind() }),
        };
        (status, Json(body)).into_response()
    }
}
