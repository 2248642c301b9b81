//! HTTP error type for the search API.
//!
//! Every variant renders as `{"error": {"code": "...", "message": "..."}}` with a
//! stable machine-readable code.

use crate::utils::error::SearchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid query parameters (400, `bad_request`).
    BadRequest(String),
    /// Client exceeded its rate limit window (429, `rate_limit_exceeded`).
    TooManyRequests(String),
    /// Anything the search core could not recover from (500, `internal_server_error`).
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::TooManyRequests(_) => "rate_limit_exceeded",
            ApiError::Internal(_) => "internal_server_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::TooManyRequests(msg) | ApiError::Internal(msg) => {
                msg
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::ValidationError { message, .. } => ApiError::BadRequest(message),
            other => {
                tracing::error!("❌ Search failed: {}", other);
                ApiError::Internal("An internal server error occurred".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = axum::Json(json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_become_bad_request() {
        let error: ApiError = SearchError::validation("q", "Search keyword (q) is required").into();

        assert_eq!(error.code(), "bad_request");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Search keyword (q) is required");
    }

    #[test]
    fn test_corpus_errors_are_hidden() {
        let error: ApiError = SearchError::CorpusError {
            message: "cannot list /srv/public".to_string(),
        }
        .into();

        assert_eq!(error.code(), "internal_server_error");
        assert!(!error.message().contains("/srv/public"));
    }
}
