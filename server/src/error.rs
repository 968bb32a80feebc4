//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"message": "..."}`. Store errors keep
//! their own message; anything unexpected becomes a bare 500 and the cause
//! only goes to the log.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_store::StoreError;
use tracing::{debug, error};

use crate::Message;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not valid JSON.
    #[error("Failed to parse JSON")]
    MalformedJson(#[from] serde_json::Error),

    /// A path segment could not be decoded, e.g. invalid UTF-8 after
    /// percent-decoding.
    #[error("Invalid URL")]
    InvalidPath(#[from] PathRejection),

    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl ToString) -> Self {
        ApiError::Internal(detail.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::MalformedJson(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => error!(%detail, "request failed"),
            ApiError::InvalidPath(rejection) => debug!(%rejection, "path rejected"),
            _ => {}
        }
        let message = self.to_string();
        (self.status(), Json(Message { message: &message })).into_response()
    }
}
