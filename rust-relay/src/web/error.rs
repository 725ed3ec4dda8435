//! Relay error taxonomy.
//!
//! Internally a failure is either a decode, transport, or queue problem.
//! Externally all of them render the same way: HTTP 500 with
//! `{"error": "<description>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::queue::QueueError;

/// Everything that can go wrong while relaying one webhook.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request body is not valid UTF-8 text.
    #[error("request body is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The queue service could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The queue service refused the message or answered unexpectedly.
    #[error("{0}")]
    Queue(String),
}

impl RelayError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Decode(_) => "decode",
            RelayError::Transport(_) => "transport",
            RelayError::Queue(_) => "queue",
        }
    }
}

impl From<QueueError> for RelayError {
    fn from(error: QueueError) -> Self {
        match error {
            QueueError::Transport(_) => RelayError::Transport(error.to_string()),
            QueueError::Rejected(_) | QueueError::MissingMessageId => {
                RelayError::Queue(error.to_string())
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
