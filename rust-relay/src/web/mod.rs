//! Web server module for relaying inbound webhooks.
//!
//! This module provides a thin web server that:
//! - Receives raw webhook bodies on `POST /webhook`
//! - Forwards each body verbatim to the queue
//! - Returns the queue-assigned message id, or a 500 on any failure

pub mod error;
pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, RelayError};
pub use handlers::{
    health, relay_body, webhook, AppState, HealthResponse, WebhookResponse, ACCEPTED_MESSAGE,
};

/// Build the relay router.
///
/// Bodies are unbounded here; size limits are the queue's to enforce, and an
/// oversize payload fails through the relay's own error path.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
