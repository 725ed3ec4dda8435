//! Webhook endpoint handlers.
//!
//! The webhook handler does no parsing and no validation. It:
//! 1. Decodes the raw body as text
//! 2. Sends it verbatim to the queue
//! 3. Returns the queue-assigned message id
//!
//! Every failure collapses into a 500 with an `error` description.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::queue::{MessageQueue, SentMessage};
use crate::web::error::RelayError;

/// Acknowledgment text returned on a successful relay.
pub const ACCEPTED_MESSAGE: &str = "Event received and sent to queue successfully";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<dyn MessageQueue>,
}

impl AppState {
    pub fn new(queue: Arc<dyn MessageQueue>) -> Self {
        Self { queue }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Webhook Relay
// =============================================================================

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: &'static str,
    pub message_id: String,
}

/// Forward one raw body to the queue.
///
/// The payload is never inspected or altered; the text handed to the queue
/// is exactly the UTF-8 decoding of `body`.
pub async fn relay_body(
    queue: &dyn MessageQueue,
    body: &[u8],
) -> Result<SentMessage, RelayError> {
    let payload = std::str::from_utf8(body)?;

    info!(body = %payload, body_length = body.len(), "webhook_received");

    let sent = queue.send_message(payload.to_owned()).await?;

    info!(message_id = %sent.message_id, "webhook_enqueued");

    Ok(sent)
}

/// Webhook endpoint.
///
/// Accepts any body, with or without a content type.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    match relay_body(state.queue.as_ref(), &body).await {
        Ok(sent) => (
            StatusCode::OK,
            Json(WebhookResponse {
                message: ACCEPTED_MESSAGE,
                message_id: sent.message_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(
                error = %e,
                kind = e.kind(),
                body_length = body.len(),
                "webhook_relay_failed"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{body::Body, http::Request, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::queue::{QueueError, ReceiveRequest, ReceivedMessage};
    use crate::test_support::capture_logs;
    use crate::web::router;

    /// Largest body SQS accepts.
    const SQS_MAX_BODY: usize = 256 * 1024;

    /// How the in-memory queue answers sends.
    #[derive(Clone, Copy)]
    enum Outcome {
        Accept,
        Unreachable,
        Reject,
        /// Reject bodies longer than the given size, accept the rest.
        SizeLimit(usize),
    }

    struct RecordingQueue {
        outcome: Outcome,
        sent: Mutex<Vec<String>>,
    }

    impl RecordingQueue {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageQueue for RecordingQueue {
        async fn send_message(&self, body: String) -> Result<SentMessage, QueueError> {
            let mut sent = self.sent.lock().unwrap();
            let body_length = body.len();
            sent.push(body);
            match self.outcome {
                Outcome::Accept => Ok(SentMessage {
                    message_id: format!("msg-{}", sent.len()),
                }),
                Outcome::SizeLimit(max) if body_length <= max => Ok(SentMessage {
                    message_id: format!("msg-{}", sent.len()),
                }),
                Outcome::SizeLimit(max) => Err(QueueError::Rejected(format!(
                    "message of {body_length} bytes exceeds the {max} byte limit"
                ))),
                Outcome::Unreachable => {
                    Err(QueueError::Transport("connection refused".to_string()))
                }
                Outcome::Reject => Err(QueueError::Rejected(
                    "AWS.SimpleQueueService.NonExistentQueue".to_string(),
                )),
            }
        }

        async fn receive_messages(
            &self,
            _request: ReceiveRequest,
        ) -> Result<Vec<ReceivedMessage>, QueueError> {
            Ok(Vec::new())
        }
    }

    fn app(queue: Arc<RecordingQueue>) -> Router {
        router(AppState::new(queue))
    }

    async fn post_webhook(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .body(body.into())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_webhook_forwards_body_verbatim() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let body = "{\"event\": \"ad.played\", \"device\": 42}\n";

        let (status, json) = post_webhook(app(queue.clone()), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], ACCEPTED_MESSAGE);
        assert_eq!(json["message_id"], "msg-1");
        assert_eq!(queue.sent(), vec![body.to_string()]);
    }

    #[tokio::test]
    async fn test_webhook_ignores_content_type() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/octet-stream")
            .body(Body::from("plain text, not json"))
            .unwrap();

        let response = app(queue.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(queue.sent(), vec!["plain text, not json".to_string()]);
    }

    #[tokio::test]
    async fn test_webhook_accepts_empty_body() {
        let queue = RecordingQueue::new(Outcome::Accept);

        let (status, _) = post_webhook(app(queue.clone()), Body::empty()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(queue.sent(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_webhook_forwards_body_larger_than_axum_default_limit() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let body = "a".repeat(3 * 1024 * 1024);

        let (status, json) = post_webhook(app(queue.clone()), body.clone()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message_id"], "msg-1");
        assert_eq!(queue.sent(), vec![body]);
    }

    #[tokio::test]
    async fn test_webhook_oversize_body_rejected_by_queue_returns_json_500() {
        let queue = RecordingQueue::new(Outcome::SizeLimit(SQS_MAX_BODY));
        let body = "a".repeat(3 * 1024 * 1024);

        let (status, json) = post_webhook(app(queue.clone()), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("exceeds"), "unexpected error: {error}");
        assert_eq!(queue.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_webhook_queue_unreachable_returns_500() {
        let queue = RecordingQueue::new(Outcome::Unreachable);

        let (status, json) = post_webhook(app(queue.clone()), "payload").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "queue unreachable: connection refused");
        assert!(json.get("message").is_none());
        assert_eq!(queue.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_webhook_queue_rejection_returns_500() {
        let queue = RecordingQueue::new(Outcome::Reject);

        let (status, json) = post_webhook(app(queue), "payload").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = json["error"].as_str().unwrap();
        assert!(
            error.contains("NonExistentQueue"),
            "unexpected error: {error}"
        );
    }

    #[tokio::test]
    async fn test_webhook_invalid_utf8_returns_500_without_send() {
        let queue = RecordingQueue::new(Outcome::Accept);

        let body = vec![0x7b, 0xff, 0xfe, 0x7d];

        let (status, json) = post_webhook(app(queue.clone()), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("UTF-8"));
        assert!(queue.sent().is_empty());
    }

    #[tokio::test]
    async fn test_each_request_sends_exactly_once() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let app = app(queue.clone());

        for body in ["first", "second", "third"] {
            let (status, _) = post_webhook(app.clone(), body).await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(queue.sent(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_webhook_rejects_get() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let request = Request::builder()
            .method("GET")
            .uri("/webhook")
            .body(Body::empty())
            .unwrap();

        let response = app(queue.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(queue.sent().is_empty());
    }

    #[tokio::test]
    async fn test_success_logs_body_then_message_id() {
        let (logs, _guard) = capture_logs();
        let queue = RecordingQueue::new(Outcome::Accept);

        let (status, _) = post_webhook(app(queue), "ping").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            logs.messages(),
            vec!["webhook_received", "webhook_enqueued"]
        );
        let events = logs.events();
        assert_eq!(events[0]["body"], "ping");
        assert_eq!(events[1]["message_id"], "msg-1");
    }

    #[tokio::test]
    async fn test_failure_logs_body_then_error() {
        let (logs, _guard) = capture_logs();
        let queue = RecordingQueue::new(Outcome::Unreachable);

        let (status, _) = post_webhook(app(queue), "ping").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            logs.messages(),
            vec!["webhook_received", "webhook_relay_failed"]
        );
        let events = logs.events();
        assert_eq!(events[0]["body"], "ping");
        assert_eq!(events[1]["error"], "queue unreachable: connection refused");
        assert_eq!(events[1]["kind"], "transport");
    }

    #[tokio::test]
    async fn test_health() {
        let queue = RecordingQueue::new(Outcome::Accept);
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(queue).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
