//! Queue message types and the queue client trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue name for raw inbound webhooks.
pub const QUEUE_NAME: &str = "nonprocessed";

/// Maximum batch size for a diagnostic receive.
pub const RECEIVE_MAX_MESSAGES: i32 = 5;

/// Seconds received messages stay hidden from other consumers.
pub const RECEIVE_VISIBILITY_TIMEOUT_SECS: i32 = 5;

/// Seconds a receive call long-polls before returning an empty batch.
pub const RECEIVE_WAIT_TIME_SECS: i32 = 5;

/// Errors surfaced by a queue client.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The request never produced a service response (connect, timeout, IO).
    #[error("queue unreachable: {0}")]
    Transport(String),

    /// The queue service answered with an error.
    #[error("queue rejected request: {0}")]
    Rejected(String),

    /// A send succeeded but the response carried no message id.
    #[error("queue response did not include a message id")]
    MissingMessageId,
}

/// Acknowledgment of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    /// Server-assigned message identifier
    pub message_id: String,
}

/// A message returned by a receive call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub message_id: Option<String>,
    pub receipt_handle: Option<String>,
    pub body: Option<String>,
}

/// Parameters for a single blocking receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveRequest {
    pub max_messages: i32,
    pub visibility_timeout_secs: i32,
    pub wait_time_secs: i32,
}

impl Default for ReceiveRequest {
    fn default() -> Self {
        Self {
            max_messages: RECEIVE_MAX_MESSAGES,
            visibility_timeout_secs: RECEIVE_VISIBILITY_TIMEOUT_SECS,
            wait_time_secs: RECEIVE_WAIT_TIME_SECS,
        }
    }
}

/// Client for a named message queue.
///
/// Implementations are shared across request handlers, so they must be
/// `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Send `body` verbatim as one message.
    async fn send_message(&self, body: String) -> Result<SentMessage, QueueError>;

    /// Perform one receive call and return whatever batch comes back.
    async fn receive_messages(
        &self,
        request: ReceiveRequest,
    ) -> Result<Vec<ReceivedMessage>, QueueError>;
}
