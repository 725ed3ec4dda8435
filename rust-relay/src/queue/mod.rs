//! Queue module for SQS operations.
//!
//! This module provides:
//! - The `MessageQueue` seam the relay and poller are written against
//! - An SQS-backed implementation (ElasticMQ in development)
//! - Message types and receive parameters
//!
//! ## Architecture
//!
//! ```text
//! Webhook → Web Server → nonprocessed queue → (downstream consumers)
//! ```

pub mod sqs;
pub mod types;

pub use sqs::SqsQueue;
pub use types::{
    MessageQueue, QueueError, ReceiveRequest, ReceivedMessage, SentMessage, QUEUE_NAME,
    RECEIVE_MAX_MESSAGES, RECEIVE_VISIBILITY_TIMEOUT_SECS, RECEIVE_WAIT_TIME_SECS,
};
