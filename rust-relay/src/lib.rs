//! Adpush - webhook relay and bulk ad uploader.
//!
//! This library provides shared modules for the three adpush binaries:
//! - `adpush-web`: Thin web server relaying webhook bodies to the queue
//! - `adpush-upload`: Bulk uploader creating ads and pushing their files
//! - `adpush-poll`: One-shot diagnostic receive against the queue
//!
//! ## Architecture
//!
//! ```text
//! Webhooks → Web Server → nonprocessed queue
//! Files → Uploader → POST ad → PUT presigned URL
//! ```

pub mod config;
pub mod logging;
pub mod queue;
pub mod upload;
pub mod web;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use queue::{MessageQueue, QueueError, SqsQueue, QUEUE_NAME};
pub use upload::{UploadClient, UploadError, UploadReport};
pub use web::{router, AppState, RelayError};
