//! Adpush Poll - one-shot diagnostic receive.
//!
//! Issues a single long-poll receive against the configured queue and prints
//! the returned batch (0 to 5 messages) as JSON on stdout. Messages are not
//! deleted; they reappear once the visibility timeout elapses.

use anyhow::{Context, Result};
use tracing::info;

use adpush::queue::ReceiveRequest;
use adpush::{logging, Config, MessageQueue, SqsQueue};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_cli();

    let config = Config::from_env();
    let queue = SqsQueue::connect(&config)
        .await
        .context("Failed to connect to queue service")?;

    let request = ReceiveRequest::default();
    info!(
        queue_url = %queue.queue_url(),
        max_messages = request.max_messages,
        wait_time_secs = request.wait_time_secs,
        "queue_polling"
    );

    let messages = queue
        .receive_messages(request)
        .await
        .context("Receive failed")?;

    info!(received = messages.len(), "queue_poll_complete");

    let rendered = serde_json::to_string_pretty(&messages).context("Failed to render messages")?;
    println!("{rendered}");

    Ok(())
}
