//! SQS-backed queue client.
//!
//! The client is built once at startup, resolves the queue URL by name, and
//! is then shared by every request handler through `Arc<dyn MessageQueue>`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_sqs::{
    config::{Credentials, Region},
    error::{DisplayErrorContext, SdkError},
    Client,
};
use tracing::{debug, info};

use super::types::{MessageQueue, QueueError, ReceiveRequest, ReceivedMessage, SentMessage};
use crate::Config;

/// Static credentials provider name reported to the SDK.
const CREDENTIALS_PROVIDER: &str = "adpush-env";

/// Queue client talking to an SQS-compatible endpoint.
#[derive(Clone, Debug)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    /// Build an SDK client from `config` and resolve the configured queue.
    pub async fn connect(config: &Config) -> Result<Self> {
        info!(
            endpoint = %config.sqs_endpoint_url,
            region = %config.sqs_region,
            queue = %config.sqs_queue_name,
            "sqs_connecting"
        );

        let credentials = Credentials::new(
            config.aws_access_key_id.clone(),
            config.aws_secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let shared_config = aws_config::from_env()
            .endpoint_url(config.sqs_endpoint_url.clone())
            .region(Region::new(config.sqs_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        let client = Client::new(&shared_config);

        let output = client
            .get_queue_url()
            .queue_name(&config.sqs_queue_name)
            .send()
            .await
            .map_err(classify)
            .with_context(|| format!("Failed to resolve queue '{}'", config.sqs_queue_name))?;

        let queue_url = output
            .queue_url()
            .map(str::to_owned)
            .context("Queue service returned no queue URL")?;

        info!(queue_url = %queue_url, "sqs_queue_resolved");

        Ok(Self::from_parts(client, queue_url))
    }

    /// Wrap an existing SDK client and an already known queue URL.
    pub fn from_parts(client: Client, queue_url: String) -> Self {
        Self { client, queue_url }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn send_message(&self, body: String) -> Result<SentMessage, QueueError> {
        let body_length = body.len();

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(classify)?;

        let message_id = output
            .message_id()
            .map(str::to_owned)
            .ok_or(QueueError::MissingMessageId)?;

        debug!(
            queue_url = %self.queue_url,
            message_id = %message_id,
            body_length = body_length,
            "sqs_message_sent"
        );

        Ok(SentMessage { message_id })
    }

    async fn receive_messages(
        &self,
        request: ReceiveRequest,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(request.max_messages)
            .visibility_timeout(request.visibility_timeout_secs)
            .wait_time_seconds(request.wait_time_secs)
            .send()
            .await
            .map_err(classify)?;

        let messages = output
            .messages()
            .iter()
            .map(|m| ReceivedMessage {
                message_id: m.message_id().map(str::to_owned),
                receipt_handle: m.receipt_handle().map(str::to_owned),
                body: m.body().map(str::to_owned),
            })
            .collect();

        Ok(messages)
    }
}

/// Split SDK failures into "never got an answer" and "service said no".
fn classify<E>(err: SdkError<E>) -> QueueError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let description = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::ServiceError(_) => QueueError::Rejected(description),
        _ => QueueError::Transport(description),
    }
}
