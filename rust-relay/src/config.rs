//! Configuration module for environment variable parsing.
//!
//! The relay and the diagnostic poller read everything from the environment.
//! Defaults target the local ElasticMQ container used in development.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::queue::QUEUE_NAME;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Endpoint of the SQS-compatible queue service
    pub sqs_endpoint_url: String,

    /// Region name sent to the queue service
    pub sqs_region: String,

    /// Name of the queue webhooks are forwarded to
    pub sqs_queue_name: String,

    /// Access key for the queue service
    pub aws_access_key_id: String,

    /// Secret key for the queue service
    pub aws_secret_access_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 5000),

            sqs_endpoint_url: env::var("SQS_ENDPOINT_URL")
                .unwrap_or_else(|_| "http://sqs:9324".to_string()),

            sqs_region: env::var("SQS_REGION").unwrap_or_else(|_| "elasticmq".to_string()),

            sqs_queue_name: env::var("SQS_QUEUE_NAME").unwrap_or_else(|_| QUEUE_NAME.to_string()),

            aws_access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_else(|_| "x".to_string()),

            aws_secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .unwrap_or_else(|_| "x".to_string()),
        }
    }
}

/// Parse a variable into `T`, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}
