//! Adpush Web Server - webhook-to-queue relay.
//!
//! This binary provides a thin web server that:
//! - Receives raw webhook bodies on `POST /webhook`
//! - Sends each body verbatim to the `nonprocessed` queue
//! - Answers with the queue-assigned message id, or 500 on any failure
//!
//! Nothing is retried, batched, or buffered.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;

use adpush::{logging, router, AppState, Config, SqsQueue};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_json();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        sqs_endpoint = %config.sqs_endpoint_url,
        sqs_region = %config.sqs_region,
        queue = %config.sqs_queue_name,
        "config_loaded"
    );

    // Resolve the queue once; every request reuses this client
    let queue = SqsQueue::connect(&config)
        .await
        .context("Failed to connect to queue service")?;
    info!(queue_url = %queue.queue_url(), "queue_client_created");

    let state = AppState::new(Arc::new(queue));
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
