//! Adpush Upload - bulk ad uploader.
//!
//! Usage: `adpush-upload <url> <file>...`
//!
//! For each file, creates an ad at `<url>` and PUTs the file to the presigned
//! URL the backend returns. Files are processed in the order given; the first
//! failure ends the run with exit code 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use adpush::{logging, UploadClient};

const USAGE: &str = "usage: adpush-upload <url> <file>...";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    url: Url,
    files: Vec<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let Some(raw_url) = args.next() else {
        bail!("missing target url");
    };
    let url = Url::parse(&raw_url).with_context(|| format!("invalid target url '{raw_url}'"))?;
    let files = args.map(PathBuf::from).collect();
    Ok(Args { url, files })
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_cli();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, usage = USAGE, "invalid_arguments");
            return ExitCode::FAILURE;
        }
    };

    // Preconditions run before any client is built or request is sent
    if let Err(e) = UploadClient::check_files(&args.files) {
        error!(error = %e, "upload_preconditions_failed");
        return ExitCode::FAILURE;
    }

    info!(url = %args.url, files = ?args.files, "upload_run_requested");

    let client = match Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "http_client_build_failed");
            return ExitCode::FAILURE;
        }
    };

    match UploadClient::new(client).run(&args.url, &args.files).await {
        Ok(report) => {
            info!(uploaded = report.uploaded.len(), "upload_done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "upload_aborted");
            ExitCode::FAILURE
        }
    }
}
