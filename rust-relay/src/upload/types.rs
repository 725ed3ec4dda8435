//! Request, response and error types for the bulk uploader.

use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Tags attached to every created ad.
pub const DEFAULT_TAGS: &[&str] = &["test"];

/// Body of the create-ad call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdRequest {
    pub tags: Vec<String>,
}

impl Default for CreateAdRequest {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Response of the create-ad call.
///
/// Only `presigned` is required; the backend also returns the new ad id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub presigned: String,
}

/// One file on its way to the backend.
#[derive(Debug, Clone)]
pub struct AdUploadJob {
    pub path: PathBuf,
    pub tags: Vec<String>,
    /// Set once the create call has returned.
    pub presigned_url: Option<Url>,
}

impl AdUploadJob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tags: CreateAdRequest::default().tags,
            presigned_url: None,
        }
    }

    /// File name the uploaded object is known by.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn create_request(&self) -> CreateAdRequest {
        CreateAdRequest {
            tags: self.tags.clone(),
        }
    }
}

/// A file that made it all the way to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAd {
    pub path: PathBuf,
    pub ad_id: Option<String>,
}

/// Outcome of a fully successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedAd>,
}

/// Errors that abort an upload run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No files to upload")]
    NoFiles,

    #[error("Some files do not exist: {}", join_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    #[error("Failed to create '{}', got response: {status} {body}", .path.display())]
    CreateRejected {
        path: PathBuf,
        status: StatusCode,
        body: String,
    },

    #[error("Create response for '{}' has no usable presigned URL: {reason}", .path.display())]
    InvalidCreateResponse { path: PathBuf, reason: String },

    #[error("Failed to upload '{}', got status {status}", .path.display())]
    UploadRejected { path: PathBuf, status: StatusCode },

    #[error("Request for '{}' failed: {source}", .path.display())]
    Http {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl UploadError {
    pub(crate) fn http(path: &Path, source: reqwest::Error) -> Self {
        UploadError::Http {
            path: path.to_path_buf(),
            source,
        }
    }
}
