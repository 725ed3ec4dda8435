//! Bulk ad uploader.
//!
//! For every input file, in order:
//!
//! ```text
//! POST <target> {"tags": [...]} → {"presigned": <url>} → PUT <url> <file bytes>
//! ```
//!
//! The first failure stops the run. Files uploaded before it stay uploaded.

pub mod client;
pub mod types;

pub use client::UploadClient;
pub use types::{
    AdUploadJob, CreateAdRequest, CreateAdResponse, UploadError, UploadReport, UploadedAd,
    DEFAULT_TAGS,
};
