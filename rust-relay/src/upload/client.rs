//! HTTP client driving the create-then-upload sequence.

use std::path::PathBuf;

use reqwest::Client;
use tracing::{error, info};
use url::Url;

use super::types::{AdUploadJob, CreateAdResponse, UploadError, UploadReport, UploadedAd};

/// Sequential, fail-fast bulk uploader.
///
/// The HTTP client is injected so callers control connection pooling and
/// tests can point it at a mock server.
#[derive(Debug, Clone)]
pub struct UploadClient {
    client: Client,
}

impl UploadClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Reject the run before any network activity if it cannot complete.
    pub fn check_files(paths: &[PathBuf]) -> Result<(), UploadError> {
        if paths.is_empty() {
            return Err(UploadError::NoFiles);
        }

        let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.exists()).cloned().collect();
        if !missing.is_empty() {
            return Err(UploadError::MissingFiles(missing));
        }

        Ok(())
    }

    /// Create an ad and upload its file for every path, in order.
    ///
    /// Stops at the first failure; nothing already uploaded is rolled back.
    pub async fn run(
        &self,
        target_url: &Url,
        paths: &[PathBuf],
    ) -> Result<UploadReport, UploadError> {
        Self::check_files(paths)?;

        info!(target_url = %target_url, file_count = paths.len(), "upload_run_starting");

        let mut report = UploadReport::default();
        for path in paths {
            let mut job = AdUploadJob::new(path.clone());
            let ad_id = self.upload_one(target_url, &mut job).await?;
            report.uploaded.push(UploadedAd {
                path: job.path,
                ad_id,
            });
        }

        info!(uploaded = report.uploaded.len(), "upload_run_complete");

        Ok(report)
    }

    async fn upload_one(
        &self,
        target_url: &Url,
        job: &mut AdUploadJob,
    ) -> Result<Option<String>, UploadError> {
        info!(
            file = %job.path.display(),
            name = %job.display_name(),
            "ad_upload_starting"
        );

        let created = self.create_ad(target_url, job).await?;
        let presigned =
            Url::parse(&created.presigned).map_err(|e| UploadError::InvalidCreateResponse {
                path: job.path.clone(),
                reason: format!("'{}': {}", created.presigned, e),
            })?;

        info!(
            file = %job.path.display(),
            ad_id = ?created.id,
            presigned_url = %presigned,
            "ad_created"
        );

        job.presigned_url = Some(presigned);
        self.put_file(job).await?;

        info!(file = %job.path.display(), "ad_uploaded");

        Ok(created.id)
    }

    /// Create the remote ad resource and return its presigned upload target.
    async fn create_ad(
        &self,
        target_url: &Url,
        job: &AdUploadJob,
    ) -> Result<CreateAdResponse, UploadError> {
        let response = self
            .client
            .post(target_url.clone())
            .json(&job.create_request())
            .send()
            .await
            .map_err(|e| UploadError::http(&job.path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                file = %job.path.display(),
                status_code = status.as_u16(),
                body = %body,
                "ad_create_rejected"
            );
            return Err(UploadError::CreateRejected {
                path: job.path.clone(),
                status,
                body,
            });
        }

        response
            .json::<CreateAdResponse>()
            .await
            .map_err(|e| UploadError::InvalidCreateResponse {
                path: job.path.clone(),
                reason: e.to_string(),
            })
    }

    /// PUT the job's file bytes to the presigned URL its create call returned.
    async fn put_file(&self, job: &AdUploadJob) -> Result<(), UploadError> {
        let presigned = job
            .presigned_url
            .clone()
            .ok_or_else(|| UploadError::InvalidCreateResponse {
                path: job.path.clone(),
                reason: "no presigned URL recorded for job".to_string(),
            })?;

        let contents = tokio::fs::read(&job.path).await.map_err(|e| UploadError::Io {
            path: job.path.clone(),
            source: e,
        })?;

        let response = self
            .client
            .put(presigned)
            .body(contents)
            .send()
            .await
            .map_err(|e| UploadError::http(&job.path, e))?;

        let status = response.status();
        if !status.is_success() {
            error!(
                file = %job.path.display(),
                status_code = status.as_u16(),
                "ad_file_upload_rejected"
            );
            return Err(UploadError::UploadRejected {
                path: job.path.clone(),
                status,
            });
        }

        Ok(())
    }
}
