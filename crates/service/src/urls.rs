use std::time::Duration;

use async_trait::async_trait;
use url::Url;

/// Issues short-lived signed URLs against the object store holding avatar
/// images. The directory never proxies image bytes; it redirects callers
/// to a URL embedding the grant. Deployments wire a cloud-specific
/// implementation into the service state; without one, avatar routes
/// answer 501.
#[async_trait]
pub trait SignedUrlIssuer: Send + Sync + std::fmt::Debug {
    async fn upload_url(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        content_length: u64,
        expiry: Duration,
    ) -> Result<Url, UrlIssueError>;

    async fn download_url(
        &self,
        bucket: &str,
        name: &str,
        expiry: Duration,
    ) -> Result<Url, UrlIssueError>;

    async fn delete_url(
        &self,
        bucket: &str,
        name: &str,
        expiry: Duration,
    ) -> Result<Url, UrlIssueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UrlIssueError {
    #[error("signed url issuance failed: {0}")]
    Issuer(String),
}
