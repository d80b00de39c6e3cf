use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::error::ApiError;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(20);

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the payload under `name` and returns its retrieval URL.
    async fn put(&self, bytes: Vec<u8>, name: &str) -> Result<String, ApiError>;
}

/// Blob upload client for an Azure-blob-style REST endpoint with SAS auth.
pub struct BlobClient {
    http: Client,
    endpoint: String,
    container: String,
    sas_token: String,
}

impl BlobClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: config.storage_endpoint.clone(),
            container: config.document_container.clone(),
            sas_token: config.storage_sas_token.clone(),
        })
    }

    async fn ensure_container(&self) -> Result<(), ApiError> {
        let url = format!(
            "{}/{}?restype=container&{}",
            self.endpoint, self.container, self.sas_token
        );
        let response = self.http.put(&url).send().await?;
        let status = response.status();
        // 409 means the container already exists
        if !status.is_success() && status != StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for BlobClient {
    async fn put(&self, bytes: Vec<u8>, name: &str) -> Result<String, ApiError> {
        self.ensure_container().await?;

        let blob_url = format!("{}/{}/{}", self.endpoint, self.container, name);
        let response = self
            .http
            .put(format!("{}?{}", blob_url, self.sas_token))
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-blob-content-type", "text/html; charset=utf-8")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        // The SAS-less URL; retrieval auth is the container's concern.
        Ok(blob_url)
    }
}
