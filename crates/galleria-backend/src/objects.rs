//! Object-storage upload and public URL resolution.

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::client::BackendClient;
use crate::error::BackendError;

const OBJECT_PREFIX: &str = "storage/v1/object/";
const PUBLIC_PREFIX: &str = "storage/v1/object/public/";

impl BackendClient {
    /// Upload `bytes` to `bucket/path` with overwriting disabled.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the object already exists or the bucket
    ///   rejects the upload.
    /// - [`BackendError::Http`] on network failure.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let url = self.join(&format!("{OBJECT_PREFIX}{bucket}/{path}"))?;
        tracing::info!(bucket, path, size = bytes.len(), "uploading object");
        self.send(
            self.client
                .post(url)
                .header(CONTENT_TYPE, content_type)
                .header("x-upsert", "false")
                .body(bytes),
        )
        .await?;
        Ok(())
    }

    /// Public URL of an object in a public bucket. Makes no request.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidBaseUrl`] if the joined URL is invalid.
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<Url, BackendError> {
        self.join(&format!("{PUBLIC_PREFIX}{bucket}/{path}"))
    }
}
