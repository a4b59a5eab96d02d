//! Admin console: create, update, delete and image upload for product rows.

mod draft;
mod schema;
mod upload;

pub use draft::{NewProduct, ProductDraft, ProductPatch, StagedImages, ValidationError};
pub use schema::{OptionalColumn, SchemaCapabilities};
pub use upload::{
    fresh_object_path, guess_content_type, object_path, sanitize_file_name, PRODUCT_IMAGE_FOLDER,
};

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use galleria_core::{AppConfig, Product, ProductId};
use thiserror::Error;

use crate::client::BackendClient;
use crate::error::BackendError;

/// Prompt shown before a product is deleted.
pub const DELETE_PROMPT: &str = "Are you sure?";

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("backend credentials are not configured")]
    NotConfigured,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("another admin request is still in flight")]
    Busy,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Product administration over a [`BackendClient`].
///
/// At most one mutating request runs at a time; a second one started while
/// the first is pending fails with [`AdminError::Busy`]. The known schema
/// capabilities shrink when the backend reports a missing optional column.
#[derive(Debug)]
pub struct AdminConsole {
    client: BackendClient,
    bucket: String,
    schema: Mutex<SchemaCapabilities>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AdminConsole {
    #[must_use]
    pub fn new(
        client: BackendClient,
        bucket: impl Into<String>,
        schema: SchemaCapabilities,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            schema: Mutex::new(schema),
            in_flight: AtomicBool::new(false),
        }
    }

    /// # Errors
    ///
    /// - [`AdminError::NotConfigured`] when backend credentials are missing.
    /// - [`AdminError::Backend`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdminError> {
        let client = BackendClient::from_config(config)?.ok_or(AdminError::NotConfigured)?;
        Ok(Self::new(
            client,
            config.storage_bucket.clone(),
            SchemaCapabilities::for_version(config.schema_version),
        ))
    }

    /// Currently assumed table capabilities.
    #[must_use]
    pub fn schema(&self) -> SchemaCapabilities {
        *self.schema.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Every product row regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Backend`] if the query fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        Ok(self.client.list_products().await?)
    }

    /// Insert the draft as a new product and reset it on success.
    ///
    /// The draft is untouched on failure.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Validation`] before any request if the draft is invalid.
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] if the insert is rejected.
    pub async fn create(&self, draft: &mut ProductDraft) -> Result<(), AdminError> {
        let row = draft.validate()?;
        let _guard = self.begin()?;

        self.write_with_fallback(|caps| {
            let body = row.for_schema(caps);
            async move { self.client.insert_product(&body).await.map_err(AdminError::from) }
        })
        .await?;

        tracing::info!(name = %row.name, "product created");
        draft.reset();
        Ok(())
    }

    /// Upload `files` onto the draft, then insert it.
    ///
    /// The draft is validated before anything is uploaded, so an invalid
    /// form leaves no objects behind in storage.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Validation`] before any request if the draft is invalid.
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] if an upload or the insert is rejected.
    pub async fn create_with_uploads(
        &self,
        draft: &mut ProductDraft,
        files: Vec<ImageFile>,
    ) -> Result<usize, AdminError> {
        draft.validate()?;
        let staged = if files.is_empty() {
            0
        } else {
            self.upload_images(draft, files).await?
        };
        self.create(draft).await?;
        Ok(staged)
    }

    /// Apply `patch` to the product with `id`.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Validation`] before any request if the patch is invalid,
    ///   or once every field it sets is a column the table lacks.
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] if the update is rejected.
    pub async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), AdminError> {
        patch.validate()?;
        let _guard = self.begin()?;

        self.write_with_fallback(|caps| {
            let body = patch.for_schema(caps);
            async move {
                if body.is_empty() {
                    return Err(AdminError::from(ValidationError::UnsupportedFields));
                }
                self.client
                    .update_product(id, &body)
                    .await
                    .map_err(AdminError::from)
            }
        })
        .await?;

        tracing::info!(product_id = %id, "product updated");
        Ok(())
    }

    /// Delete the product with `id` once `confirm` agrees.
    ///
    /// A declined confirmation issues no request.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] if the delete is rejected.
    pub async fn delete(
        &self,
        id: &ProductId,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, AdminError> {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(product_id = %id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        let _guard = self.begin()?;
        self.client.delete_product(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Upload one image and return its public URL.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] if the upload is rejected.
    pub async fn upload_image(&self, file: ImageFile) -> Result<String, AdminError> {
        let _guard = self.begin()?;
        self.upload_one(file).await
    }

    /// Upload `files` in order, staging each URL on the draft as it succeeds.
    ///
    /// Returns the number of images staged. On failure the images uploaded
    /// before it stay staged.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Busy`] if another request is in flight.
    /// - [`AdminError::Backend`] on the first rejected upload.
    pub async fn upload_images(
        &self,
        draft: &mut ProductDraft,
        files: Vec<ImageFile>,
    ) -> Result<usize, AdminError> {
        let _guard = self.begin()?;
        let mut staged = 0;
        for file in files {
            let url = self.upload_one(file).await?;
            draft.images.add_url(&url);
            staged += 1;
        }
        Ok(staged)
    }

    async fn upload_one(&self, file: ImageFile) -> Result<String, AdminError> {
        let path = fresh_object_path(&file.name);
        let content_type = guess_content_type(&file.name);
        self.client
            .upload_object(&self.bucket, &path, file.bytes, content_type)
            .await?;
        let url = self.client.public_url(&self.bucket, &path)?;
        tracing::info!(%url, "image uploaded");
        Ok(url.into())
    }

    fn begin(&self) -> Result<InFlight<'_>, AdminError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| AdminError::Busy)
    }

    /// Run a write, dropping any optional column the backend reports missing
    /// and retrying. Each optional column is dropped at most once.
    async fn write_with_fallback<F, Fut>(&self, mut attempt: F) -> Result<(), AdminError>
    where
        F: FnMut(SchemaCapabilities) -> Fut,
        Fut: Future<Output = Result<(), AdminError>>,
    {
        let mut caps = self.schema();
        loop {
            let err = match attempt(caps).await {
                Ok(()) => return Ok(()),
                Err(AdminError::Backend(err)) if err.is_unknown_column() => err,
                Err(other) => return Err(other),
            };

            let message = err.to_string();
            let Some(column) = OptionalColumn::ALL
                .into_iter()
                .find(|c| caps.supports(*c) && c.named_in(&message))
            else {
                return Err(err.into());
            };

            tracing::warn!(%column, "backend lacks optional column; retrying without it");
            caps = caps.without(column);
            *self.schema.lock().unwrap_or_else(PoisonError::into_inner) = caps;
        }
    }
}
