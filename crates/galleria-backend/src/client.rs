//! HTTP client for the hosted backend's table and object-storage endpoints.
//!
//! Every request carries the project's public key in both the `apikey` and
//! `Authorization` headers. Non-2xx responses are surfaced as
//! [`BackendError::Api`] with the backend's own error code and message.

use std::time::Duration;

use galleria_core::{AppConfig, Product, ProductId};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;

use crate::error::BackendError;

const PRODUCTS_TABLE: &str = "products";
const REST_PREFIX: &str = "rest/v1/";

/// Client for the backend's REST table interface and object storage.
///
/// Use [`BackendClient::new`] with an explicit base URL (a wiremock server in
/// tests), or [`BackendClient::from_config`] to build from configuration.
#[derive(Clone)]
pub struct BackendClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    anon_key: String,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url.as_str())
            .field("anon_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `timeout_secs` of `None` leaves request timing to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BackendError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder().user_agent("galleria/0.1 (storefront)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so that `Url::join` appends to the
        // project root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| BackendError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.trim().to_owned(),
        })
    }

    /// Builds a client from configuration, or `None` when no credentials are set.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, BackendError> {
        config
            .backend_credentials()
            .map(|creds| Self::new(creds.url, creds.anon_key, config.request_timeout_secs))
            .transpose()
    }

    /// All product rows, newest first.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the backend rejects the query.
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Deserialize`] if the body is not a JSON array.
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let mut url = self.table_url(PRODUCTS_TABLE)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        tracing::debug!(%url, "listing products");
        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Deserialize {
            context: "list products".to_string(),
            source: e,
        })
    }

    /// Insert one product row.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the backend rejects the row.
    /// - [`BackendError::Http`] on network failure.
    pub async fn insert_product<T: Serialize + ?Sized>(&self, row: &T) -> Result<(), BackendError> {
        let url = self.table_url(PRODUCTS_TABLE)?;
        tracing::info!("inserting product");
        self.send(
            self.client
                .post(url)
                .header("Prefer", "return=minimal")
                .json(row),
        )
        .await?;
        Ok(())
    }

    /// Apply a partial update to the product with `id`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the backend rejects the patch.
    /// - [`BackendError::Http`] on network failure.
    pub async fn update_product<T: Serialize + ?Sized>(
        &self,
        id: &ProductId,
        patch: &T,
    ) -> Result<(), BackendError> {
        let url = self.row_url(PRODUCTS_TABLE, id)?;
        tracing::info!(product_id = %id, "updating product");
        self.send(
            self.client
                .patch(url)
                .header("Prefer", "return=minimal")
                .json(patch),
        )
        .await?;
        Ok(())
    }

    /// Delete the product with `id`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the backend rejects the delete.
    /// - [`BackendError::Http`] on network failure.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError> {
        let url = self.row_url(PRODUCTS_TABLE, id)?;
        tracing::info!(product_id = %id, "deleting product");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    pub(crate) fn join(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        self.join(&format!("{REST_PREFIX}{table}"))
    }

    /// Table URL filtered to a single row by primary key.
    fn row_url(&self, table: &str, id: &ProductId) -> Result<Url, BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        Ok(url)
    }

    /// Attach credentials, send, and turn non-2xx responses into
    /// [`BackendError::Api`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = BackendError::from_response_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "backend request failed");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> BackendClient {
        BackendClient::new(base_url, "anon", None).expect("client construction should not fail")
    }

    #[test]
    fn table_url_appends_rest_prefix() {
        let client = test_client("https://project.example.co");
        let url = client.table_url("products").unwrap();
        assert_eq!(url.as_str(), "https://project.example.co/rest/v1/products");
    }

    #[test]
    fn table_url_keeps_base_path() {
        let client = test_client("https://gateway.example.co/tenant/");
        let url = client.table_url("products").unwrap();
        assert_eq!(
            url.as_str(),
            "https://gateway.example.co/tenant/rest/v1/products"
        );
    }

    #[test]
    fn row_url_filters_by_id() {
        let client = test_client("https://project.example.co");
        let url = client.row_url("products", &ProductId::new("42")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.example.co/rest/v1/products?id=eq.42"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = BackendClient::new("not a url", "anon", None).unwrap_err();
        assert!(matches!(err, BackendError::InvalidBaseUrl { .. }), "got: {err:?}");
    }
}
