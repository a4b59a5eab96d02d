use galleria_core::catalog::{LOAD_FAILED_MESSAGE, NOT_CONNECTED_MESSAGE};
use galleria_core::CatalogView;

use crate::client::BackendClient;

/// Load the storefront catalog.
///
/// Never fails: a missing client or a backend error yields an empty view
/// carrying a message for the page to show.
pub async fn load_catalog(client: Option<&BackendClient>) -> CatalogView {
    let Some(client) = client else {
        tracing::warn!("backend credentials not configured; catalog unavailable");
        return CatalogView::unavailable(NOT_CONNECTED_MESSAGE);
    };

    match client.list_products().await {
        Ok(rows) => {
            let total = rows.len();
            let view = CatalogView::from_rows(rows);
            tracing::debug!(total, listed = view.products().len(), "catalog loaded");
            view
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load products");
            CatalogView::unavailable(LOAD_FAILED_MESSAGE)
        }
    }
}
