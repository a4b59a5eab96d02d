//! The shopper's cart: an ordered list of line items mirrored into client
//! storage after every change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::format::{IntoQuantity, MIN_QUANTITY};
use crate::lenient;
use crate::products::{Product, ProductId};
use crate::storage::CartStorage;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart_v1";

/// One cart line: a snapshot of the product's display fields taken when it
/// was first added, plus the quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image: String,
    /// Zero only when persisted data was unreadable; every store operation
    /// leaves it at one or more.
    #[serde(rename = "qty", default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
}

impl CartItem {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            code: product.code.clone(),
            sku: product.sku.clone(),
            category: product.category().to_string(),
            image: product.primary_image().to_string(),
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Sum of quantities across `items`.
#[must_use]
pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|it| u64::from(it.quantity)).sum()
}

/// Sum of `price × quantity` across `items`.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, it| acc.saturating_add(it.line_total()))
}

/// Owns the cart contents and the storage they are mirrored to.
///
/// Storage writes are best-effort: a failed write is logged and the
/// in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart persisted under [`CART_STORAGE_KEY`].
    ///
    /// Missing or unparseable data yields an empty cart.
    pub fn load(storage: S) -> Self {
        let items = storage
            .read(CART_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => Some(items),
                Err(e) => {
                    tracing::debug!(error = %e, "discarding unreadable persisted cart");
                    None
                }
            })
            .unwrap_or_default();
        Self { storage, items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|it| it.id.as_str() == id)
    }

    /// Add `quantity` of `product`, merging into an existing line with the
    /// same id.
    pub fn add(&mut self, product: &Product, quantity: impl IntoQuantity) {
        let quantity = quantity.into_quantity();
        if let Some(item) = self.find_mut(product.id.as_str()) {
            item.quantity = item.quantity.saturating_add(quantity).max(MIN_QUANTITY);
        } else {
            self.items.push(CartItem::snapshot(product, quantity));
        }
        self.persist();
    }

    /// Overwrite a line's quantity. No-op when `id` is not in the cart.
    pub fn set_quantity(&mut self, id: &str, value: impl IntoQuantity) {
        let quantity = value.into_quantity();
        self.update(id, |_| quantity);
    }

    pub fn increment(&mut self, id: &str) {
        self.update(id, |q| q.max(MIN_QUANTITY).saturating_add(1));
    }

    /// Decrease by one, never below one. Use [`CartStore::remove`] to drop a line.
    pub fn decrement(&mut self, id: &str) {
        self.update(id, |q| q.max(MIN_QUANTITY).saturating_sub(1).max(MIN_QUANTITY));
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|it| it.id.as_str() != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        total_quantity(&self.items)
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal(&self.items)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|it| it.id.as_str() == id)
    }

    fn update(&mut self, id: &str, next: impl FnOnce(u32) -> u32) {
        let Some(item) = self.find_mut(id) else {
            return;
        };
        item.quantity = next(item.quantity);
        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.write(CART_STORAGE_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
