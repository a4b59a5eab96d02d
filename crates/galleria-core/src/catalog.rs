//! Client-side shaping of the product list shown on the shop page.

use std::fmt;

use crate::products::{Product, DEFAULT_CATEGORY};

/// Sentinel category value that disables filtering.
pub const ALL_CATEGORIES: &str = "ALL";

/// Message shown when no backend credentials are configured.
pub const NOT_CONNECTED_MESSAGE: &str = "Backend not connected. Check configuration.";

/// Message shown when the product query fails.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading products.";

/// Category selection applied after the backend query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    /// Exact, case-insensitive category match.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a pill value; `"ALL"` (any case) disables filtering.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category().to_lowercase() == name.to_lowercase(),
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Named(DEFAULT_CATEGORY.to_string())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Named(name) => f.write_str(name),
        }
    }
}

/// What the shop page renders: the listed products, or a message explaining
/// why there are none to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    products: Vec<Product>,
    message: Option<String>,
}

impl CatalogView {
    /// Keep only active, in-stock rows, preserving the backend's order.
    #[must_use]
    pub fn from_rows(rows: Vec<Product>) -> Self {
        let products = rows.into_iter().filter(Product::is_listed).collect();
        Self {
            products,
            message: None,
        }
    }

    /// An empty view carrying a non-fatal explanation.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Explanation recorded when the catalog could not be loaded.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Products matching `filter`, in display order.
    #[must_use]
    pub fn visible(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Look up a listed product by its id (string form).
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }
}
