use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::money;
use crate::lenient;

/// Category assumed for rows that do not carry one.
pub const DEFAULT_CATEGORY: &str = "Earrings";

/// Status assumed for rows that do not carry one.
pub const ACTIVE_STATUS: &str = "active";

/// Opaque product identifier. Backend ids may be numeric or text; both are
/// held in their string form so that `5` and `"5"` compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::text(deserializer).map(Self)
    }
}

/// Publication status of a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => ACTIVE_STATUS,
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}

/// A product row as stored by the backend.
///
/// Decoding is forgiving: missing or malformed fields fall back to defaults
/// rather than rejecting the whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
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
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub category: Option<String>,
    /// Raw status text; anything other than `"active"` keeps the row off the shop.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sold_out: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::image_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Category with the storefront default applied.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Status with `"active"` assumed when absent.
    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(ACTIVE_STATUS)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == ACTIVE_STATUS
    }

    /// `true` when the product belongs on the public shop.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.is_active() && !self.sold_out
    }

    /// First gallery image, falling back to the legacy single image column.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .or(self.image_url.as_deref())
            .unwrap_or("")
    }

    /// Summary line shown next to each row in the admin console, e.g.
    /// `"Code: E-12 • ₱450 • SOLD OUT"`.
    #[must_use]
    pub fn admin_meta(&self) -> String {
        let code = (!self.code.is_empty()).then(|| format!("Code: {}", self.code));
        let sold_out = self.sold_out.then(|| "SOLD OUT".to_string());
        [code, Some(money(self.price)), sold_out]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" • ")
    }
}
