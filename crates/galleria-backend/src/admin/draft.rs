//! Admin form state and the rows it produces.

use std::str::FromStr;

use galleria_core::products::DEFAULT_CATEGORY;
use galleria_core::ProductStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::schema::SchemaCapabilities;

/// Form input rejected before any request is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("product name is required")]
    NameRequired,

    #[error("price must be a positive number, got {0:?}")]
    InvalidPrice(String),

    #[error("update has no fields to change")]
    EmptyPatch,

    #[error("every field in the update is a column the product table lacks")]
    UnsupportedFields,
}

/// Image URLs attached to a draft, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedImages(Vec<String>);

impl StagedImages {
    /// Stage a URL. Blank input is ignored.
    pub fn add_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.0.push(url.to_string());
        }
    }

    /// Remove the image at `index`, returning it. Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// The new-product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    /// Raw price input; parsed by [`ProductDraft::validate`].
    pub price: String,
    pub code: String,
    pub sku: String,
    pub category: String,
    pub status: ProductStatus,
    pub sold_out: bool,
    pub images: StagedImages,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            code: String::new(),
            sku: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            status: ProductStatus::Active,
            sold_out: false,
            images: StagedImages::default(),
        }
    }
}

impl ProductDraft {
    /// Check the form and build the row to insert.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NameRequired`] if the name is blank.
    /// - [`ValidationError::InvalidPrice`] if the price is not a positive number.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let price = parse_price(&self.price)?;

        let images = self.images.as_slice().to_vec();
        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            other => other.to_string(),
        };

        Ok(NewProduct {
            name: name.to_string(),
            price,
            code: non_blank(&self.code),
            sku: non_blank(&self.sku),
            category,
            status: self.status,
            sold_out: self.sold_out,
            image_url: images.first().cloned(),
            images: Some(images),
        })
    }

    /// Return the form to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A validated product row ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub category: String,
    pub status: ProductStatus,
    pub sold_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// First staged image, or `null` when there are none.
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Copy of the row without the columns `caps` does not support.
    #[must_use]
    pub fn for_schema(&self, caps: SchemaCapabilities) -> Self {
        let mut row = self.clone();
        if !caps.sku {
            row.sku = None;
        }
        if !caps.images {
            row.images = None;
        }
        row
    }
}

/// A partial update: only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// `Some(None)` clears the primary image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
}

impl ProductPatch {
    /// Set the price from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] if the text is not a positive number.
    pub fn with_price_text(mut self, raw: &str) -> Result<Self, ValidationError> {
        self.price = Some(parse_price(raw)?);
        Ok(self)
    }

    /// Replace the gallery and keep `image_url` pointing at its first entry.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.image_url = Some(images.first().cloned());
        self.images = Some(images);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// # Errors
    ///
    /// - [`ValidationError::EmptyPatch`] if no field is set.
    /// - [`ValidationError::NameRequired`] if the name is set but blank.
    /// - [`ValidationError::InvalidPrice`] if the price is set but not positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::NameRequired);
        }
        if let Some(price) = self.price {
            if price <= Decimal::ZERO {
                return Err(ValidationError::InvalidPrice(price.to_string()));
            }
        }
        Ok(())
    }

    /// Copy of the patch without the columns `caps` does not support.
    #[must_use]
    pub fn for_schema(&self, caps: SchemaCapabilities) -> Self {
        let mut patch = self.clone();
        if !caps.sku {
            patch.sku = None;
        }
        if !caps.images {
            patch.images = None;
        }
        patch
    }
}

fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    match Decimal::from_str(trimmed) {
        Ok(price) if price > Decimal::ZERO => Ok(price),
        _ => Err(ValidationError::InvalidPrice(trimmed.to_string())),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filled_draft() -> ProductDraft {
        let mut draft = ProductDraft {
            name: "  Pearl Drop  ".to_string(),
            price: "1450".to_string(),
            code: "E-12".to_string(),
            sku: "SKU-9".to_string(),
            ..ProductDraft::default()
        };
        draft.images.add_url("https://cdn.example/a.jpg");
        draft.images.add_url("https://cdn.example/b.jpg");
        draft
    }

    #[test]
    fn default_draft_uses_storefront_category() {
        let draft = ProductDraft::default();
        assert_eq!(draft.category, "Earrings");
        assert_eq!(draft.status, ProductStatus::Active);
        assert!(!draft.sold_out);
    }

    #[test]
    fn blank_name_rejected() {
        let draft = ProductDraft {
            name: "   ".to_string(),
            price: "10".to_string(),
            ..ProductDraft::default()
        };
        assert_eq!(draft.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn bad_prices_rejected() {
        for raw in ["", "abc", "0", "-5", "NaN"] {
            let draft = ProductDraft {
                name: "Ring".to_string(),
                price: raw.to_string(),
                ..ProductDraft::default()
            };
            assert!(
                matches!(draft.validate(), Err(ValidationError::InvalidPrice(_))),
                "price {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn validated_row_serializes_all_columns() {
        let row = filled_draft().validate().unwrap();
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Pearl Drop",
                "price": 1450.0,
                "code": "E-12",
                "sku": "SKU-9",
                "category": "Earrings",
                "status": "active",
                "sold_out": false,
                "images": ["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"],
                "image_url": "https://cdn.example/a.jpg",
            })
        );
    }

    #[test]
    fn no_images_sends_null_image_url() {
        let mut draft = filled_draft();
        draft.images.clear();
        let value = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(value["image_url"], serde_json::Value::Null);
        assert_eq!(value["images"], json!([]));
    }

    #[test]
    fn version_one_schema_omits_optional_columns() {
        let row = filled_draft()
            .validate()
            .unwrap()
            .for_schema(SchemaCapabilities::for_version(1));
        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("sku").is_none());
        assert!(value.get("images").is_none());
        assert_eq!(value["image_url"], "https://cdn.example/a.jpg");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut draft = filled_draft();
        draft.reset();
        assert_eq!(draft, ProductDraft::default());
    }

    #[test]
    fn staged_images_ignore_blank_and_remove_by_index() {
        let mut images = StagedImages::default();
        images.add_url("  ");
        images.add_url("a");
        images.add_url("b");
        assert_eq!(images.len(), 2);
        assert_eq!(images.remove(5), None);
        assert_eq!(images.remove(0).as_deref(), Some("a"));
        assert_eq!(images.as_slice(), ["b".to_string()]);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ProductPatch {
            sold_out: Some(true),
            ..ProductPatch::default()
        }
        .with_price_text("99.5")
        .unwrap();
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"price": 99.5, "sold_out": true}));
    }

    #[test]
    fn patch_with_no_images_clears_image_url() {
        let patch = ProductPatch::default().with_images(Vec::new());
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"images": [], "image_url": null}));
    }

    #[test]
    fn empty_patch_rejected() {
        assert_eq!(
            ProductPatch::default().validate(),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn sku_only_patch_is_empty_without_sku_column() {
        let patch = ProductPatch {
            sku: Some("SKU-9".to_string()),
            ..ProductPatch::default()
        };
        assert!(!patch.for_schema(SchemaCapabilities::default()).is_empty());
        assert!(patch.for_schema(SchemaCapabilities::for_version(1)).is_empty());
    }

    #[test]
    fn patch_with_blank_name_rejected() {
        let patch = ProductPatch {
            name: Some(" ".to_string()),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::NameRequired));
    }
}
