//! Hosted-backend access for the storefront: product rows, object storage,
//! the shop catalog loader and the admin console.

pub mod admin;
pub mod catalog;
pub mod client;
pub mod error;
mod objects;

pub use admin::{
    AdminConsole, AdminError, Confirm, DeleteOutcome, ImageFile, ProductDraft, ProductPatch,
    SchemaCapabilities, ValidationError,
};
pub use catalog::load_catalog;
pub use client::BackendClient;
pub use error::BackendError;
