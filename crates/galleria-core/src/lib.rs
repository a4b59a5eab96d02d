pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod lenient;
pub mod order;
pub mod page;
pub mod products;
pub mod storage;

pub use app_config::{AppConfig, BackendCredentials, Environment};
pub use cart::{CartItem, CartStore, CART_STORAGE_KEY};
pub use catalog::{CatalogView, CategoryFilter};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError, StorageError};
pub use format::{clamp_int, money, IntoQuantity};
pub use order::{compose_order_text, ContactInfo, OrderDraft};
pub use page::PageRole;
pub use products::{Product, ProductId, ProductStatus};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
