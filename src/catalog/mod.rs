//! Catalog Module
//!
//! Data-access layer for marketplace reads. Every read goes through the
//! shared cache; every successful write invalidates the namespaces it touches.

mod cached;
mod memory;
pub mod models;
mod source;

pub use cached::*;
pub use memory::{MemoryCatalog, LOW_STOCK_THRESHOLD};
pub use models::{Brand, Business, Product, ProductQuery, Role, User, VendorDashboard};
pub use source::CatalogSource;
