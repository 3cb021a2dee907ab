//! Backing store trait definition.

use async_trait::async_trait;

use super::models::{Brand, Business, Product, ProductQuery, User, VendorDashboard};
use crate::error::SourceError;

/// The source of truth behind the cache.
///
/// Implementations wrap whatever persistence the marketplace runs on. The
/// cache layer treats every call as opaque, possibly slow and possibly
/// failing.
///
/// # Example
///
/// ```ignore
/// struct Database { /* pool */ }
///
/// #[async_trait]
/// impl CatalogSource for Database {
///     async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, SourceError> {
///         // SELECT ... LIMIT query.limit OFFSET query.page * query.limit
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait CatalogSource: Send + Sync {
    // == Products ==
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, SourceError>;

    async fn product_by_id(&self, id: u64) -> Result<Option<Product>, SourceError>;

    /// Case-insensitive search over product names and descriptions.
    async fn search_products(&self, term: &str, limit: u32) -> Result<Vec<Product>, SourceError>;

    /// Inserts or replaces a product, returning the stored record.
    async fn save_product(&self, product: Product) -> Result<Product, SourceError>;

    /// Returns false when no product had that id.
    async fn delete_product(&self, id: u64) -> Result<bool, SourceError>;

    // == Users ==
    async fn list_users(&self) -> Result<Vec<User>, SourceError>;

    async fn user_by_id(&self, id: u64) -> Result<Option<User>, SourceError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, SourceError>;

    async fn save_user(&self, user: User) -> Result<User, SourceError>;

    // == Brands ==
    async fn list_brands(&self) -> Result<Vec<Brand>, SourceError>;

    async fn brand_by_id(&self, id: u64) -> Result<Option<Brand>, SourceError>;

    async fn save_brand(&self, brand: Brand) -> Result<Brand, SourceError>;

    // == Businesses ==
    async fn list_businesses(&self) -> Result<Vec<Business>, SourceError>;

    async fn business_by_id(&self, id: u64) -> Result<Option<Business>, SourceError>;

    async fn save_business(&self, business: Business) -> Result<Business, SourceError>;

    /// # Errors
    ///
    /// `SourceError::NotFound` if the business does not exist.
    async fn vendor_dashboard(&self, business_id: u64) -> Result<VendorDashboard, SourceError>;
}
