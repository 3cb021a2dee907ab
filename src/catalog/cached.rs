//! Cached data-access layer
//!
//! Routes catalog reads through the shared cache and invalidates the matching
//! namespaces after successful writes.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use super::models::{Brand, Business, Product, ProductQuery, User, VendorDashboard};
use super::source::CatalogSource;
use crate::cache::{Namespace, SharedCache};
use crate::error::SourceError;

// Operation names double as cache key prefixes; namespace invalidation
// depends on them.
pub const GET_PRODUCTS: &str = "getProducts";
pub const GET_PRODUCT_BY_ID: &str = "getProductById";
pub const SEARCH_PRODUCTS: &str = "searchProducts";
pub const GET_USERS: &str = "getUsers";
pub const GET_USER_BY_ID: &str = "getUserById";
pub const GET_USER_BY_EMAIL: &str = "getUserByEmail";
pub const GET_BRANDS: &str = "getBrands";
pub const GET_BRAND_BY_ID: &str = "getBrandById";
pub const GET_BUSINESSES: &str = "getBusinesses";
pub const GET_BUSINESS_BY_ID: &str = "getBusinessById";
pub const GET_VENDOR_DASHBOARD: &str = "getVendorDashboard";

// == Cached Catalog ==
/// Cache-aside wrapper around a [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct CachedCatalog<S> {
    source: S,
    cache: SharedCache,
    ttl: Option<Duration>,
}

impl<S: CatalogSource> CachedCatalog<S> {
    /// Wraps `source`, caching reads with the store's default TTL.
    pub fn new(source: S, cache: SharedCache) -> Self {
        Self {
            source,
            cache,
            ttl: None,
        }
    }

    /// Overrides the TTL used for every cached read.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Products ==
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, SourceError> {
        let params = json!({
            "brandId": query.brand_id,
            "businessId": query.business_id,
            "page": query.page,
            "limit": query.limit,
        });
        self.cache
            .get_or_fetch(GET_PRODUCTS, Some(&params), self.ttl, || {
                self.source.list_products(query)
            })
            .await
    }

    pub async fn get_product_by_id(&self, id: u64) -> Result<Option<Product>, SourceError> {
        self.cache
            .get_or_fetch(GET_PRODUCT_BY_ID, Some(&json!({ "id": id })), self.ttl, || {
                self.source.product_by_id(id)
            })
            .await
    }

    pub async fn search_products(&self, term: &str, limit: u32) -> Result<Vec<Product>, SourceError> {
        let params = json!({ "term": term, "limit": limit });
        self.cache
            .get_or_fetch(SEARCH_PRODUCTS, Some(&params), self.ttl, || {
                self.source.search_products(term, limit)
            })
            .await
    }

    /// Saves a product and drops cached product listings and dashboards.
    pub async fn save_product(&self, product: Product) -> Result<Product, SourceError> {
        let saved = self.source.save_product(product).await?;
        self.invalidate(&[Namespace::Products, Namespace::Businesses]).await;
        Ok(saved)
    }

    pub async fn delete_product(&self, id: u64) -> Result<bool, SourceError> {
        let removed = self.source.delete_product(id).await?;
        self.invalidate(&[Namespace::Products, Namespace::Businesses]).await;
        Ok(removed)
    }

    // == Users ==
    pub async fn get_users(&self) -> Result<Vec<User>, SourceError> {
        self.cache
            .get_or_fetch(GET_USERS, None, self.ttl, || self.source.list_users())
            .await
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<User>, SourceError> {
        self.cache
            .get_or_fetch(GET_USER_BY_ID, Some(&json!({ "id": id })), self.ttl, || {
                self.source.user_by_id(id)
            })
            .await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, SourceError> {
        // Lookups are case-insensitive, so the key is too
        let email = email.to_lowercase();
        self.cache
            .get_or_fetch(GET_USER_BY_EMAIL, Some(&json!({ "email": email })), self.ttl, || {
                self.source.user_by_email(&email)
            })
            .await
    }

    pub async fn save_user(&self, user: User) -> Result<User, SourceError> {
        let saved = self.source.save_user(user).await?;
        self.invalidate(&[Namespace::Users]).await;
        Ok(saved)
    }

    // == Brands ==
    pub async fn get_brands(&self) -> Result<Vec<Brand>, SourceError> {
        self.cache
            .get_or_fetch(GET_BRANDS, None, self.ttl, || self.source.list_brands())
            .await
    }

    pub async fn get_brand_by_id(&self, id: u64) -> Result<Option<Brand>, SourceError> {
        self.cache
            .get_or_fetch(GET_BRAND_BY_ID, Some(&json!({ "id": id })), self.ttl, || {
                self.source.brand_by_id(id)
            })
            .await
    }

    pub async fn save_brand(&self, brand: Brand) -> Result<Brand, SourceError> {
        let saved = self.source.save_brand(brand).await?;
        self.invalidate(&[Namespace::Brands]).await;
        Ok(saved)
    }

    // == Businesses ==
    pub async fn get_businesses(&self) -> Result<Vec<Business>, SourceError> {
        self.cache
            .get_or_fetch(GET_BUSINESSES, None, self.ttl, || self.source.list_businesses())
            .await
    }

    pub async fn get_business_by_id(&self, id: u64) -> Result<Option<Business>, SourceError> {
        self.cache
            .get_or_fetch(GET_BUSINESS_BY_ID, Some(&json!({ "id": id })), self.ttl, || {
                self.source.business_by_id(id)
            })
            .await
    }

    pub async fn get_vendor_dashboard(&self, business_id: u64) -> Result<VendorDashboard, SourceError> {
        let params = json!({ "businessId": business_id });
        self.cache
            .get_or_fetch(GET_VENDOR_DASHBOARD, Some(&params), self.ttl, || {
                self.source.vendor_dashboard(business_id)
            })
            .await
    }

    pub async fn save_business(&self, business: Business) -> Result<Business, SourceError> {
        let saved = self.source.save_business(business).await?;
        self.invalidate(&[Namespace::Businesses]).await;
        Ok(saved)
    }

    async fn invalidate(&self, namespaces: &[Namespace]) {
        for namespace in namespaces {
            let removed = self.cache.invalidate(*namespace).await;
            debug!(namespace = %namespace, removed, "Invalidated after write");
        }
    }
}
