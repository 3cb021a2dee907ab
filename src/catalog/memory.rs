//! In-memory catalog source
//!
//! A `CatalogSource` backed by ordered maps. Used for local runs and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{Brand, Business, Product, ProductQuery, User, VendorDashboard};
use super::source::CatalogSource;
use crate::error::SourceError;

/// Products at or below this stock level are flagged on the dashboard.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<u64, Product>,
    users: BTreeMap<u64, User>,
    brands: BTreeMap<u64, Brand>,
    businesses: BTreeMap<u64, Business>,
}

// == Memory Catalog ==
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, SourceError> {
        let tables = self.tables.read().await;
        let matching = tables.products.values().filter(|p| {
            query.brand_id.map_or(true, |id| p.brand_id == Some(id))
                && query.business_id.map_or(true, |id| p.business_id == id)
        });

        // limit 0 means no paging
        let page: Vec<Product> = if query.limit == 0 {
            matching.cloned().collect()
        } else {
            matching
                .skip(query.page as usize * query.limit as usize)
                .take(query.limit as usize)
                .cloned()
                .collect()
        };
        Ok(page)
    }

    async fn product_by_id(&self, id: u64) -> Result<Option<Product>, SourceError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn search_products(&self, term: &str, limit: u32) -> Result<Vec<Product>, SourceError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let tables = self.tables.read().await;
        let hits = tables
            .products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .take(if limit == 0 { usize::MAX } else { limit as usize })
            .cloned()
            .collect();
        Ok(hits)
    }

    async fn save_product(&self, product: Product) -> Result<Product, SourceError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.contains_key(&product.business_id) {
            return Err(SourceError::Rejected(format!(
                "business {} does not exist",
                product.business_id
            )));
        }
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: u64) -> Result<bool, SourceError> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>, SourceError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn user_by_id(&self, id: u64) -> Result<Option<User>, SourceError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, SourceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save_user(&self, user: User) -> Result<User, SourceError> {
        let mut tables = self.tables.write().await;
        let email_taken = tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if email_taken {
            return Err(SourceError::Rejected(format!(
                "email {} already registered",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, SourceError> {
        Ok(self.tables.read().await.brands.values().cloned().collect())
    }

    async fn brand_by_id(&self, id: u64) -> Result<Option<Brand>, SourceError> {
        Ok(self.tables.read().await.brands.get(&id).cloned())
    }

    async fn save_brand(&self, brand: Brand) -> Result<Brand, SourceError> {
        self.tables.write().await.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn list_businesses(&self) -> Result<Vec<Business>, SourceError> {
        Ok(self.tables.read().await.businesses.values().cloned().collect())
    }

    async fn business_by_id(&self, id: u64) -> Result<Option<Business>, SourceError> {
        Ok(self.tables.read().await.businesses.get(&id).cloned())
    }

    async fn save_business(&self, business: Business) -> Result<Business, SourceError> {
        self.tables
            .write()
            .await
            .businesses
            .insert(business.id, business.clone());
        Ok(business)
    }

    async fn vendor_dashboard(&self, business_id: u64) -> Result<VendorDashboard, SourceError> {
        let tables = self.tables.read().await;
        if !tables.businesses.contains_key(&business_id) {
            return Err(SourceError::NotFound(format!("business {}", business_id)));
        }

        let owned: Vec<&Product> = tables
            .products
            .values()
            .filter(|p| p.business_id == business_id)
            .collect();

        Ok(VendorDashboard {
            business_id,
            product_count: owned.len() as u64,
            total_stock: owned.iter().map(|p| p.stock as u64).sum(),
            low_stock_products: owned
                .iter()
                .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
                .map(|p| p.id)
                .collect(),
        })
    }
}
