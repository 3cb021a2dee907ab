//! Catalog records
//!
//! Plain data returned by the backing store and cached as JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price_cents: u64,
    pub stock: u32,
    pub brand_id: Option<u64>,
    pub business_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: u64,
    pub name: String,
}

/// A vendor's registered business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
}

/// Aggregated numbers shown on a vendor's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorDashboard {
    pub business_id: u64,
    pub product_count: u64,
    pub total_stock: u64,
    pub low_stock_products: Vec<u64>,
}

/// Paging and filter parameters for product listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<u64>,
    pub page: u32,
    pub limit: u32,
}
