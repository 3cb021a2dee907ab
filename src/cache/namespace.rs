//! Namespace Module
//!
//! Invalidation tags and the operation names each tag covers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::key::operation_name;

// == Namespace ==
/// Domain tag naming a group of cached operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Products,
    Users,
    Brands,
    Businesses,
    /// Every entry, regardless of operation
    All,
}

/// Operation-name substrings invalidated by each tag.
const PRODUCT_OPERATIONS: &[&str] = &["getProducts", "getProductById", "searchProducts"];
const USER_OPERATIONS: &[&str] = &["getUsers", "getUserById", "getUserByEmail"];
const BRAND_OPERATIONS: &[&str] = &["getBrands", "getBrandById"];
const BUSINESS_OPERATIONS: &[&str] = &["getBusinesses", "getBusinessById", "getVendorDashboard"];

impl Namespace {
    /// Every tag, in the order the management endpoint lists them.
    pub const ALL_TAGS: [Namespace; 5] = [
        Namespace::Products,
        Namespace::Users,
        Namespace::Brands,
        Namespace::Businesses,
        Namespace::All,
    ];

    /// Returns the tag's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Products => "products",
            Namespace::Users => "users",
            Namespace::Brands => "brands",
            Namespace::Businesses => "businesses",
            Namespace::All => "all",
        }
    }

    /// Returns the operation-name substrings this tag invalidates.
    ///
    /// `All` has no table; it matches every key.
    pub fn operations(&self) -> &'static [&'static str] {
        match self {
            Namespace::Products => PRODUCT_OPERATIONS,
            Namespace::Users => USER_OPERATIONS,
            Namespace::Brands => BRAND_OPERATIONS,
            Namespace::Businesses => BUSINESS_OPERATIONS,
            Namespace::All => &[],
        }
    }

    /// Checks whether a cache key belongs to this namespace.
    ///
    /// Only the operation-name portion of the key is inspected, so parameter
    /// values that happen to contain an operation name never match.
    pub fn matches(&self, key: &str) -> bool {
        if *self == Namespace::All {
            return true;
        }
        let operation = operation_name(key);
        self.operations()
            .iter()
            .any(|pattern| operation.contains(pattern))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Parse Error ==
/// Returned when a tag name is not one of the known namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown cache namespace '{0}'")]
pub struct UnknownNamespace(pub String);

impl FromStr for Namespace {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL_TAGS
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownNamespace(s.to_string()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::generate_key;
    use serde_json::json;

    #[test]
    fn test_parse_known_tags() {
        for tag in Namespace::ALL_TAGS {
            assert_eq!(tag.as_str().parse::<Namespace>(), Ok(tag));
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "orders".parse::<Namespace>().unwrap_err();
        assert_eq!(err, UnknownNamespace("orders".to_string()));
        assert!("Products".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_products_matches_its_operations() {
        let tag = Namespace::Products;
        assert!(tag.matches(&generate_key("getProducts", None)));
        assert!(tag.matches(&generate_key("getProductById", Some(&json!({"id": 3})))));
        assert!(tag.matches(&generate_key("searchProducts", Some(&json!({"q": "hat"})))));
        assert!(!tag.matches(&generate_key("getUsers", None)));
    }

    #[test]
    fn test_substring_matching_is_coarse() {
        // Any operation containing a listed name is covered
        assert!(Namespace::Products.matches("getProductsByBrand:{}"));
        assert!(Namespace::Users.matches("getUserByIdWithOrders:{}"));
    }

    #[test]
    fn test_params_are_not_inspected() {
        let key = generate_key("getBrands", Some(&json!({"note": "getProducts"})));
        assert!(!Namespace::Products.matches(&key));
        assert!(Namespace::Brands.matches(&key));
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(Namespace::All.matches("anything:{}"));
        assert!(Namespace::All.matches("no-separator"));
    }

    #[test]
    fn test_serde_lowercase() {
        let tag: Namespace = serde_json::from_str(r#""businesses""#).unwrap();
        assert_eq!(tag, Namespace::Businesses);
        assert_eq!(serde_json::to_string(&Namespace::All).unwrap(), r#""all""#);
    }
}
