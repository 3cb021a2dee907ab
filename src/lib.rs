//! Shopizon Cache - process-local TTL cache for the Shopizon marketplace
//!
//! Provides a cache-aside layer in front of catalog reads with TTL expiration,
//! insertion-order eviction and namespace invalidation, plus the HTTP
//! management endpoint used to clear it.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{generate_key, CacheStore, Namespace, SharedCache};
pub use config::Config;
