//! Response DTOs for the cache management API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, Namespace};

/// Response body for POST /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheActionResponse {
    pub success: bool,
    pub message: String,
    /// Namespace that was invalidated
    #[serde(rename = "type")]
    pub kind: Namespace,
    /// Number of entries removed
    pub removed: usize,
}

impl CacheActionResponse {
    /// Creates a success response for a completed invalidation
    pub fn cleared(namespace: Namespace, removed: usize) -> Self {
        let message = match namespace {
            Namespace::All => "All cache cleared".to_string(),
            tag => format!("Cache cleared for {}", tag),
        };
        Self {
            success: true,
            message,
            kind: namespace,
            removed,
        }
    }
}

/// Response body for the status probe (GET /api/cache)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatusResponse {
    /// Always "active"
    pub status: String,
    pub message: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl CacheStatusResponse {
    pub fn active() -> Self {
        Self {
            status: "active".to_string(),
            message: "Cache management API is running".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
