//! API Handlers
//!
//! HTTP request handlers for the cache management endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CacheAction, CacheActionResponse, CacheRequest, CacheStatusResponse, HealthResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache handle built by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SharedCache::from_config(config))
    }
}

/// Handler for POST /api/cache
///
/// Invalidates the namespace named in the request body.
pub async fn cache_action_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CacheRequest>, JsonRejection>,
) -> Result<Json<CacheActionResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected cache management body");
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    let (action, namespace) = req.validate().inspect_err(|err| {
        warn!(error = %err, "Rejected cache management request");
    })?;

    let removed = match action {
        CacheAction::Clear => state.cache.invalidate(namespace).await,
    };
    info!(namespace = %namespace, removed, "Cache cleared via management API");

    Ok(Json(CacheActionResponse::cleared(namespace, removed)))
}

/// Handler for GET /api/cache
///
/// Static liveness probe for the management API.
pub async fn cache_status_handler() -> Json<CacheStatusResponse> {
    Json(CacheStatusResponse::active())
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
