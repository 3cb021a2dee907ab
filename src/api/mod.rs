//! API Module
//!
//! HTTP handlers and routing for the cache management API.
//!
//! # Endpoints
//! - `POST /api/cache` - Invalidate a namespace
//! - `GET /api/cache` - Status probe
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
