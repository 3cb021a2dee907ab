//! Request DTOs for the cache management API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::Namespace;
use crate::error::ApiError;

/// Action requested on the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Invalidate one namespace, or everything with `all`
    Clear,
}

/// Request body for POST /api/cache
///
/// # Fields
/// - `action`: What to do (only `clear` is accepted)
/// - `type`: Namespace tag to act on (defaults to `all`)
///
/// Both are kept as raw strings so unknown values surface as a 400 with a
/// readable message rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheRequest {
    pub action: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl CacheRequest {
    /// Validates the request and resolves it into a typed action and tag.
    pub fn validate(&self) -> Result<(CacheAction, Namespace), ApiError> {
        let action = match self.action.as_str() {
            "clear" => CacheAction::Clear,
            other => {
                return Err(ApiError::InvalidRequest(format!(
                    "Unsupported action '{}'",
                    other
                )))
            }
        };

        let namespace = match self.kind.as_deref() {
            None => Namespace::All,
            Some(tag) => tag.parse::<Namespace>()?,
        };

        Ok((action, namespace))
    }
}
