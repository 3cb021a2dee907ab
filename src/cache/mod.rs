//! Cache Module
//!
//! Process-local key/value cache with per-entry TTL, insertion-order capacity
//! eviction and namespace invalidation.

mod clock;
mod entry;
mod key;
mod namespace;
mod order;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{generate_key, operation_name, KEY_SEPARATOR};
pub use namespace::{Namespace, UnknownNamespace};
pub use order::InsertionOrder;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default time-to-live in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;
