//! Shared query cache.
//!
//! Reads are keyed by a deterministic identifier and stored once for the
//! whole app:
//! - Concurrent reads of one key share a single in-flight request
//! - Invalidated keys with live subscribers are refetched immediately
//! - Invalidated keys nobody observes are evicted and reloaded on next access
//! - Unobserved entries are dropped after a grace period

mod store;
mod subscription;
mod traits;

pub use store::{CacheOptions, QueryCache};
pub use subscription::Subscription;
pub use traits::{CacheEntry, QueryFn};
#[cfg(test)]
pub use traits::Snapshot;
