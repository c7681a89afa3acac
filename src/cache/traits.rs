//! Core traits and types for the query cache.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::fmt;
use std::hash::Hash;

/// How the cache loads a value for a key.
///
/// This is the only seam between the cache and the network: the cache decides
/// *when* to fetch, the implementor decides *how*. `fetch` only builds the
/// future; the cache drives it at most once per key at a time.
pub trait QueryFn: Send + Sync + 'static {
  /// Deterministic identifier of a read (resource type + parameters)
  type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;
  /// Loaded value, cloned out to every reader
  type Value: Clone + Send + Sync + 'static;
  /// Load failure, shared with every reader that waited on it
  type Error: Clone + fmt::Display + Send + Sync + 'static;

  fn fetch(&self, key: &Self::Key) -> BoxFuture<'static, Result<Self::Value, Self::Error>>;
}

/// Lifecycle of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
  /// Known key, never fetched
  Idle,
  /// A fetch is in flight
  Loading,
  /// Last fetch succeeded
  Success,
  /// Last fetch failed
  Error,
}

/// Point-in-time view of a cache entry, handed to readers and subscribers.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V, E> {
  pub key: K,
  pub status: QueryStatus,
  /// Absent during the first load and after an error. Kept while refetching.
  pub value: Option<V>,
  pub error: Option<E>,
  /// Invalidated, or older than the configured stale time
  pub is_stale: bool,
  /// When the current value arrived
  pub updated_at: Option<DateTime<Utc>>,
  /// Number of live subscriptions on this key
  pub subscribers: usize,
}

impl<K, V, E> CacheEntry<K, V, E> {
  pub fn is_loading(&self) -> bool {
    self.status == QueryStatus::Loading
  }

  pub fn is_success(&self) -> bool {
    self.status == QueryStatus::Success
  }

  pub fn is_error(&self) -> bool {
    self.status == QueryStatus::Error
  }

  pub fn value(&self) -> Option<&V> {
    self.value.as_ref()
  }

  pub fn error(&self) -> Option<&E> {
    self.error.as_ref()
  }
}

/// Snapshot type for a given query function
pub type Snapshot<Q> =
  CacheEntry<<Q as QueryFn>::Key, <Q as QueryFn>::Value, <Q as QueryFn>::Error>;
