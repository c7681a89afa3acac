use tokio::sync::mpsc;

use super::store::QueryCache;
use super::traits::{QueryFn, Snapshot};

/// Live interest in one cache key.
///
/// The cache pushes a fresh snapshot on every state change; `poll` drains
/// them without blocking so views can call it once per tick. Dropping the
/// subscription unsubscribes.
pub struct Subscription<Q: QueryFn> {
  cache: QueryCache<Q>,
  key: Q::Key,
  id: u64,
  rx: mpsc::UnboundedReceiver<Snapshot<Q>>,
  current: Snapshot<Q>,
}

impl<Q: QueryFn> Subscription<Q> {
  pub(super) fn new(
    cache: QueryCache<Q>,
    key: Q::Key,
    id: u64,
    rx: mpsc::UnboundedReceiver<Snapshot<Q>>,
    current: Snapshot<Q>,
  ) -> Self {
    Self {
      cache,
      key,
      id,
      rx,
      current,
    }
  }

  /// Latest snapshot seen
  pub fn entry(&self) -> &Snapshot<Q> {
    &self.current
  }

  /// Apply pending updates. Returns true if anything changed.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Ok(snapshot) = self.rx.try_recv() {
      self.current = snapshot;
      changed = true;
    }
    changed
  }

  /// Read through the cache, loading if the entry is missing or stale
  pub fn read(&mut self) -> &Snapshot<Q> {
    self.current = self.cache.read(&self.key);
    &self.current
  }

  /// Force a reload of this key
  pub fn refetch(&mut self) -> &Snapshot<Q> {
    self.current = self.cache.refetch(&self.key);
    &self.current
  }

  /// Wait for the next pushed update
  pub async fn changed(&mut self) -> Option<Snapshot<Q>> {
    let snapshot = self.rx.recv().await?;
    self.current = snapshot.clone();
    Some(snapshot)
  }
}

impl<Q: QueryFn> Drop for Subscription<Q> {
  fn drop(&mut self) {
    self.cache.unsubscribe(&self.key, self.id);
  }
}

impl<Q: QueryFn> std::fmt::Debug for Subscription<Q> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("key", &self.key)
      .field("id", &self.id)
      .field("status", &self.current.status)
      .finish()
  }
}
