//! In-memory query cache with request coalescing and subscriber-aware
//! invalidation.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::subscription::Subscription;
use super::traits::{CacheEntry, QueryFn, QueryStatus, Snapshot};

type SharedFetch<Q> =
  Shared<BoxFuture<'static, Result<<Q as QueryFn>::Value, <Q as QueryFn>::Error>>>;

type Listener<Q> = mpsc::UnboundedSender<Snapshot<Q>>;

/// Timing knobs for the cache
#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
  /// Age after which a successful value is refetched on the next read
  pub stale_time: Duration,
  /// How long an unobserved entry survives before `collect_garbage` drops it
  pub gc_time: Duration,
}

impl Default for CacheOptions {
  fn default() -> Self {
    Self {
      stale_time: Duration::ZERO,
      gc_time: Duration::from_secs(300),
    }
  }
}

/// Cache store keyed by `Q::Key`.
///
/// Cloning is cheap and every clone shares the same entries, so one store is
/// built at startup and handed to every consumer. Entries are only touched
/// under a short, never-awaited lock; fetches run on spawned tasks and write
/// their result back when they resolve.
pub struct QueryCache<Q: QueryFn> {
  inner: Arc<Inner<Q>>,
}

struct Inner<Q: QueryFn> {
  query_fn: Q,
  stale_time: chrono::Duration,
  gc_time: chrono::Duration,
  state: Mutex<State<Q>>,
}

struct State<Q: QueryFn> {
  entries: HashMap<Q::Key, Slot<Q>>,
  next_generation: u64,
  next_subscriber: u64,
}

struct Slot<Q: QueryFn> {
  /// Changes whenever the key is evicted and re-created
  generation: u64,
  status: QueryStatus,
  value: Option<Q::Value>,
  error: Option<Q::Error>,
  invalidated: bool,
  updated_at: Option<DateTime<Utc>>,
  in_flight: Option<SharedFetch<Q>>,
  subscribers: HashMap<u64, Listener<Q>>,
  /// Last subscriber left; an in-flight result is dropped on arrival
  abandoned: bool,
  evict_at: Option<DateTime<Utc>>,
}

enum FetchPlan<Q: QueryFn> {
  Ready(Q::Value),
  Wait(SharedFetch<Q>),
}

impl<Q: QueryFn> QueryCache<Q> {
  pub fn new(query_fn: Q, options: CacheOptions) -> Self {
    Self {
      inner: Arc::new(Inner {
        query_fn,
        stale_time: to_chrono(options.stale_time),
        gc_time: to_chrono(options.gc_time),
        state: Mutex::new(State {
          entries: HashMap::new(),
          next_generation: 0,
          next_subscriber: 0,
        }),
      }),
    }
  }

  /// Current entry for `key`, starting a fetch if it is missing, idle, failed
  /// or stale and none is running yet.
  ///
  /// An invalidated entry nobody observes is evicted here and loaded from
  /// scratch, so its old value is never shown.
  pub fn read(&self, key: &Q::Key) -> Snapshot<Q> {
    let mut state = self.lock();
    self.evict_if_abandoned(&mut state, key);

    let now = Utc::now();
    let slot = self.slot_mut(&mut state, key);
    if slot.in_flight.is_none() && self.needs_fetch(slot, now) {
      self.start_fetch(key, slot);
    }
    self.snapshot(key, slot, now)
  }

  /// Read-through fetch.
  ///
  /// Resolves with the cached value when it is fresh, otherwise with the
  /// result of the single in-flight fetch for `key`, which all concurrent
  /// callers share.
  pub async fn fetch(&self, key: &Q::Key) -> Result<Q::Value, Q::Error> {
    let plan: FetchPlan<Q> = {
      let mut state = self.lock();
      self.evict_if_abandoned(&mut state, key);

      let now = Utc::now();
      let slot = self.slot_mut(&mut state, key);
      if let Some(pending) = &slot.in_flight {
        FetchPlan::Wait(pending.clone())
      } else if let Some(value) = slot.value.clone().filter(|_| !self.needs_fetch(slot, now)) {
        FetchPlan::Ready(value)
      } else {
        FetchPlan::Wait(self.start_fetch(key, slot))
      }
    };

    match plan {
      FetchPlan::Ready(value) => Ok(value),
      FetchPlan::Wait(pending) => pending.await,
    }
  }

  /// Mark entries stale.
  ///
  /// Observed entries are refetched right away; unobserved ones are only
  /// marked and get evicted on their next access. A key that already has a
  /// fetch in flight is satisfied by that fetch.
  pub fn invalidate<'a, I>(&self, keys: I)
  where
    I: IntoIterator<Item = &'a Q::Key>,
  {
    let mut state = self.lock();
    let now = Utc::now();

    for key in keys {
      let Some(slot) = state.entries.get_mut(key) else {
        trace!(%key, "invalidate: not cached");
        continue;
      };

      slot.invalidated = true;

      if slot.subscribers.is_empty() {
        debug!(%key, "invalidated (unobserved, refetch deferred)");
      } else if slot.in_flight.is_some() {
        debug!(%key, "invalidated (coalesced with in-flight fetch)");
        self.notify(key, slot, now);
      } else {
        debug!(%key, subscribers = slot.subscribers.len(), "invalidated, refetching");
        self.start_fetch(key, slot);
      }
    }
  }

  /// Force a refetch of `key` whether or not anyone observes it
  pub fn refetch(&self, key: &Q::Key) -> Snapshot<Q> {
    let mut state = self.lock();
    let now = Utc::now();
    let slot = self.slot_mut(&mut state, key);
    slot.invalidated = true;
    if slot.in_flight.is_none() {
      self.start_fetch(key, slot);
    }
    self.snapshot(key, slot, now)
  }

  /// Register interest in `key`. Dropping the subscription unsubscribes.
  ///
  /// Subscribing does not fetch by itself; call `read` (or
  /// `Subscription::read`) to load.
  pub fn subscribe(&self, key: &Q::Key) -> Subscription<Q> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut state = self.lock();
    self.evict_if_abandoned(&mut state, key);

    let id = state.next_subscriber;
    state.next_subscriber += 1;

    let now = Utc::now();
    let slot = self.slot_mut(&mut state, key);
    slot.subscribers.insert(id, tx);
    slot.abandoned = false;
    slot.evict_at = None;
    trace!(%key, id, subscribers = slot.subscribers.len(), "subscribed");

    let current = self.snapshot(key, slot, now);
    drop(state);

    Subscription::new(self.clone(), key.clone(), id, rx, current)
  }

  pub(super) fn unsubscribe(&self, key: &Q::Key, id: u64) {
    let mut state = self.lock();
    let gc_time = self.inner.gc_time;

    let Some(slot) = state.entries.get_mut(key) else {
      return;
    };

    slot.subscribers.remove(&id);
    trace!(%key, id, subscribers = slot.subscribers.len(), "unsubscribed");

    if slot.subscribers.is_empty() {
      slot.abandoned = true;
      slot.evict_at = Some(Utc::now() + gc_time);
    }
  }

  /// Snapshot without side effects
  pub fn get(&self, key: &Q::Key) -> Option<Snapshot<Q>> {
    let state = self.lock();
    let now = Utc::now();
    state
      .entries
      .get(key)
      .map(|slot| self.snapshot(key, slot, now))
  }

  /// Drop unobserved, idle entries whose eviction deadline has passed.
  /// Returns the number of entries removed.
  pub fn collect_garbage(&self) -> usize {
    let mut state = self.lock();
    let now = Utc::now();
    let before = state.entries.len();

    state.entries.retain(|key, slot| {
      let expired = slot.subscribers.is_empty()
        && slot.in_flight.is_none()
        && slot.evict_at.is_some_and(|at| now >= at);
      if expired {
        debug!(%key, "evicted");
      }
      !expired
    });

    before - state.entries.len()
  }

  /// Number of cached keys
  pub fn len(&self) -> usize {
    self.lock().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  // Internals

  fn lock(&self) -> MutexGuard<'_, State<Q>> {
    // Entries stay consistent even if a holder panicked
    self
      .inner
      .state
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
  }

  fn slot_mut<'s>(&self, state: &'s mut State<Q>, key: &Q::Key) -> &'s mut Slot<Q> {
    let gc_time = self.inner.gc_time;
    let State {
      entries,
      next_generation,
      ..
    } = state;

    entries.entry(key.clone()).or_insert_with(|| {
      let generation = *next_generation;
      *next_generation += 1;
      trace!(%key, generation, "new entry");
      Slot {
        generation,
        status: QueryStatus::Idle,
        value: None,
        error: None,
        invalidated: false,
        updated_at: None,
        in_flight: None,
        subscribers: HashMap::new(),
        abandoned: false,
        evict_at: Some(Utc::now() + gc_time),
      }
    })
  }

  fn evict_if_abandoned(&self, state: &mut State<Q>, key: &Q::Key) {
    let evict = state.entries.get(key).is_some_and(|slot| {
      slot.invalidated && slot.subscribers.is_empty() && slot.in_flight.is_none()
    });
    if evict {
      debug!(%key, "evicting stale unobserved entry on access");
      state.entries.remove(key);
    }
  }

  fn is_stale(&self, slot: &Slot<Q>, now: DateTime<Utc>) -> bool {
    slot.invalidated
      || slot
        .updated_at
        .map_or(true, |at| now - at >= self.inner.stale_time)
  }

  fn needs_fetch(&self, slot: &Slot<Q>, now: DateTime<Utc>) -> bool {
    match slot.status {
      QueryStatus::Idle | QueryStatus::Error => true,
      QueryStatus::Loading => false,
      QueryStatus::Success => self.is_stale(slot, now),
    }
  }

  /// Start a fetch for `key` unless one is running, returning the shared
  /// handle either way. Must be called with the state lock held.
  fn start_fetch(&self, key: &Q::Key, slot: &mut Slot<Q>) -> SharedFetch<Q> {
    if let Some(pending) = &slot.in_flight {
      trace!(%key, "fetch coalesced");
      return pending.clone();
    }

    debug!(%key, generation = slot.generation, "fetch started");
    // Someone asked for this value again, so keep the result when it lands
    slot.abandoned = false;
    let pending = self.inner.query_fn.fetch(key).shared();
    slot.in_flight = Some(pending.clone());
    slot.status = QueryStatus::Loading;
    self.notify(key, slot, Utc::now());

    let cache = self.clone();
    let key = key.clone();
    let generation = slot.generation;
    let driver = pending.clone();
    tokio::spawn(async move {
      let result = driver.await;
      cache.complete(&key, generation, result);
    });

    pending
  }

  fn complete(&self, key: &Q::Key, generation: u64, result: Result<Q::Value, Q::Error>) {
    let mut state = self.lock();
    let now = Utc::now();

    let Some(slot) = state.entries.get_mut(key) else {
      trace!(%key, "result for evicted entry dropped");
      return;
    };
    if slot.generation != generation {
      trace!(%key, "result for replaced entry dropped");
      return;
    }

    slot.in_flight = None;

    if slot.abandoned && slot.subscribers.is_empty() {
      debug!(%key, "result discarded, no subscribers left");
      state.entries.remove(key);
      return;
    }

    match result {
      Ok(value) => {
        debug!(%key, "fetch succeeded");
        slot.status = QueryStatus::Success;
        slot.value = Some(value);
        slot.error = None;
        slot.updated_at = Some(now);
      }
      Err(error) => {
        debug!(%key, %error, "fetch failed");
        slot.status = QueryStatus::Error;
        slot.value = None;
        slot.error = Some(error);
      }
    }
    slot.invalidated = false;

    self.notify(key, slot, now);
  }

  fn notify(&self, key: &Q::Key, slot: &mut Slot<Q>, now: DateTime<Utc>) {
    if slot.subscribers.is_empty() {
      return;
    }
    let snapshot = self.snapshot(key, slot, now);
    slot
      .subscribers
      .retain(|_, listener| listener.send(snapshot.clone()).is_ok());
  }

  fn snapshot(&self, key: &Q::Key, slot: &Slot<Q>, now: DateTime<Utc>) -> Snapshot<Q> {
    CacheEntry {
      key: key.clone(),
      status: slot.status,
      value: slot.value.clone(),
      error: slot.error.clone(),
      is_stale: slot.value.is_some() && self.is_stale(slot, now),
      updated_at: slot.updated_at,
      subscribers: slot.subscribers.len(),
    }
  }
}

impl<Q: QueryFn> Clone for QueryCache<Q> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

fn to_chrono(d: Duration) -> chrono::Duration {
  // Anything beyond a century is treated as "never"
  let ceiling = chrono::Duration::days(36_500);
  chrono::Duration::from_std(d).map_or(ceiling, |d| d.min(ceiling))
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  /// Fake query function: each fetch returns the running call count for its
  /// key after a short delay. Keys starting with "fail" return an error.
  #[derive(Clone, Default)]
  pub(crate) struct CountingFn {
    calls: Arc<AtomicUsize>,
  }

  impl CountingFn {
    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl QueryFn for CountingFn {
    type Key = String;
    type Value = usize;
    type Error = String;

    fn fetch(&self, key: &String) -> BoxFuture<'static, Result<usize, String>> {
      let calls = Arc::clone(&self.calls);
      let fail = key.starts_with("fail");
      async move {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(20)).await;
        if fail {
          Err(format!("fetch {} failed", n))
        } else {
          Ok(n)
        }
      }
      .boxed()
    }
  }

  fn cache_with(stale_time: Duration, gc_time: Duration) -> (QueryCache<CountingFn>, CountingFn) {
    let query_fn = CountingFn::default();
    let cache = QueryCache::new(
      query_fn.clone(),
      CacheOptions {
        stale_time,
        gc_time,
      },
    );
    (cache, query_fn)
  }

  fn key(s: &str) -> String {
    s.to_string()
  }

  async fn settle() {
    tokio::time::sleep(Duration::from_millis(80)).await;
  }

  #[tokio::test]
  async fn test_concurrent_fetches_share_one_request() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    let (a, b, c) = tokio::join!(cache.fetch(&k), cache.fetch(&k), cache.fetch(&k));

    assert_eq!(query_fn.calls(), 1);
    assert_eq!(a, Ok(1));
    assert_eq!(b, Ok(1));
    assert_eq!(c, Ok(1));
  }

  #[tokio::test]
  async fn test_concurrent_reads_share_one_request() {
    let (cache, query_fn) = cache_with(Duration::ZERO, Duration::from_secs(60));
    let k = key("invoice:1");

    let first = cache.read(&k);
    let second = cache.read(&k);
    assert!(first.is_loading());
    assert!(second.is_loading());
    assert!(first.value().is_none());

    settle().await;
    assert_eq!(query_fn.calls(), 1);
    let entry = cache.get(&k).unwrap();
    assert!(entry.is_success());
    assert_eq!(entry.value(), Some(&1));
  }

  #[tokio::test]
  async fn test_fresh_value_is_served_from_cache() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    assert_eq!(cache.fetch(&k).await, Ok(1));
    settle().await;
    let entry = cache.read(&k);

    assert!(entry.is_success());
    assert!(!entry.is_stale);
    assert_eq!(entry.value(), Some(&1));
    assert_eq!(query_fn.calls(), 1);
  }

  #[tokio::test]
  async fn test_stale_value_kept_while_refetching() {
    let (cache, query_fn) = cache_with(Duration::ZERO, Duration::from_secs(60));
    let k = key("invoice-list");

    assert_eq!(cache.fetch(&k).await, Ok(1));
    settle().await;

    let entry = cache.read(&k);
    assert!(entry.is_loading());
    assert_eq!(entry.value(), Some(&1));

    settle().await;
    assert_eq!(cache.get(&k).unwrap().value(), Some(&2));
    assert_eq!(query_fn.calls(), 2);
  }

  #[tokio::test]
  async fn test_invalidate_refetches_observed_key() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice:3");

    let mut sub = cache.subscribe(&k);
    sub.read();
    settle().await;
    sub.poll();
    assert_eq!(sub.entry().value(), Some(&1));

    cache.invalidate([&k]);
    settle().await;
    sub.poll();

    assert_eq!(query_fn.calls(), 2);
    assert!(sub.entry().is_success());
    assert!(!sub.entry().is_stale);
    assert_eq!(sub.entry().value(), Some(&2));
  }

  #[tokio::test]
  async fn test_invalidate_unobserved_key_issues_no_request() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    assert_eq!(cache.fetch(&k).await, Ok(1));
    settle().await;
    cache.invalidate([&k]);
    settle().await;

    assert_eq!(query_fn.calls(), 1);
    let entry = cache.get(&k).unwrap();
    assert!(entry.is_stale);
    assert_eq!(entry.value(), Some(&1));

    // Next access evicts the stale value and loads from scratch
    let entry = cache.read(&k);
    assert!(entry.is_loading());
    assert!(entry.value().is_none());
    settle().await;
    assert_eq!(query_fn.calls(), 2);
  }

  #[tokio::test]
  async fn test_invalidate_missing_key_is_noop() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    cache.invalidate([&key("invoice:99")]);
    assert!(cache.is_empty());
    assert_eq!(query_fn.calls(), 0);
  }

  #[tokio::test]
  async fn test_repeated_invalidation_coalesces() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice:3");

    let mut sub = cache.subscribe(&k);
    sub.read();
    settle().await;

    cache.invalidate([&k]);
    cache.invalidate([&k]);
    settle().await;
    sub.poll();

    assert_eq!(query_fn.calls(), 2);
    assert_eq!(sub.entry().value(), Some(&2));
    assert!(!sub.entry().is_stale);
  }

  #[tokio::test]
  async fn test_subscriber_sees_loading_then_success() {
    let (cache, _) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    let mut sub = cache.subscribe(&k);
    assert_eq!(sub.entry().status, QueryStatus::Idle);
    assert_eq!(sub.entry().subscribers, 1);

    sub.read();
    assert!(sub.entry().is_loading());

    let first = tokio::time::timeout(Duration::from_secs(1), sub.changed())
      .await
      .unwrap()
      .unwrap();
    assert!(first.is_loading());

    let entry = tokio::time::timeout(Duration::from_secs(1), sub.changed())
      .await
      .unwrap()
      .unwrap();
    assert!(entry.is_success());
    assert_eq!(entry.value(), Some(&1));
  }

  #[tokio::test]
  async fn test_error_clears_value_and_retries_on_read() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("fail:1");

    assert_eq!(cache.fetch(&k).await, Err("fetch 1 failed".to_string()));
    settle().await;
    let entry = cache.get(&k).unwrap();
    assert!(entry.is_error());
    assert!(entry.value().is_none());
    assert_eq!(entry.error().map(String::as_str), Some("fetch 1 failed"));

    assert!(cache.read(&k).is_loading());
    settle().await;
    assert_eq!(query_fn.calls(), 2);
  }

  #[tokio::test]
  async fn test_result_discarded_when_sole_subscriber_leaves() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice:7");

    let mut sub = cache.subscribe(&k);
    sub.read();
    drop(sub);

    settle().await;
    assert_eq!(query_fn.calls(), 1);
    assert!(cache.get(&k).is_none());
  }

  #[tokio::test]
  async fn test_shared_fetch_survives_one_of_two_unsubscribes() {
    let (cache, _) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice:7");

    let mut kept = cache.subscribe(&k);
    let gone = cache.subscribe(&k);
    kept.read();
    drop(gone);

    settle().await;
    kept.poll();
    assert_eq!(kept.entry().value(), Some(&1));
    assert_eq!(kept.entry().subscribers, 1);
  }

  #[tokio::test]
  async fn test_last_unsubscribe_schedules_eviction() {
    let (cache, _) = cache_with(Duration::from_secs(60), Duration::from_secs(3600));
    let k = key("invoice-list");

    let mut sub = cache.subscribe(&k);
    sub.read();
    settle().await;
    drop(sub);

    // Deadline not reached yet
    assert_eq!(cache.collect_garbage(), 0);
    assert!(cache.get(&k).is_some());
  }

  #[tokio::test]
  async fn test_collect_garbage_keeps_observed_entries() {
    let (cache, _) = cache_with(Duration::from_secs(60), Duration::ZERO);
    let observed = key("invoice:1");
    let unobserved = key("invoice:2");

    let mut sub = cache.subscribe(&observed);
    sub.read();
    cache.fetch(&unobserved).await.unwrap();
    settle().await;

    assert_eq!(cache.collect_garbage(), 1);
    assert!(cache.get(&observed).is_some());
    assert!(cache.get(&unobserved).is_none());
  }

  #[tokio::test]
  async fn test_refetch_ignores_subscriber_count() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    cache.fetch(&k).await.unwrap();
    settle().await;
    let entry = cache.refetch(&k);
    assert!(entry.is_loading());
    assert_eq!(entry.value(), Some(&1));

    settle().await;
    assert_eq!(query_fn.calls(), 2);
    assert_eq!(cache.get(&k).unwrap().value(), Some(&2));
  }

  #[tokio::test]
  async fn test_refetch_after_last_unsubscribe_keeps_result() {
    let (cache, query_fn) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice-list");

    let mut sub = cache.subscribe(&k);
    sub.read();
    settle().await;
    drop(sub);

    let entry = cache.refetch(&k);
    assert!(entry.is_loading());
    assert_eq!(entry.value(), Some(&1));

    settle().await;
    assert_eq!(query_fn.calls(), 2);
    let entry = cache.get(&k).unwrap();
    assert!(entry.is_success());
    assert_eq!(entry.value(), Some(&2));
  }

  #[tokio::test]
  async fn test_refetching_entry_reports_stale_value() {
    let (cache, _) = cache_with(Duration::from_secs(60), Duration::from_secs(60));
    let k = key("invoice:3");

    let mut sub = cache.subscribe(&k);
    sub.read();
    settle().await;
    sub.poll();
    assert!(!sub.entry().is_stale);

    cache.invalidate([&k]);
    let entry = cache.get(&k).unwrap();
    assert!(entry.is_loading());
    assert!(entry.is_stale);
    assert_eq!(entry.value(), Some(&1));

    // A second invalidation rides on the running fetch and says so
    cache.invalidate([&k]);
    sub.poll();
    assert!(sub.entry().is_loading());
    assert!(sub.entry().is_stale);

    settle().await;
    sub.poll();
    assert!(sub.entry().is_success());
    assert!(!sub.entry().is_stale);
  }

  #[tokio::test]
  async fn test_first_load_is_not_stale() {
    let (cache, _) = cache_with(Duration::ZERO, Duration::from_secs(60));
    let entry = cache.read(&key("invoice:1"));
    assert!(entry.is_loading());
    assert!(!entry.is_stale);
  }
}
