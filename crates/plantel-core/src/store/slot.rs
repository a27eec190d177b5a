// ── Generation-tracked query slot ──
//
// One cached query result with push-based change notification via a
// `watch` channel. Freshness is tracked with generation counters so a
// response that started before an invalidation never counts as fresh.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::watch;

use crate::error::CoreError;

const NEVER_FETCHED: u64 = u64::MAX;

/// A single cached query result.
///
/// `generation` is bumped by every invalidation. `fetched_at` records the
/// generation a stored value was *requested* at. The value is fresh only
/// while the two are equal.
pub(crate) struct QuerySlot<T: Send + Sync + 'static> {
    value: watch::Sender<Option<Arc<T>>>,
    generation: AtomicU64,
    fetched_at: AtomicU64,
}

impl<T: Send + Sync + 'static> QuerySlot<T> {
    pub(crate) fn new() -> Self {
        let (value, _) = watch::channel(None);
        Self {
            value,
            generation: AtomicU64::new(0),
            fetched_at: AtomicU64::new(NEVER_FETCHED),
        }
    }

    /// The cached value, only if it was fetched at the current generation.
    pub(crate) fn fresh(&self) -> Option<Arc<T>> {
        if self.is_fresh() {
            self.value.borrow().clone()
        } else {
            None
        }
    }

    pub(crate) fn is_fresh(&self) -> bool {
        self.fetched_at.load(Ordering::Acquire) == self.generation.load(Ordering::Acquire)
    }

    /// Last stored value, fresh or not.
    pub(crate) fn latest(&self) -> Option<Arc<T>> {
        self.value.borrow().clone()
    }

    /// Record the generation a fetch is starting at.
    pub(crate) fn begin_fetch(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store a response fetched at `generation` and notify subscribers.
    ///
    /// A response requested before a later invalidation is stored but
    /// leaves the slot stale. A response older than the stored value is
    /// dropped and the stored value is returned instead.
    pub(crate) fn store(&self, generation: u64, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let mut kept = None;
        // The watch write lock orders concurrent stores.
        self.value.send_if_modified(|current| {
            let stored_at = self.fetched_at.load(Ordering::Acquire);
            if stored_at != NEVER_FETCHED && generation < stored_at {
                kept.clone_from(current);
                return false;
            }
            *current = Some(Arc::clone(&value));
            self.fetched_at.store(generation, Ordering::Release);
            true
        });
        kept.unwrap_or(value)
    }

    /// Mark the slot stale.
    pub(crate) fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<Arc<T>>> {
        self.value.subscribe()
    }

    /// `true` while at least one [`QueryStream`](crate::QueryStream) is alive.
    pub(crate) fn has_subscribers(&self) -> bool {
        self.value.receiver_count() > 0
    }

    /// Return the fresh value or run `fetch` and store its result.
    ///
    /// A failed fetch stores nothing and leaves the slot as it was.
    pub(crate) async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<T>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if let Some(value) = self.fresh() {
            return Ok(value);
        }
        self.refetch(fetch).await
    }

    /// Fetch unconditionally and store the result.
    pub(crate) async fn refetch<F, Fut>(&self, fetch: F) -> Result<Arc<T>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let generation = self.begin_fetch();
        let value = fetch().await?;
        Ok(self.store(generation, value))
    }
}

// ── Keyed slots ──────────────────────────────────────────────────────

/// Slots for a parameterized query, one per distinct key.
pub(crate) struct SlotMap<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    slots: DashMap<K, Arc<QuerySlot<T>>>,
}

impl<K, T> SlotMap<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// The slot for `key`, created empty on first use.
    pub(crate) fn slot(&self, key: &K) -> Arc<QuerySlot<T>> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(
            self.slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(QuerySlot::new()))
                .value(),
        )
    }

    /// Mark every slot stale and drop the ones nobody subscribes to.
    pub(crate) fn invalidate_all(&self) {
        self.slots.retain(|_, slot| {
            slot.invalidate();
            slot.has_subscribers()
        });
    }

    /// Keys whose slot currently has live subscribers.
    pub(crate) fn watched_keys(&self) -> Vec<K> {
        self.slots
            .iter()
            .filter(|entry| entry.value().has_subscribers())
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
