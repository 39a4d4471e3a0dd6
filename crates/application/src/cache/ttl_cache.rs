use compact_str::CompactString;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::ports::Clock;

/// Called with the key and value pushed out by capacity pressure.
pub type EvictionListener<V> = Box<dyn Fn(&str, &V) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    /// Milliseconds since the Unix epoch, from the cache's clock.
    pub inserted_at: u64,
}

type Inner<V> = LruCache<CompactString, CacheEntry<V>, FxBuildHasher>;

/// Fixed-capacity LRU map whose entries expire lazily on read.
///
/// The TTL is not a property of the cache: each read passes the TTL of the
/// layer doing the read, so one store can back lookups with different
/// freshness requirements. An entry is stale once more than `ttl` has passed
/// since it was inserted.
pub struct TtlCache<V> {
    inner: Mutex<Inner<V>>,
    clock: Arc<dyn Clock>,
    on_evict: Option<EvictionListener<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            clock,
            on_evict: None,
        }
    }

    pub fn with_eviction_listener(mut self, listener: EvictionListener<V>) -> Self {
        self.on_evict = Some(listener);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_stale(&self, entry: &CacheEntry<V>, ttl: Duration, now: u64) -> bool {
        now.saturating_sub(entry.inserted_at) > ttl.as_millis() as u64
    }

    /// Fresh value for `key`, promoting it to most recently used.
    /// A stale entry is removed and reported as a miss.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<V> {
        let now = self.clock.now_millis();
        let mut cache = self.lock();
        let stale = match cache.get(key) {
            Some(entry) if !self.is_stale(entry, ttl, now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if stale {
            cache.pop(key);
        }
        None
    }

    /// Like [`get`](Self::get) but leaves recency untouched.
    pub fn peek(&self, key: &str, ttl: Duration) -> Option<V> {
        let now = self.clock.now_millis();
        let cache = self.lock();
        cache
            .peek(key)
            .filter(|entry| !self.is_stale(entry, ttl, now))
            .map(|entry| entry.value.clone())
    }

    /// Inserts or replaces `key`, stamping it with the current time.
    pub fn set(&self, key: &str, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now_millis(),
        };
        let evicted = self.lock().push(CompactString::new(key), entry);

        if let (Some((evicted_key, evicted_entry)), Some(listener)) = (evicted, &self.on_evict) {
            // push() also hands back the old value when replacing the same key
            if evicted_key.as_str() != key {
                listener(&evicted_key, &evicted_entry.value);
            }
        }
    }

    pub fn delete(&self, key: &str) -> bool {
        self.lock().pop(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Entries currently held, stale ones included until they are read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}
