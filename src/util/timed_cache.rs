use dashmap::DashMap;
use parking_lot::Mutex;
use std::{
    borrow::Borrow,
    hash::Hash,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

/// 5 minutes
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// A cache with entries that go stale after a per-cache time limit.
///
/// Stale entries are never returned, but stay in memory until the next trim.
pub struct TimedCache<K, V>(Arc<TimedCacheInner<K, V>>);

struct TimedCacheInner<K, V> {
    cache: DashMap<K, Arc<TimedCacheEntry<V>>>,
    last_trim: Mutex<Instant>,

    stale_time: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    /// Create a cache with the default stale time
    pub fn new() -> Self {
        Self::with_stale_time(DEFAULT_STALE_TIME)
    }

    /// Create a cache where entries go stale after `stale_time`.
    ///
    /// A zero stale time disables caching.
    pub fn with_stale_time(stale_time: Duration) -> Self {
        TimedCache(Arc::new(TimedCacheInner {
            cache: DashMap::new(),
            last_trim: Mutex::new(Instant::now()),

            stale_time,
        }))
    }

    /// The time until an entry goes stale
    pub fn stale_time(&self) -> Duration {
        self.0.stale_time
    }

    /// Get a value if fresh, or None if it doesn't exist or is stale
    pub fn get_if_fresh<Q>(&self, key: &Q) -> Option<Arc<TimedCacheEntry<V>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.cache.get(key).and_then(|entry| {
            if entry.is_fresh(self.0.stale_time) {
                Some(entry.value().clone())
            } else {
                None
            }
        })
    }

    /// Insert a K/V and return the newly inserted entry
    pub fn insert_and_get(&self, key: K, value: V) -> Arc<TimedCacheEntry<V>> {
        let entry = Arc::new(TimedCacheEntry::new(value));
        self.0.cache.insert(key, entry.clone());
        entry
    }

    /// Remove stale entries, if the last trim was over a stale time ago.
    ///
    /// Returns true if a trim happened.
    pub fn trim(&self) -> bool {
        let mut last_trim = self.0.last_trim.lock();
        if last_trim.elapsed() > self.0.stale_time {
            *last_trim = Instant::now();
            drop(last_trim);
            self.force_trim();

            true
        } else {
            false
        }
    }

    /// Remove stale entries, ignoring the last trim time.
    pub fn force_trim(&self) {
        let stale_time = self.0.stale_time;
        self.0.cache.retain(|_, entry| entry.is_fresh(stale_time));
    }

    /// Gets the number of entries. Includes stale entries.
    pub fn len(&self) -> usize {
        self.0.cache.len()
    }

    /// Checks if cache is empty. Includes stale entries.
    pub fn is_empty(&self) -> bool {
        self.0.cache.is_empty()
    }
}

impl<K, V> Default for TimedCache<K, V>
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for TimedCache<K, V> {
    fn clone(&self) -> Self {
        TimedCache(self.0.clone())
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + std::fmt::Debug + Hash,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("cache", &self.0.cache)
            .field("stale_time", &self.0.stale_time)
            .finish()
    }
}

/// A cached value and the time it was fetched
#[derive(Debug)]
pub struct TimedCacheEntry<T> {
    data: T,
    last_update: Instant,
}

impl<T> TimedCacheEntry<T> {
    /// Make an entry fetched just now, without putting it in a cache
    pub fn new(data: T) -> Self {
        Self {
            data,
            last_update: Instant::now(),
        }
    }

    /// Returns true if this entry is younger than `stale_time`
    pub fn is_fresh(&self, stale_time: Duration) -> bool {
        self.last_update.elapsed() < stale_time
    }

    /// Get data ref
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The time since this entry was fetched
    pub fn age(&self) -> Duration {
        self.last_update.elapsed()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_entries_are_returned() {
        let cache = TimedCache::new();
        cache.insert_and_get("bolt", 3);

        let entry = cache.get_if_fresh("bolt").expect("missing entry");
        assert_eq!(*entry.data(), 3);
        assert!(cache.get_if_fresh("shock").is_none());
    }

    #[test]
    fn zero_stale_time_disables_caching() {
        let cache = TimedCache::with_stale_time(Duration::ZERO);
        let entry = cache.insert_and_get("bolt", 3);

        assert_eq!(*entry.data(), 3);
        assert!(cache.get_if_fresh("bolt").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn trim_removes_stale_entries() {
        let cache = TimedCache::with_stale_time(Duration::from_millis(20));
        cache.insert_and_get("bolt", 3);
        std::thread::sleep(Duration::from_millis(40));
        cache.insert_and_get("shock", 2);

        assert!(cache.trim());
        assert_eq!(cache.len(), 1);
        assert!(cache.get_if_fresh("shock").is_some());

        // Too soon
        assert!(!cache.trim());
    }
}
