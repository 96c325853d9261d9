use futures::future::{
    BoxFuture,
    FutureExt,
    Shared,
};
use std::{
    collections::{
        hash_map::Entry,
        HashMap,
    },
    fmt::Debug,
    future::Future,
    hash::Hash,
};
use tracing::{
    debug,
    error,
};

/// A map of in-flight requests.
///
/// Callers asking for a key that is already being fetched wait on the same request.
#[derive(Debug)]
pub struct RequestMap<K, V> {
    map: parking_lot::Mutex<HashMap<K, Shared<BoxFuture<'static, V>>>>,
}

impl<K, V> RequestMap<K, V> {
    /// Make a new [`RequestMap`]
    pub fn new() -> Self {
        Self {
            map: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// The number of requests in flight
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    /// Returns true if nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}

impl<K, V> RequestMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Join the request for this key, or start it with `fetch_future_func` if there is none.
    pub async fn get_or_fetch<FN, F>(&self, key: K, fetch_future_func: FN) -> V
    where
        FN: FnOnce() -> F,
        F: Future<Output = V> + Send + 'static,
    {
        let (_maybe_guard, shared_future) = {
            let mut map = self.map.lock();

            match map.entry(key.clone()) {
                Entry::Occupied(entry) => {
                    debug!("joining in-flight request for `{key:?}`");

                    // Only the task that started the request may remove it.
                    (None, entry.get().clone())
                }
                Entry::Vacant(entry) => {
                    let shared_future = fetch_future_func().boxed().shared();
                    entry.insert(shared_future.clone());

                    // The guard removes the entry even if this task is cancelled.
                    let drop_guard = RequestMapDropGuard { key, map: self };

                    (Some(drop_guard), shared_future)
                }
            }
        };

        shared_future.await
    }
}

impl<K, V> Default for RequestMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes a key from the request map when dropped
struct RequestMapDropGuard<'a, K, V>
where
    K: Eq + Hash + Debug,
{
    key: K,
    map: &'a RequestMap<K, V>,
}

impl<K, V> Drop for RequestMapDropGuard<'_, K, V>
where
    K: Eq + Hash + Debug,
{
    fn drop(&mut self) {
        // Panicking in a destructor could abort.
        if self.map.map.lock().remove(&self.key).is_none() {
            error!("key `{:?}` was unexpectedly cleaned up", self.key);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    };

    #[tokio::test]
    async fn concurrent_requests_share_one_fetch() {
        let map: RequestMap<&'static str, usize> = RequestMap::new();
        let fetches = Arc::new(AtomicUsize::new(0));

        let fetch = || {
            let fetches = fetches.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                fetches.fetch_add(1, Ordering::SeqCst) + 1
            }
        };

        let (a, b) = tokio::join!(
            map.get_or_fetch("bolt", fetch),
            map.get_or_fetch("bolt", fetch)
        );
        assert_eq!(a, 1);
        assert_eq!(b, 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(map.is_empty());

        // Finished requests are not reused.
        let c = map.get_or_fetch("bolt", fetch).await;
        assert_eq!(c, 2);
    }
}
