//! Request deduplication for one pipeline run

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

/// Map of key to the one shared resolution for that key.
///
/// Concurrent callers asking for the same key await the same future; finished
/// results stay cached until the map is dropped at the end of the run.
pub struct RequestDedup<K, V>
where
    V: Clone,
{
    in_flight: Mutex<HashMap<K, Shared<BoxFuture<'static, V>>>>,
}

impl<K, V> RequestDedup<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { in_flight: Mutex::new(HashMap::new()) }
    }

    /// Resolve `key`, starting `fetch` only if no resolution exists yet
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = {
            let mut in_flight = self.in_flight.lock();
            in_flight.entry(key).or_insert_with(|| fetch().boxed().shared()).clone()
        };
        shared.await
    }

    /// Number of distinct keys requested so far
    pub fn len(&self) -> usize {
        self.in_flight.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.lock().is_empty()
    }
}

impl<K, V> Default for RequestDedup<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
