// crates/sitescope-core/src/loader/cache.rs

//! Memoization of loaded datasets, keyed by source.
//!
//! Loading is the only expensive step of a dashboard run; re-rendering a page
//! with the same inputs must not re-read the files. Values are shared
//! read-only through `Arc`.

use crate::error::Result;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug)]
pub struct DatasetCache<K, V> {
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K, V> Default for DatasetCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> DatasetCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Arc<V>>> {
        // A panic in another thread cannot leave a half-written entry behind.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value for `key`, or runs `load` and caches its
    /// result. Failed loads are not cached.
    pub fn get_or_try_load<F>(&self, key: &K, load: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(hit) = self.lock().get(key) {
            debug!("dataset cache hit: {:?}", key);
            return Ok(Arc::clone(hit));
        }

        // The lock is not held while loading.
        let value = Arc::new(load()?);
        let mut entries = self.lock();
        let stored = entries.entry(key.clone()).or_insert(value);
        Ok(Arc::clone(stored))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
