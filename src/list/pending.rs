//! Per-row in-flight flags.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

/// Counted set of keys with an action in flight.
///
/// Counting lets two overlapping actions on the same row keep the flag up
/// until both have settled.
#[derive(Debug)]
pub(crate) struct PendingSet<K> {
    counts: Arc<Mutex<HashMap<K, usize>>>,
}

impl<K> Clone for PendingSet<K> {
    fn clone(&self) -> Self {
        Self {
            counts: Arc::clone(&self.counts),
        }
    }
}

impl<K> Default for PendingSet<K> {
    fn default() -> Self {
        Self {
            counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K: Clone + Eq + Hash> PendingSet<K> {
    /// Raises the flag for `key` until the returned guard drops.
    pub fn acquire(&self, key: K) -> PendingGuard<K> {
        *self.counts.lock().entry(key.clone()).or_insert(0) += 1;
        PendingGuard {
            set: self.clone(),
            key: Some(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    fn release(&self, key: &K) {
        let mut counts = self.counts.lock();
        if let Some(count) = counts.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                counts.remove(key);
            }
        }
    }
}

/// Clears one pending flag on drop.
#[derive(Debug)]
pub(crate) struct PendingGuard<K: Clone + Eq + Hash> {
    set: PendingSet<K>,
    key: Option<K>,
}

impl<K: Clone + Eq + Hash> Drop for PendingGuard<K> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.set.release(&key);
        }
    }
}
