//! Per-key mutual exclusion.
//!
//! Operations on the same product (or the same representative) are
//! serialized; operations on different keys proceed in parallel. Waiting is
//! bounded: a caller that cannot take the key before its deadline gets
//! `None` back and must not touch the record.

use parking_lot::{Condvar, Mutex};
use shared_types::{AccountId, ProductCode};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Keys the registry serializes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockKey {
    Product(ProductCode),
    Manufacturer(AccountId),
}

/// A set of currently held keys plus a condvar to wait for release.
pub struct KeyLocks<K> {
    held: Mutex<HashSet<K>>,
    released: Condvar,
}

impl<K: Eq + Hash + Clone> KeyLocks<K> {
    pub fn new() -> Self {
        Self {
            held: Mutex::new(HashSet::new()),
            released: Condvar::new(),
        }
    }

    /// Take `key`, waiting at most `timeout`.
    pub fn acquire(&self, key: K, timeout: Duration) -> Option<KeyGuard<'_, K>> {
        let deadline = Instant::now() + timeout;
        let mut held = self.held.lock();
        while held.contains(&key) {
            if self.released.wait_until(&mut held, deadline).timed_out() && held.contains(&key) {
                return None;
            }
        }
        held.insert(key.clone());
        Some(KeyGuard { locks: self, key })
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.held.lock().len()
    }

    fn release(&self, key: &K) {
        self.held.lock().remove(key);
        self.released.notify_all();
    }
}

impl<K: Eq + Hash + Clone> Default for KeyLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases its key on drop.
pub struct KeyGuard<'a, K: Eq + Hash + Clone> {
    locks: &'a KeyLocks<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> KeyGuard<'_, K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Eq + Hash + Clone> Drop for KeyGuard<'_, K> {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}
