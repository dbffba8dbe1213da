//! Per-key cancellable deadlines for coalescing rapid events.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Holds at most one pending value per key. Scheduling a key again cancels
/// the pending value and restarts its window.
///
/// Time is supplied by the caller, which keeps the debouncer deterministic
/// and lets the host drive it from whatever timer it has.
#[derive(Debug)]
pub struct Debouncer<K, V> {
    window: Duration,
    pending: HashMap<K, Pending<V>>,
}

#[derive(Debug)]
struct Pending<V> {
    deadline: Instant,
    value: V,
}

impl<K: Eq + Hash + Clone, V> Debouncer<K, V> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: HashMap::new() }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` for `key`, due one window after `now`.
    /// Returns `true` if a pending value was replaced.
    pub fn schedule(&mut self, key: K, value: V, now: Instant) -> bool {
        let deadline = now + self.window;
        self.pending.insert(key, Pending { deadline, value }).is_some()
    }

    /// Drop the pending value for `key`, if any.
    pub fn cancel(&mut self, key: &K) -> Option<V> {
        self.pending.remove(key).map(|p| p.value)
    }

    /// Mutable access to a pending value without touching its deadline.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.pending.get_mut(key).map(|p| &mut p.value)
    }

    /// Move a pending value to a new key, keeping its deadline.
    pub fn rekey(&mut self, old: &K, new: K) -> bool {
        match self.pending.remove(old) {
            Some(p) => {
                self.pending.insert(new, p);
                true
            }
            None => false,
        }
    }

    /// Remove and return every value whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, V)> {
        let due_keys: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(k, _)| k.clone())
            .collect();

        let mut due: Vec<(Instant, K, V)> = due_keys
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (p.deadline, k, p.value)))
            .collect();
        due.sort_by_key(|(deadline, _, _)| *deadline);
        due.into_iter().map(|(_, k, v)| (k, v)).collect()
    }

    /// Remove and return everything, regardless of deadline.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let mut all: Vec<(Instant, K, V)> =
            self.pending.drain().map(|(k, p)| (p.deadline, k, p.value)).collect();
        all.sort_by_key(|(deadline, _, _)| *deadline);
        all.into_iter().map(|(_, k, v)| (k, v)).collect()
    }

    /// Earliest pending deadline, for hosts that arm a single timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
