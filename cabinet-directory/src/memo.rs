use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Slot<V> {
    value: V,
    /// `None` when the TTL is too large to represent.
    expires_at: Option<Instant>,
}

impl<V> Slot<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Per-key memo of fetched values with a fixed lifetime.
///
/// Slots expire `ttl` after insertion. Every insert at least `ttl` after
/// the previous sweep drops all expired slots, so keys that are never read
/// again do not accumulate. A zero TTL stores nothing.
#[derive(Clone)]
pub struct Memo<K, V> {
    slots: Arc<DashMap<K, Slot<V>>>,
    next_sweep: Arc<Mutex<Option<Instant>>>,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V: Clone> Memo<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            next_sweep: Arc::new(Mutex::new(Instant::now().checked_add(ttl))),
            ttl,
        }
    }

    /// The memoized value, if still fresh. A stale slot is dropped.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        if let Some(slot) = self.slots.get(key) {
            if slot.is_fresh(now) {
                return Some(slot.value.clone());
            }
        }
        self.slots.remove_if(key, |_, slot| !slot.is_fresh(now));
        None
    }

    pub fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        let now = Instant::now();
        self.sweep(now);
        self.slots.insert(
            key,
            Slot {
                value,
                expires_at: now.checked_add(self.ttl),
            },
        );
    }

    pub fn remove(&self, key: &K) -> bool {
        self.slots.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Stored slots, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn sweep(&self, now: Instant) {
        let Ok(mut next_sweep) = self.next_sweep.lock() else {
            return;
        };
        match *next_sweep {
            Some(at) if now >= at => *next_sweep = now.checked_add(self.ttl),
            _ => return,
        }
        drop(next_sweep);

        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.is_fresh(now));
        tracing::trace!(dropped = before.saturating_sub(self.slots.len()), "memo swept");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn hit_and_miss() {
        let memo = Memo::new(Duration::from_secs(60));
        memo.insert("12", vec!["Ministre"]);
        assert_eq!(memo.get(&"12"), Some(vec!["Ministre"]));
        assert_eq!(memo.get(&"13"), None);
    }

    #[test]
    fn stale_slot_is_dropped_on_read() {
        let memo = Memo::new(Duration::from_millis(30));
        memo.insert(1, "a");
        sleep(Duration::from_millis(50));
        assert_eq!(memo.get(&1), None);
        assert!(memo.is_empty());
    }

    #[test]
    fn zero_ttl_stores_nothing() {
        let memo = Memo::new(Duration::ZERO);
        memo.insert(1, "a");
        assert_eq!(memo.get(&1), None);
        assert!(memo.is_empty());
    }

    #[test]
    fn insert_sweeps_unread_stale_slots() {
        let memo = Memo::new(Duration::from_millis(5));
        for id in 0..1000 {
            memo.insert(id, id);
        }
        sleep(Duration::from_millis(20));
        for id in 1000..1010 {
            memo.insert(id, id);
        }
        assert!(memo.len() <= 10, "{} slots kept", memo.len());
    }

    #[test]
    fn unbounded_ttl_never_expires() {
        let memo = Memo::new(Duration::MAX);
        memo.insert(1, "a");
        assert_eq!(memo.get(&1), Some("a"));
    }

    #[test]
    fn remove_and_clear() {
        let memo = Memo::new(Duration::from_secs(60));
        memo.insert(1, "a");
        memo.insert(2, "b");
        assert!(memo.remove(&1));
        assert!(!memo.remove(&1));
        assert_eq!(memo.len(), 1);
        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn clones_share_slots() {
        let memo = Memo::new(Duration::from_secs(60));
        let other = memo.clone();
        other.insert("k", 1);
        assert_eq!(memo.get(&"k"), Some(1));
    }
}
