use std::collections::{HashMap, TryReserveError};
use std::hash::Hash;

struct Entry<K, V> {
    priority: u32,
    // Arrival order, breaks ties between equal priorities
    seq: u64,
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    fn precedes(&self, other: &Self) -> bool {
        (self.priority, self.seq) < (other.priority, other.seq)
    }
}

/// A binary min-heap keyed by `K`, which supports lowering the priority of an
/// entry already in the queue.
///
/// Entries with equal priority pop in arrival (FIFO) order. Lowering a
/// priority keeps the entry's original arrival position.
pub struct PriorityQueue<K, V> {
    heap: Vec<Entry<K, V>>,
    // Maps each key to its current slot in `heap`
    slots: HashMap<K, usize>,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash, V> PriorityQueue<K, V> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Allocated slots. Grows by amortized doubling.
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Value and priority currently queued under `key`.
    pub fn get(&self, key: &K) -> Option<(&V, u32)> {
        let entry = &self.heap[*self.slots.get(key)?];
        Some((&entry.value, entry.priority))
    }

    /// Insert a new entry. `key` must not already be queued.
    ///
    /// Fails without modifying the queue if memory cannot be reserved.
    pub fn push(&mut self, key: K, priority: u32, value: V) -> Result<(), TryReserveError> {
        debug_assert!(!self.slots.contains_key(&key), "key already queued");
        self.heap.try_reserve(1)?;
        self.slots.try_reserve(1)?;

        let slot = self.heap.len();
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            key,
            value,
        });
        self.next_seq += 1;
        self.slots.insert(key, slot);
        self.sift_up(slot);
        Ok(())
    }

    /// Remove and return the entry with the lowest priority.
    pub fn pop_min(&mut self) -> Option<(K, V, u32)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.value, entry.priority))
    }

    /// Lower the priority of a queued entry. Returns `false` if `key` is not
    /// queued or `priority` is not lower than its current one.
    pub fn decrease_priority(&mut self, key: &K, priority: u32) -> bool {
        let Some(&slot) = self.slots.get(key) else {
            return false;
        };
        if priority >= self.heap[slot].priority {
            return false;
        }
        self.heap[slot].priority = priority;
        self.sift_up(slot);
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].key, a);
        self.slots.insert(self.heap[b].key, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.heap[slot].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

impl<K: Copy + Eq + Hash, V> Default for PriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
