//! Min-priority frontier with FIFO tie-breaking.
//!
//! Entries are never removed or decreased in place. A node whose cost
//! improves is pushed again; the older entry stays behind and is recognized
//! as stale when popped (its recorded cost exceeds the node's best cost).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, NodeId};

/// A popped frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Ordering key at push time.
    pub key: FrontierKey,
    /// The node this entry refers to.
    pub node: NodeId,
    /// The node's cost when this entry was pushed.
    pub cost: u64,
    /// Heuristic estimate of the node (`0` marks a goal).
    pub estimate: u64,
}

/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest `(priority, sequence)` first. The node id does not take part in
/// ordering: sequences are unique.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
    cost: u64,
    estimate: u64,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Owns the sequence counter, so every push gets a strictly larger sequence
/// than the one before it.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<HeapEntry>,
    next_sequence: u64,
    high_water: u64,
}

impl Frontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `node` reached at `cost` with heuristic `estimate`.
    ///
    /// Priority is `cost + estimate`, saturating at `u64::MAX`.
    pub fn push(&mut self, node: NodeId, cost: u64, estimate: u64) -> FrontierKey {
        let key = FrontierKey {
            priority: cost.saturating_add(estimate),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(HeapEntry {
            key: Reverse(key),
            node,
            cost,
            estimate,
        });
        self.high_water = self.high_water.max(self.heap.len() as u64);
        key
    }

    /// Pop the entry with the lowest priority (oldest among equals).
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|e| FrontierEntry {
            key: e.key.0,
            node: e.node,
            cost: e.cost,
            estimate: e.estimate,
        })
    }

    /// Current number of entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Total number of pushes so far.
    #[must_use]
    pub fn pushes(&self) -> u64 {
        self.next_sequence
    }
}
