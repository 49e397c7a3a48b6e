//! Node arena: the cost table and predecessor table of one search.
//!
//! Each distinct state is interned once and addressed by a dense [`NodeId`]
//! assigned in discovery order. The per-node record holds the best known
//! accumulated cost and the predecessor along that cheapest path.

use std::collections::HashMap;
use std::hash::Hash;

/// Dense node identifier, assigned in discovery order (start = 0).
pub type NodeId = u32;

/// Cost-so-far and predecessor of one interned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    /// Best known accumulated cost from the start (unit steps).
    pub cost: u64,
    /// Predecessor on the cheapest known path (`None` for the start).
    pub parent: Option<NodeId>,
}

/// Outcome of offering a (state, cost) pair to the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// First time this state was seen.
    Discovered(NodeId),
    /// Known state, strictly cheaper than its recorded cost.
    Improved(NodeId),
    /// Known state, not cheaper. Tables unchanged.
    NotImproved(NodeId),
}

/// Cost and predecessor tables for a single search invocation.
///
/// Invariant: for every interned node, `records[id].parent` is the
/// predecessor on the path whose cost is `records[id].cost`. Costs only
/// ever decrease.
#[derive(Debug, Clone)]
pub struct SearchTables<S> {
    states: Vec<S>,
    records: Vec<NodeRecord>,
    index: HashMap<S, NodeId>,
}

impl<S: Clone + Eq + Hash> SearchTables<S> {
    /// Create tables holding only the start state at cost 0.
    #[must_use]
    pub fn with_start(start: S) -> Self {
        let mut index = HashMap::new();
        index.insert(start.clone(), 0);
        Self {
            states: vec![start],
            records: vec![NodeRecord {
                cost: 0,
                parent: None,
            }],
            index,
        }
    }

    /// Record `state` reached from `parent` at `cost` if that is an improvement.
    ///
    /// Takes ownership of `state`; it is stored only when first discovered.
    pub fn relax(&mut self, state: S, parent: NodeId, cost: u64) -> Relaxation {
        if let Some(&id) = self.index.get(&state) {
            let record = &mut self.records[id as usize];
            if cost < record.cost {
                record.cost = cost;
                record.parent = Some(parent);
                return Relaxation::Improved(id);
            }
            return Relaxation::NotImproved(id);
        }

        // Node ids are u32; a search that discovers more states than that
        // has long since exhausted memory.
        #[allow(clippy::cast_possible_truncation)]
        let id = self.states.len() as NodeId;
        self.index.insert(state.clone(), id);
        self.states.push(state);
        self.records.push(NodeRecord {
            cost,
            parent: Some(parent),
        });
        Relaxation::Discovered(id)
    }

    /// Look up the node id of a state, if it has been discovered.
    #[must_use]
    pub fn id_of(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// Reconstruct the start-to-`goal` path by walking predecessor links.
    ///
    /// Iterative, so path length is bounded only by memory. Calling it any
    /// number of times on the same tables yields identical sequences.
    ///
    /// # Panics
    ///
    /// Panics if `goal` was not issued by these tables.
    #[must_use]
    pub fn reconstruct_path(&self, goal: NodeId) -> Vec<S> {
        self.path_ids(goal)
            .into_iter()
            .map(|id| self.states[id as usize].clone())
            .collect()
    }

    /// Node ids along the start-to-`goal` path.
    ///
    /// # Panics
    ///
    /// Panics if `goal` was not issued by these tables.
    #[must_use]
    pub fn path_ids(&self, goal: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut current = Some(goal);
        while let Some(id) = current {
            ids.push(id);
            current = self.records[id as usize].parent;
        }
        ids.reverse();
        ids
    }
}

impl<S> SearchTables<S> {
    /// Infallible lookup for ids issued by these tables.
    pub(crate) fn state_at(&self, id: NodeId) -> &S {
        &self.states[id as usize]
    }

    /// Best known cost for ids issued by these tables.
    pub(crate) fn cost_at(&self, id: NodeId) -> u64 {
        self.records[id as usize].cost
    }

    /// The state interned under `id`.
    #[must_use]
    pub fn state(&self, id: NodeId) -> Option<&S> {
        self.states.get(id as usize)
    }

    /// The cost/predecessor record of `id`.
    #[must_use]
    pub fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.records.get(id as usize)
    }

    /// Number of distinct states discovered (including the start).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: the start state is interned on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate `(id, state, record)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &S, &NodeRecord)> {
        self.states
            .iter()
            .zip(self.records.iter())
            .enumerate()
            .map(|(i, (s, r))| {
                #[allow(clippy::cast_possible_truncation)]
                let id = i as NodeId;
                (id, s, r)
            })
    }
}

/// The frontier ordering key: `(priority, sequence)`.
///
/// Lower priority first; equal priorities pop in insertion order, so states
/// never need to be comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    /// `cost + heuristic`, saturating.
    pub priority: u64,
    /// Monotonic push counter for FIFO tie-breaking.
    pub sequence: u64,
}
