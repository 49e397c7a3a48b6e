//! `SearchTraceV1`: frontier-pop audit log.
//!
//! The ordered list of [`PopEventV1`] entries is the decision surface of a
//! search. Only arena node ids appear in it, never state contents, so any
//! state type can be traced and two runs can be compared byte-for-byte.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};
use crate::node::{FrontierKey, NodeId};

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A state with heuristic `0` was popped.
    GoalReached { node: NodeId },
    /// The frontier emptied without reaching a goal.
    FrontierExhausted,
    /// `max_expansions` entries were expanded and the next popped entry was
    /// not a goal.
    ExpansionBudgetExceeded,
    /// The caller's stop predicate returned `true`.
    Cancelled,
}

impl TerminationReasonV1 {
    /// Stable identifier used in JSON artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::Cancelled => "cancelled",
        }
    }

    /// JSON form as embedded in traces and run reports.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Self::GoalReached { node } => {
                serde_json::json!({"node": node, "type": self.as_str()})
            }
            _ => serde_json::json!({"type": self.as_str()}),
        }
    }

    /// Inverse of [`Self::to_json`]; `None` for an unknown or malformed value.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value.get("type")?.as_str()? {
            "goal_reached" => {
                let node = NodeId::try_from(value.get("node")?.as_u64()?).ok()?;
                Some(Self::GoalReached { node })
            }
            "frontier_exhausted" => Some(Self::FrontierExhausted),
            "expansion_budget_exceeded" => Some(Self::ExpansionBudgetExceeded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Aggregate counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// Frontier entries popped (goal pop and skipped stale entries included).
    pub pops: u64,
    /// Entries whose neighbors were generated.
    pub expansions: u64,
    /// Popped entries whose cost was worse than their node's best cost.
    pub stale_pops: u64,
    /// Stale entries dropped under `StaleEntryPolicyV1::Skip`.
    pub stale_skipped: u64,
    /// Frontier pushes, the start entry included.
    pub pushes: u64,
    /// Pushes of an already-known state at a strictly lower cost.
    pub cost_improvements: u64,
    /// Distinct states interned, the start included.
    pub nodes_discovered: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

impl SearchStatsV1 {
    /// JSON form as embedded in traces and run reports.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        serde_json::json!({
            "cost_improvements": self.cost_improvements,
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
            "nodes_discovered": self.nodes_discovered,
            "pops": self.pops,
            "pushes": self.pushes,
            "stale_pops": self.stale_pops,
            "stale_skipped": self.stale_skipped,
        })
    }

    /// Inverse of [`Self::to_json`]; `None` if any counter is missing.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let counter = |name: &str| value.get(name).and_then(serde_json::Value::as_u64);
        Some(Self {
            pops: counter("pops")?,
            expansions: counter("expansions")?,
            stale_pops: counter("stale_pops")?,
            stale_skipped: counter("stale_skipped")?,
            pushes: counter("pushes")?,
            cost_improvements: counter("cost_improvements")?,
            nodes_discovered: counter("nodes_discovered")?,
            frontier_high_water: counter("frontier_high_water")?,
        })
    }
}

/// One frontier pop and what the search did with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEventV1 {
    /// Total order of pops.
    pub pop_order: u64,
    /// The popped node.
    pub node: NodeId,
    /// The frontier key at push time.
    pub key: FrontierKey,
    /// Cost recorded in the entry.
    pub entry_cost: u64,
    /// Node's best known cost at pop time.
    pub best_cost: u64,
    /// Outcome of the pop.
    pub disposition: PopDispositionV1,
}

/// What happened to a popped entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopDispositionV1 {
    /// The node is a goal; the search stopped here.
    Goal,
    /// Neighbors were generated, in `neighbors` order.
    Expanded { neighbors: Vec<NeighborRecordV1> },
    /// Stale entry dropped without expansion.
    SkippedStale,
}

/// A generated neighbor and its effect on the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRecordV1 {
    /// Arena id of the neighbor.
    pub node: NodeId,
    /// Table effect.
    pub outcome: NeighborOutcomeV1,
}

/// Effect of a generated neighbor on the cost and predecessor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborOutcomeV1 {
    /// First sighting; pushed with this key.
    Discovered { key: FrontierKey },
    /// Strictly cheaper path; pushed again with this key.
    Improved { key: FrontierKey },
    /// Not cheaper; nothing pushed.
    NotImproved,
}

/// The complete audit trail of a traced search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTraceV1 {
    /// Pops in order.
    pub pops: Vec<PopEventV1>,
    /// Heuristic of the start state.
    pub start_estimate: u64,
    /// Digest of the policy the search ran under.
    pub policy_digest: ContentHash,
    /// Why the search stopped.
    pub termination_reason: TerminationReasonV1,
    /// Aggregate counters.
    pub stats: SearchStatsV1,
}

impl SearchTraceV1 {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical trace bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": {
                "policy_digest": self.policy_digest.as_str(),
                "start_estimate": self.start_estimate,
                "stats": self.stats.to_json(),
                "termination_reason": self.termination_reason.to_json(),
            },
            "pops": self.pops.iter().map(pop_to_json).collect::<Vec<_>>(),
        })
    }
}

fn key_to_json(key: FrontierKey) -> serde_json::Value {
    serde_json::json!({"priority": key.priority, "sequence": key.sequence})
}

fn pop_to_json(p: &PopEventV1) -> serde_json::Value {
    let disposition = match &p.disposition {
        PopDispositionV1::Goal => serde_json::json!({"type": "goal"}),
        PopDispositionV1::SkippedStale => serde_json::json!({"type": "skipped_stale"}),
        PopDispositionV1::Expanded { neighbors } => serde_json::json!({
            "neighbors": neighbors.iter().map(neighbor_to_json).collect::<Vec<_>>(),
            "type": "expanded",
        }),
    };
    serde_json::json!({
        "best_cost": p.best_cost,
        "disposition": disposition,
        "entry_cost": p.entry_cost,
        "key": key_to_json(p.key),
        "node": p.node,
        "pop_order": p.pop_order,
    })
}

fn neighbor_to_json(n: &NeighborRecordV1) -> serde_json::Value {
    let outcome = match n.outcome {
        NeighborOutcomeV1::Discovered { key } => {
            serde_json::json!({"key": key_to_json(key), "type": "discovered"})
        }
        NeighborOutcomeV1::Improved { key } => {
            serde_json::json!({"key": key_to_json(key), "type": "improved"})
        }
        NeighborOutcomeV1::NotImproved => serde_json::json!({"type": "not_improved"}),
    };
    serde_json::json!({"node": n.node, "outcome": outcome})
}
