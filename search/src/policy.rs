//! Search policy types.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY};

/// Budget, stale-entry handling, and tracing configuration for one search.
///
/// The default reproduces the plain algorithm: unbounded, stale entries
/// re-expanded, no trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on frontier entries expanded. `None` is unbounded, which
    /// never terminates on an infinite graph without a reachable goal.
    pub max_expansions: Option<u64>,
    /// What to do with an entry popped at a worse cost than its node's best.
    pub stale_entries: StaleEntryPolicyV1,
    /// Record a [`SearchTraceV1`](crate::trace::SearchTraceV1).
    pub record_trace: bool,
}

impl SearchPolicyV1 {
    /// Validate the policy before any callback runs.
    ///
    /// # Errors
    ///
    /// Returns a detail string if `max_expansions` is `Some(0)`: such a
    /// search could not even test the start state.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_expansions == Some(0) {
            return Err("max_expansions must be positive when set".into());
        }
        Ok(())
    }

    /// Cap the number of expansions.
    #[must_use]
    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Select the stale-entry policy.
    #[must_use]
    pub fn with_stale_entries(mut self, stale: StaleEntryPolicyV1) -> Self {
        self.stale_entries = stale;
        self
    }

    /// Enable expansion tracing.
    #[must_use]
    pub fn traced(mut self) -> Self {
        self.record_trace = true;
        self
    }

    /// JSON snapshot of the policy, as bound into traces and run reports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "record_trace": self.record_trace,
            "stale_entries": self.stale_entries.as_str(),
        })
    }

    /// Content hash of the canonical policy snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: None,
            stale_entries: StaleEntryPolicyV1::Reexpand,
            record_trace: false,
        }
    }
}

/// Handling of stale frontier entries.
///
/// A node pushed again at a lower cost leaves its older entry in the heap.
/// When that older entry is popped, its cost is worse than the node's best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleEntryPolicyV1 {
    /// Expand it anyway, using the node's current best cost. Harmless but
    /// redundant work.
    Reexpand,
    /// Drop it without expanding. Does not count against `max_expansions`.
    Skip,
}

impl StaleEntryPolicyV1 {
    /// Stable identifier used in JSON snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reexpand => "reexpand",
            Self::Skip => "skip",
        }
    }
}
