//! Harness runner: searches a world and packages the outcome as a run report.
//!
//! # Pipeline
//!
//! ```text
//! policy.traced() → search_cancellable(world, world.start())
//!   → trace.digest() → describe(path) → RunReportV1 → digest()
//! ```
//!
//! The runner always records a trace, so every report binds the digest of
//! the exact pop sequence that produced it.

use std::fmt::Display;

use wayfinder_search::canon::{canonical_json_bytes, CanonError};
use wayfinder_search::error::SearchError;
use wayfinder_search::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::search::search_cancellable;
use wayfinder_search::trace::{SearchStatsV1, TerminationReasonV1};

use crate::contract::WorldV1;

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The policy failed validation before the search started.
    InvalidPolicy { detail: String },
    /// A world callback failed mid-search.
    WorldFailed { world_id: String, detail: String },
    /// The search finished without the trace the runner requested.
    TraceMissing,
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::WorldFailed { world_id, detail } => {
                write!(f, "world {world_id} failed: {detail}")
            }
            Self::TraceMissing => write!(f, "search returned no trace"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::CanonFailed {
            detail: e.to_string(),
        }
    }
}

/// Outcome of one world run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    /// The world that was searched.
    pub world_id: String,
    /// Digest of the (traced) policy the search ran under.
    pub policy_digest: ContentHash,
    /// Why the search stopped.
    pub termination_reason: TerminationReasonV1,
    /// Described states from start to goal, if a goal was reached.
    pub path: Option<Vec<String>>,
    /// Aggregate search counters.
    pub stats: SearchStatsV1,
    /// Digest of the canonical search trace.
    pub trace_digest: ContentHash,
}

impl RunReportV1 {
    /// Number of steps on the path, if a goal was reached.
    #[must_use]
    pub fn path_cost(&self) -> Option<u64> {
        self.path
            .as_ref()
            .map(|p| p.len().saturating_sub(1) as u64)
    }

    /// JSON form of the report.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path,
            "path_cost": self.path_cost(),
            "policy_digest": self.policy_digest.as_str(),
            "schema_version": "run_report.v1",
            "stats": self.stats.to_json(),
            "termination_reason": self.termination_reason.to_json(),
            "trace_digest": self.trace_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// Rebuild a report from the form produced by [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns a detail naming the first field that is missing or malformed.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, String> {
        if field(value, "schema_version")?.as_str() != Some("run_report.v1") {
            return Err("unsupported schema_version".into());
        }
        let path = match field(value, "path")? {
            serde_json::Value::Null => None,
            serde_json::Value::Array(steps) => Some(
                steps
                    .iter()
                    .map(|s| s.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| malformed("path"))?,
            ),
            _ => return Err(malformed("path")),
        };
        let report = Self {
            world_id: field(value, "world_id")?
                .as_str()
                .ok_or_else(|| malformed("world_id"))?
                .to_owned(),
            policy_digest: hash_field(value, "policy_digest")?,
            termination_reason: TerminationReasonV1::from_json(field(value, "termination_reason")?)
                .ok_or_else(|| malformed("termination_reason"))?,
            path,
            stats: SearchStatsV1::from_json(field(value, "stats")?)
                .ok_or_else(|| malformed("stats"))?,
            trace_digest: hash_field(value, "trace_digest")?,
        };
        if field(value, "path_cost")?.as_u64() != report.path_cost() {
            return Err(malformed("path_cost"));
        }
        Ok(report)
    }

    /// Canonical JSON bytes of the report.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical report bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &bytes))
    }
}

fn field<'a>(value: &'a serde_json::Value, name: &str) -> Result<&'a serde_json::Value, String> {
    value
        .get(name)
        .ok_or_else(|| format!("missing field '{name}'"))
}

fn hash_field(value: &serde_json::Value, name: &str) -> Result<ContentHash, String> {
    field(value, name)?
        .as_str()
        .and_then(ContentHash::parse)
        .ok_or_else(|| malformed(name))
}

fn malformed(name: &str) -> String {
    format!("malformed field '{name}'")
}

/// Search `world` from its start state under `policy` and build a report.
///
/// Tracing is forced on; the reported policy digest is that of the traced
/// policy.
///
/// # Errors
///
/// Returns [`RunError`] on policy validation failure, world callback
/// failure, or serialization failure. A search that ends without a goal is
/// not an error: the report's `termination_reason` says why.
pub fn run_world<W>(world: &W, policy: &SearchPolicyV1) -> Result<RunReportV1, RunError>
where
    W: WorldV1,
    W::Error: Display,
{
    run_world_cancellable(world, policy, || false)
}

/// [`run_world`] with a stop predicate polled once per frontier pop.
///
/// # Errors
///
/// Same as [`run_world`].
pub fn run_world_cancellable<W, F>(
    world: &W,
    policy: &SearchPolicyV1,
    should_stop: F,
) -> Result<RunReportV1, RunError>
where
    W: WorldV1,
    W::Error: Display,
    F: FnMut() -> bool,
{
    let policy = policy.clone().traced();
    let result = search_cancellable(world, world.start(), &policy, should_stop).map_err(
        |e| match e {
            SearchError::InvalidPolicy { detail } => RunError::InvalidPolicy { detail },
            SearchError::Space(inner) => RunError::WorldFailed {
                world_id: world.world_id().to_owned(),
                detail: inner.to_string(),
            },
        },
    )?;

    let trace = result.trace.as_ref().ok_or(RunError::TraceMissing)?;
    let path = result
        .path()
        .map(|states| states.iter().map(|s| world.describe(s)).collect());

    let report = RunReportV1 {
        world_id: world.world_id().to_owned(),
        policy_digest: trace.policy_digest.clone(),
        termination_reason: result.termination_reason,
        path,
        stats: result.stats,
        trace_digest: trace.digest()?,
    };
    log::debug!(
        "run {}: {} after {} expansions",
        report.world_id,
        report.termination_reason.as_str(),
        report.stats.expansions
    );
    Ok(report)
}
