//! World contract: a search space with a name, a start, and a printable state.
//!
//! A world supplies domain data only. The runner owns the search invocation,
//! the policy, and the report.

use wayfinder_search::contract::SearchSpace;

/// A runnable demo world.
///
/// # Contract
///
/// - `world_id` is stable across runs and processes; it is bound into every
///   run report.
/// - `start` returns the same state every time it is called.
/// - `describe` renders a state deterministically. Reports carry the described
///   path, so two runs agree byte-for-byte only if descriptions do.
pub trait WorldV1: SearchSpace {
    /// Stable world identifier.
    fn world_id(&self) -> &str;

    /// The state the search starts from.
    fn start(&self) -> Self::State;

    /// Deterministic one-line rendering of a state.
    fn describe(&self, state: &Self::State) -> String;
}

/// Failure building a world from external input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The input text could not be parsed.
    Parse { line: usize, detail: String },
    /// The input parsed but describes an unusable world.
    Invalid { detail: String },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { line, detail } => write!(f, "parse error on line {line}: {detail}"),
            Self::Invalid { detail } => write!(f, "invalid world: {detail}"),
        }
    }
}

impl std::error::Error for WorldError {}
