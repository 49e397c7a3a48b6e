//! Typed search errors.
//!
//! `SearchError` covers the two ways a search call can fail: a policy that is
//! rejected before any callback runs, and a failure raised by the caller's
//! [`SearchSpace`](crate::contract::SearchSpace). Exhaustion, budget stops and
//! cancellation are ordinary outcomes expressed by
//! [`TerminationReasonV1`](crate::trace::TerminationReasonV1).

/// Typed failure for a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError<E> {
    /// The policy failed pre-flight validation. No callback was invoked.
    InvalidPolicy { detail: String },
    /// `heuristic` or `neighbors` returned an error. Propagated as-is; the
    /// search stops at the first failure.
    Space(E),
}

impl<E> SearchError<E> {
    /// Returns the caller's error if this failure came from the search space.
    pub fn into_space_error(self) -> Option<E> {
        match self {
            Self::Space(e) => Some(e),
            Self::InvalidPolicy { .. } => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Space(e) => write!(f, "search space callback failed: {e}"),
        }
    }
}

impl<E> std::error::Error for SearchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::InvalidPolicy { .. } => None,
        }
    }
}
