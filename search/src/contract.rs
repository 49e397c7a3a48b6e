//! Search space contract trait.

use std::convert::Infallible;
use std::hash::Hash;

/// An implicit graph: states, unit-cost successors, and a goal heuristic.
///
/// # Contract
///
/// - `heuristic` is non-negative by construction (`u64`) and returns `0`
///   exactly for goal states. Admissibility (never overestimating the
///   remaining cost) is what makes returned paths shortest; it is not checked.
/// - `neighbors` returns the states reachable in one step, each at cost 1.
///   The returned order is the order in which successors are pushed, so it
///   must be deterministic for searches to be reproducible.
/// - Both are expected to be pure for a fixed state. An `Err` from either
///   stops the search immediately.
pub trait SearchSpace {
    /// A node of the implicit graph. Never ordered, only hashed and compared.
    type State: Clone + Eq + Hash;
    /// Failure raised by a callback.
    type Error;

    /// Estimate the remaining cost from `state` to the nearest goal.
    ///
    /// # Errors
    ///
    /// Any error is returned to the search caller unchanged.
    fn heuristic(&self, state: &Self::State) -> Result<u64, Self::Error>;

    /// Enumerate the states reachable from `state` in exactly one step.
    ///
    /// # Errors
    ///
    /// Any error is returned to the search caller unchanged.
    fn neighbors(&self, state: &Self::State) -> Result<Vec<Self::State>, Self::Error>;
}

impl<T: SearchSpace + ?Sized> SearchSpace for &T {
    type State = T::State;
    type Error = T::Error;

    fn heuristic(&self, state: &Self::State) -> Result<u64, Self::Error> {
        (**self).heuristic(state)
    }

    fn neighbors(&self, state: &Self::State) -> Result<Vec<Self::State>, Self::Error> {
        (**self).neighbors(state)
    }
}

/// Adapter turning a pair of infallible closures into a [`SearchSpace`].
///
/// ```
/// use wayfinder_search::contract::{FnSpace, SearchSpace};
///
/// let space = FnSpace::new(
///     |n: &u32| u64::from(10 - (*n).min(10)),
///     |n: &u32| [n + 1, n + 2],
/// );
/// assert_eq!(space.heuristic(&4).unwrap(), 6);
/// assert_eq!(space.neighbors(&4).unwrap(), vec![5, 6]);
/// ```
pub struct FnSpace<S, H, N> {
    heuristic: H,
    neighbors: N,
    _state: std::marker::PhantomData<fn(&S)>,
}

impl<S, H, N, I> FnSpace<S, H, N>
where
    H: Fn(&S) -> u64,
    N: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
{
    /// Wrap a heuristic and a neighbor generator.
    pub fn new(heuristic: H, neighbors: N) -> Self {
        Self {
            heuristic,
            neighbors,
            _state: std::marker::PhantomData,
        }
    }
}

impl<S, H, N, I> SearchSpace for FnSpace<S, H, N>
where
    S: Clone + Eq + Hash,
    H: Fn(&S) -> u64,
    N: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
{
    type State = S;
    type Error = Infallible;

    fn heuristic(&self, state: &S) -> Result<u64, Infallible> {
        Ok((self.heuristic)(state))
    }

    fn neighbors(&self, state: &S) -> Result<Vec<S>, Infallible> {
        Ok((self.neighbors)(state).into_iter().collect())
    }
}

impl<S, H, N> std::fmt::Debug for FnSpace<S, H, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSpace").finish_non_exhaustive()
    }
}
