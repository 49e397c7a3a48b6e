//! Search entry points and expansion loop.

use std::convert::Infallible;
use std::hash::Hash;

use crate::contract::{FnSpace, SearchSpace};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::{NodeId, Relaxation, SearchTables};
use crate::policy::{SearchPolicyV1, StaleEntryPolicyV1};
use crate::trace::{
    NeighborOutcomeV1, NeighborRecordV1, PopDispositionV1, PopEventV1, SearchStatsV1,
    SearchTraceV1, TerminationReasonV1,
};

/// Result of a search that ran to termination.
///
/// Holds the node arena so the path can be reconstructed (repeatedly) after
/// the fact. Check [`SearchResult::is_goal_reached`] or
/// `termination_reason` for the outcome; "no path" is any reason other than
/// `GoalReached`.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    /// Why the search stopped.
    pub termination_reason: TerminationReasonV1,
    /// Cost and predecessor tables at termination.
    pub tables: SearchTables<S>,
    /// Aggregate counters.
    pub stats: SearchStatsV1,
    /// Pop-by-pop audit trail, if the policy asked for one.
    pub trace: Option<SearchTraceV1>,
}

impl<S: Clone + Eq + Hash> SearchResult<S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.goal_node().is_some()
    }

    /// The goal node, if one was reached.
    #[must_use]
    pub fn goal_node(&self) -> Option<NodeId> {
        match self.termination_reason {
            TerminationReasonV1::GoalReached { node } => Some(node),
            _ => None,
        }
    }

    /// Start-to-goal path, inclusive of both ends. `None` means no path.
    #[must_use]
    pub fn path(&self) -> Option<Vec<S>> {
        self.goal_node().map(|goal| self.tables.reconstruct_path(goal))
    }

    /// Number of steps on the path (`path.len() - 1`).
    #[must_use]
    pub fn path_cost(&self) -> Option<u64> {
        self.goal_node().map(|goal| self.tables.cost_at(goal))
    }
}

/// Shortest unit-cost path from `start` to the first state whose heuristic
/// is `0`.
///
/// Returns `None` when no such state is reachable. A start state that is
/// already a goal yields `Some(vec![start])`. Runs unbounded: on an infinite
/// graph with no reachable goal this does not return.
///
/// ```
/// use wayfinder_search::search::astar;
///
/// // Walk a number line from 0 to 5.
/// let path = astar(0i32, |n| u64::from((5 - n).unsigned_abs()), |n| [n - 1, n + 1]);
/// assert_eq!(path, Some(vec![0, 1, 2, 3, 4, 5]));
/// ```
pub fn astar<S, H, N, I>(start: S, heuristic: H, neighbors: N) -> Option<Vec<S>>
where
    S: Clone + Eq + Hash,
    H: Fn(&S) -> u64,
    N: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
{
    let space = FnSpace::new(heuristic, neighbors);
    match search(&space, start, &SearchPolicyV1::default()) {
        Ok(result) => result.path(),
        Err(SearchError::Space(never)) => match never {},
        // The default policy always validates.
        Err(SearchError::InvalidPolicy { .. }) => None,
    }
}

/// Run best-first search from `start` under `policy`.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::Space`] with the first error raised by `space`.
pub fn search<Sp: SearchSpace>(
    space: &Sp,
    start: Sp::State,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<Sp::State>, SearchError<Sp::Error>> {
    search_cancellable(space, start, policy, || false)
}

/// Run best-first search, polling `should_stop` once per popped entry.
///
/// When `should_stop` returns `true` the search terminates with
/// [`TerminationReasonV1::Cancelled`]; the popped entry is discarded.
/// An entry popped once the expansion budget is spent is likewise discarded
/// uncounted, unless it is a goal or a skipped stale entry.
///
/// # Errors
///
/// Same as [`search`].
#[allow(clippy::too_many_lines)]
pub fn search_cancellable<Sp, F>(
    space: &Sp,
    start: Sp::State,
    policy: &SearchPolicyV1,
    mut should_stop: F,
) -> Result<SearchResult<Sp::State>, SearchError<Sp::Error>>
where
    Sp: SearchSpace,
    F: FnMut() -> bool,
{
    policy
        .validate()
        .map_err(|detail| SearchError::InvalidPolicy { detail })?;
    let policy_digest = if policy.record_trace {
        Some(policy.digest().map_err(|e| SearchError::InvalidPolicy {
            detail: format!("policy snapshot: {e}"),
        })?)
    } else {
        None
    };

    let start_estimate = space.heuristic(&start).map_err(SearchError::Space)?;
    let mut tables = SearchTables::with_start(start);
    let mut frontier = Frontier::new();
    frontier.push(0, 0, start_estimate);

    let mut stats = SearchStatsV1::default();
    let mut pops: Option<Vec<PopEventV1>> = policy.record_trace.then(Vec::new);

    let termination_reason = loop {
        let Some(entry) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };
        if should_stop() {
            break TerminationReasonV1::Cancelled;
        }

        let best_cost = tables.cost_at(entry.node);
        let stale = entry.cost > best_cost;
        let skip = stale && policy.stale_entries == StaleEntryPolicyV1::Skip;
        let goal = !skip && entry.estimate == 0;
        // Only an expansion spends budget; skips and goal tests are free.
        if !skip
            && !goal
            && policy
                .max_expansions
                .is_some_and(|max| stats.expansions >= max)
        {
            break TerminationReasonV1::ExpansionBudgetExceeded;
        }

        let pop_order = stats.pops;
        stats.pops += 1;
        log::trace!(
            "pop #{pop_order}: node {} priority {} cost {} (best {best_cost})",
            entry.node,
            entry.key.priority,
            entry.cost
        );

        if stale {
            stats.stale_pops += 1;
        }
        if skip {
            stats.stale_skipped += 1;
            if let Some(pops) = pops.as_mut() {
                pops.push(PopEventV1 {
                    pop_order,
                    node: entry.node,
                    key: entry.key,
                    entry_cost: entry.cost,
                    best_cost,
                    disposition: PopDispositionV1::SkippedStale,
                });
            }
            continue;
        }

        if goal {
            if let Some(pops) = pops.as_mut() {
                pops.push(PopEventV1 {
                    pop_order,
                    node: entry.node,
                    key: entry.key,
                    entry_cost: entry.cost,
                    best_cost,
                    disposition: PopDispositionV1::Goal,
                });
            }
            break TerminationReasonV1::GoalReached { node: entry.node };
        }

        // Expansion always proceeds from the best known cost, so a stale
        // entry re-expanded here cannot push anything worse than before.
        let successors = space
            .neighbors(tables.state_at(entry.node))
            .map_err(SearchError::Space)?;
        stats.expansions += 1;
        let next_cost = best_cost.saturating_add(1);

        let mut records = Vec::new();
        for successor in successors {
            let (node, outcome) = match tables.relax(successor, entry.node, next_cost) {
                Relaxation::Discovered(id) => {
                    let estimate = space
                        .heuristic(tables.state_at(id))
                        .map_err(SearchError::Space)?;
                    let key = frontier.push(id, next_cost, estimate);
                    (id, NeighborOutcomeV1::Discovered { key })
                }
                Relaxation::Improved(id) => {
                    stats.cost_improvements += 1;
                    let estimate = space
                        .heuristic(tables.state_at(id))
                        .map_err(SearchError::Space)?;
                    let key = frontier.push(id, next_cost, estimate);
                    (id, NeighborOutcomeV1::Improved { key })
                }
                Relaxation::NotImproved(id) => (id, NeighborOutcomeV1::NotImproved),
            };
            if pops.is_some() {
                records.push(NeighborRecordV1 { node, outcome });
            }
        }

        if let Some(pops) = pops.as_mut() {
            pops.push(PopEventV1 {
                pop_order,
                node: entry.node,
                key: entry.key,
                entry_cost: entry.cost,
                best_cost,
                disposition: PopDispositionV1::Expanded { neighbors: records },
            });
        }
    };

    stats.pushes = frontier.pushes();
    stats.frontier_high_water = frontier.high_water();
    stats.nodes_discovered = tables.len() as u64;

    log::debug!(
        "search terminated ({}): {} pops, {} expansions, {} stale, {} nodes, frontier high water {}",
        termination_reason.as_str(),
        stats.pops,
        stats.expansions,
        stats.stale_pops,
        stats.nodes_discovered,
        stats.frontier_high_water
    );

    let trace = match (pops, policy_digest) {
        (Some(pops), Some(policy_digest)) => Some(SearchTraceV1 {
            pops,
            start_estimate,
            policy_digest,
            termination_reason,
            stats,
        }),
        _ => None,
    };

    Ok(SearchResult {
        termination_reason,
        tables,
        stats,
        trace,
    })
}

/// Infallible shorthand for [`search`] over an [`Infallible`] space.
///
/// # Errors
///
/// Returns the policy validation detail if the policy is rejected.
pub fn search_infallible<Sp>(
    space: &Sp,
    start: Sp::State,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<Sp::State>, String>
where
    Sp: SearchSpace<Error = Infallible>,
{
    match search(space, start, policy) {
        Ok(result) => Ok(result),
        Err(SearchError::InvalidPolicy { detail }) => Err(detail),
        Err(SearchError::Space(never)) => match never {},
    }
}
