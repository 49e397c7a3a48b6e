//! Wayfinder Search: generic best-first (A*) search over implicit graphs.
//!
//! Callers describe a graph by a start state, a heuristic and a
//! neighbor generator; the engine returns the start-to-goal path or an
//! explicit "no path" outcome. Every edge costs 1. A goal is any state whose
//! heuristic is `0`.
//!
//! # Module dependency direction
//!
//! ```text
//! canon, hash  ←  policy  ←  trace  ←  search
//!                   node  ←  frontier  ↗
//! ```
//!
//! `contract` and `error` are leaves used only by `search`.
//!
//! # Key types
//!
//! - [`SearchSpace`](contract::SearchSpace): the caller's heuristic and neighbor callbacks
//! - [`FnSpace`](contract::FnSpace): closure adapter for `SearchSpace`
//! - [`SearchTables`](node::SearchTables): cost and predecessor tables (node arena)
//! - [`Frontier`](frontier::Frontier): min-priority queue with FIFO tie-breaking
//! - [`SearchPolicyV1`](policy::SearchPolicyV1): budget, stale-entry and trace configuration
//! - [`SearchTraceV1`](trace::SearchTraceV1): pop-by-pop audit log with canonical digest
//! - [`astar`](search::astar) / [`search`](search::search): entry points

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod hash;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;
