//! Wayfinder Harness: demo worlds and reproducible run reports.
//!
//! A world ([`contract::WorldV1`]) is a search space with a stable id, a
//! start state, and a printable state. The runner searches it with tracing
//! forced on and packages the outcome as a digest-bound [`runner::RunReportV1`],
//! which [`report_dir`] can persist and verify.
//!
//! The harness does not search on its own; it delegates to `wayfinder-search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
