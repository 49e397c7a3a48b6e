//! Single source of truth for the canonical search scenarios.
//!
//! Used by both the `search_fixture` binary and the in-process lock tests,
//! so the cross-process harness and the in-process assertions cannot drift.

use wayfinder_harness::runner::{run_world, RunError, RunReportV1};
use wayfinder_harness::worlds::cubicle_maze::CubicleMaze;
use wayfinder_harness::worlds::facility::Facility;
use wayfinder_harness::worlds::grid::GridWorld;
use wayfinder_search::policy::{SearchPolicyV1, StaleEntryPolicyV1};

/// The four-floor facility used throughout the lock tests.
pub const FACILITY_SAMPLE: &str = "\
The first floor contains a hydrogen-compatible microchip and a lithium-compatible microchip.
The second floor contains a hydrogen generator.
The third floor contains a lithium generator.
The fourth floor contains nothing relevant.
";

/// Open 5x5 grid, (0,0) to (4,4). Shortest path has 9 states.
///
/// # Panics
///
/// Never: the dimensions are fixed and valid.
#[must_use]
pub fn open_grid() -> GridWorld {
    GridWorld::open(5, 5, (0, 0), (4, 4)).expect("valid grid")
}

/// Same grid with both approaches to (4,4) walled off.
#[must_use]
pub fn isolated_goal() -> GridWorld {
    open_grid()
        .with_walls([(3, 4), (4, 3)])
        .with_id("isolated_goal")
}

/// Start and goal coincide at (2,2).
///
/// # Panics
///
/// Never: the dimensions are fixed and valid.
#[must_use]
pub fn start_is_goal() -> GridWorld {
    GridWorld::open(5, 5, (2, 2), (2, 2))
        .expect("valid grid")
        .with_id("start_is_goal")
}

/// 7x7 grid with a wall across row 3 (gap at x = 6) and a heuristic that
/// overestimates threefold.
///
/// # Panics
///
/// Never: the dimensions are fixed and valid.
#[must_use]
pub fn overestimating() -> GridWorld {
    GridWorld::open(7, 7, (0, 0), (0, 6))
        .expect("valid grid")
        .with_walls((0..6).map(|x| (x, 3)))
        .with_heuristic_weight(3)
        .with_id("overestimating")
}

/// Cubicle maze with favorite number 10, (1,1) to (7,4).
#[must_use]
pub fn sample_maze() -> CubicleMaze {
    CubicleMaze::new(10, (1, 1), (7, 4))
}

/// The sample facility.
///
/// # Panics
///
/// Never: the text is a fixed valid layout.
#[must_use]
pub fn sample_facility() -> Facility {
    Facility::parse(FACILITY_SAMPLE).expect("valid facility")
}

/// Run every canonical scenario and return its report, in fixed order.
///
/// # Errors
///
/// Returns the first [`RunError`].
pub fn run_all() -> Result<Vec<RunReportV1>, RunError> {
    let default = SearchPolicyV1::default();
    let skip = SearchPolicyV1::default().with_stale_entries(StaleEntryPolicyV1::Skip);
    Ok(vec![
        run_world(&open_grid(), &default)?,
        run_world(&isolated_goal(), &default)?,
        run_world(&start_is_goal(), &default)?,
        run_world(&overestimating(), &default)?,
        run_world(&overestimating(), &skip)?,
        run_world(&sample_maze(), &default)?,
        run_world(&sample_facility(), &default)?,
    ])
}

/// Deterministic `key=value` lines summarizing `reports`.
///
/// # Errors
///
/// Returns [`RunError::CanonFailed`] if a report cannot be digested.
pub fn fixture_lines(reports: &[RunReportV1]) -> Result<Vec<String>, RunError> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        let prefix = format!("{i}.{}", report.world_id);
        lines.push(format!(
            "{prefix}.termination_reason={}",
            report.termination_reason.as_str()
        ));
        lines.push(format!(
            "{prefix}.path_cost={}",
            report
                .path_cost()
                .map_or_else(|| "none".to_owned(), |c| c.to_string())
        ));
        lines.push(format!("{prefix}.expansions={}", report.stats.expansions));
        lines.push(format!("{prefix}.pops={}", report.stats.pops));
        lines.push(format!("{prefix}.trace_digest={}", report.trace_digest));
        lines.push(format!("{prefix}.report_digest={}", report.digest()?));
    }
    Ok(lines)
}
