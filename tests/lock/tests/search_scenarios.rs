//! Canonical scenario lock tests: open grid, unreachable goal, start-is-goal,
//! overestimating heuristic, and the two demo puzzles.

use lock_tests::scenarios::{
    isolated_goal, open_grid, overestimating, sample_facility, sample_maze, start_is_goal,
};
use wayfinder_harness::contract::WorldV1;
use wayfinder_harness::runner::run_world;
use wayfinder_harness::worlds::grid::{manhattan, GridWorld};
use wayfinder_search::contract::SearchSpace;
use wayfinder_search::policy::{SearchPolicyV1, StaleEntryPolicyV1};
use wayfinder_search::search::{astar, search_infallible};
use wayfinder_search::trace::TerminationReasonV1;

/// Every consecutive pair is one legal move apart and the last state has
/// heuristic 0.
fn assert_valid_grid_path(grid: &GridWorld, path: &[(i64, i64)]) {
    assert_eq!(path.first(), Some(&grid.start()), "path must begin at start");
    let last = path.last().expect("non-empty path");
    assert_eq!(grid.heuristic(last).unwrap(), 0, "path must end at a goal");
    for pair in path.windows(2) {
        assert!(
            grid.neighbors(&pair[0]).unwrap().contains(&pair[1]),
            "{:?} -> {:?} is not a legal move",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn open_grid_path_has_nine_states() {
    let grid = open_grid();
    let result = search_infallible(&grid, grid.start(), &SearchPolicyV1::default()).unwrap();
    let path = result.path().unwrap();
    assert_eq!(path.len(), 9);
    // FIFO tie-breaking prefers the earliest-pushed move (right) at every tie.
    assert_eq!(
        path,
        vec![
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4)
        ]
    );
    for pair in path.windows(2) {
        assert_eq!(manhattan(pair[0], pair[1]), 1, "non-unit step {pair:?}");
    }
    assert_valid_grid_path(&grid, &path);
}

#[test]
fn open_grid_via_closure_entry_point() {
    let grid = open_grid();
    let path = astar(
        grid.start(),
        |s: &(i64, i64)| grid.heuristic(s).unwrap_or(u64::MAX),
        |s: &(i64, i64)| grid.neighbors(s).unwrap_or_default(),
    )
    .unwrap();
    assert_eq!(path.len(), 9);
    assert_valid_grid_path(&grid, &path);
}

#[test]
fn isolated_goal_reports_no_path() {
    let grid = isolated_goal();
    let result = search_infallible(&grid, grid.start(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(
        result.termination_reason,
        TerminationReasonV1::FrontierExhausted
    );
    assert!(result.path().is_none());
    assert!(!result.is_goal_reached());
    // Every reachable cell: 25 minus the goal and its two walls.
    assert_eq!(result.stats.nodes_discovered, 22);
    assert_eq!(result.stats.expansions, 22);
}

#[test]
fn start_that_is_goal_yields_single_state_path() {
    let grid = start_is_goal();
    let result = search_infallible(&grid, grid.start(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(result.path(), Some(vec![(2, 2)]));
    assert_eq!(result.path_cost(), Some(0));
    assert_eq!(result.stats.expansions, 0, "goal test precedes expansion");
    assert_eq!(result.stats.pops, 1);
}

#[test]
fn overestimating_heuristic_still_returns_valid_path() {
    let grid = overestimating();
    for stale in [StaleEntryPolicyV1::Reexpand, StaleEntryPolicyV1::Skip] {
        let policy = SearchPolicyV1::default().with_stale_entries(stale);
        let result = search_infallible(&grid, grid.start(), &policy).unwrap();
        let path = result.path().expect("goal is reachable through the gap");
        assert_valid_grid_path(&grid, &path);
        // 6 right, 3 down to the gap, 3 down and 6 left to the goal.
        assert!(path.len() - 1 >= 18, "shorter than optimal: {}", path.len());
    }
}

#[test]
fn cubicle_maze_sample_is_eleven_steps() {
    let report = run_world(&sample_maze(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.path_cost(), Some(11));
    let path = report.path.unwrap();
    assert_eq!(path.first().map(String::as_str), Some("(1,1)"));
    assert_eq!(path.last().map(String::as_str), Some("(7,4)"));
}

#[test]
fn facility_sample_is_eleven_moves() {
    let facility = sample_facility();
    let report = run_world(&facility, &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.path_cost(), Some(11));
    let path = report.path.unwrap();
    assert_eq!(path[0], "E1 F1:HM,LM F2:HG F3:LG F4:-");
    assert_eq!(path[11], "E4 F1:- F2:- F3:- F4:HG,HM,LG,LM");
}

#[test]
fn larger_facility_still_solves() {
    // One extra pair on the first floor.
    let facility = sample_facility().with_pair("elerium", 0).unwrap();
    let result =
        search_infallible(&facility, facility.start(), &SearchPolicyV1::default()).unwrap();
    let path = result.path().unwrap();
    assert!(facility.is_solved(path.last().unwrap()));
    assert!(path.iter().all(|s| facility.is_safe(s)));
    assert_eq!(result.path_cost(), Some(21));
}
