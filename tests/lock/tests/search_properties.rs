//! Property sweeps over generated grids: returned paths are valid, and with
//! an admissible heuristic they are as short as breadth-first search finds.

use std::collections::{HashMap, VecDeque};

use wayfinder_harness::contract::WorldV1;
use wayfinder_harness::worlds::grid::{Cell, GridWorld};
use wayfinder_search::contract::SearchSpace;
use wayfinder_search::policy::{SearchPolicyV1, StaleEntryPolicyV1};
use wayfinder_search::search::search_infallible;
use wayfinder_search::trace::TerminationReasonV1;

/// Fixed-seed wall layouts; corners always open.
fn generated_grid(size: i64, density_pct: u64, seed: u64) -> GridWorld {
    let mut state = seed;
    let mut walls = Vec::new();
    for y in 0..size {
        for x in 0..size {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let corner = (x, y) == (0, 0) || (x, y) == (size - 1, size - 1);
            if !corner && (state >> 33) % 100 < density_pct {
                walls.push((x, y));
            }
        }
    }
    GridWorld::open(size, size, (0, 0), (size - 1, size - 1))
        .unwrap()
        .with_walls(walls)
}

fn bfs_distance(grid: &GridWorld) -> Option<u64> {
    let start = grid.start();
    let goal = grid.goal();
    let mut dist: HashMap<Cell, u64> = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        let d = dist[&cell];
        if cell == goal {
            return Some(d);
        }
        for next in grid.neighbors(&cell).unwrap() {
            dist.entry(next).or_insert_with(|| {
                queue.push_back(next);
                d + 1
            });
        }
    }
    None
}

#[test]
fn admissible_paths_are_valid_and_shortest() {
    let mut reached = 0;
    for seed in 0..40 {
        let grid = generated_grid(12, 28, seed);
        let expected = bfs_distance(&grid);
        for stale in [StaleEntryPolicyV1::Reexpand, StaleEntryPolicyV1::Skip] {
            let policy = SearchPolicyV1::default().with_stale_entries(stale);
            let result = search_infallible(&grid, grid.start(), &policy).unwrap();
            match expected {
                Some(distance) => {
                    let path = result.path().expect("BFS found a path");
                    assert_eq!(path.len() as u64 - 1, distance, "seed {seed} {stale:?}");
                    assert_eq!(path[0], grid.start());
                    assert_eq!(grid.heuristic(path.last().unwrap()).unwrap(), 0);
                    for pair in path.windows(2) {
                        assert!(grid.neighbors(&pair[0]).unwrap().contains(&pair[1]));
                    }
                }
                None => assert_eq!(
                    result.termination_reason,
                    TerminationReasonV1::FrontierExhausted,
                    "seed {seed}"
                ),
            }
        }
        reached += usize::from(expected.is_some());
    }
    assert!(reached > 0, "sweep should include solvable layouts");
}

#[test]
fn overestimating_paths_are_valid_never_shorter() {
    for seed in 0..40 {
        let grid = generated_grid(12, 28, seed).with_heuristic_weight(4);
        let Some(distance) = bfs_distance(&grid) else {
            continue;
        };
        let result = search_infallible(&grid, grid.start(), &SearchPolicyV1::default()).unwrap();
        let path = result.path().expect("reachable goal is found");
        assert!(path.len() as u64 - 1 >= distance, "seed {seed}");
        for pair in path.windows(2) {
            assert!(grid.neighbors(&pair[0]).unwrap().contains(&pair[1]));
        }
    }
}

#[test]
fn every_discovered_node_has_consistent_parent_cost() {
    let grid = generated_grid(16, 20, 99);
    let result = search_infallible(&grid, grid.start(), &SearchPolicyV1::default()).unwrap();
    for (id, state, record) in result.tables.iter() {
        match record.parent {
            None => {
                assert_eq!(id, 0);
                assert_eq!(record.cost, 0);
            }
            Some(parent) => {
                let parent_record = result.tables.record(parent).unwrap();
                // A parent improved after this node was relaxed leaves the
                // node's cost above the parent's plus one until re-relaxed.
                assert!(record.cost > parent_record.cost, "node {id}");
                let parent_state = result.tables.state(parent).unwrap();
                assert!(grid.neighbors(parent_state).unwrap().contains(state));
            }
        }
    }
}
