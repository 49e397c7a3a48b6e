//! Stale frontier entries on a real workload: the 1352 cubicle maze pushes
//! one node twice before its first entry is popped.

use wayfinder_harness::contract::WorldV1;
use wayfinder_harness::worlds::cubicle_maze::CubicleMaze;
use wayfinder_search::policy::{SearchPolicyV1, StaleEntryPolicyV1};
use wayfinder_search::search::search_infallible;
use wayfinder_search::trace::PopDispositionV1;

fn maze() -> CubicleMaze {
    CubicleMaze::new(1352, (1, 1), (31, 39))
}

#[test]
fn reexpand_counts_stale_pop_as_expansion() {
    let maze = maze();
    let result = search_infallible(&maze, maze.start(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(result.path_cost(), Some(90));
    assert_eq!(result.stats.cost_improvements, 1);
    assert_eq!(result.stats.stale_pops, 1);
    assert_eq!(result.stats.stale_skipped, 0);
    assert_eq!(result.stats.pops, 189);
    assert_eq!(result.stats.expansions, 188);
    assert_eq!(result.stats.pushes, 197);
    assert_eq!(result.stats.nodes_discovered, 196);
}

#[test]
fn skip_drops_stale_pop_without_changing_path() {
    let maze = maze();
    let reexpand = search_infallible(&maze, maze.start(), &SearchPolicyV1::default()).unwrap();
    let skip = search_infallible(
        &maze,
        maze.start(),
        &SearchPolicyV1::default()
            .with_stale_entries(StaleEntryPolicyV1::Skip)
            .traced(),
    )
    .unwrap();

    assert_eq!(skip.path(), reexpand.path());
    assert_eq!(skip.stats.pops, 189);
    assert_eq!(skip.stats.expansions, 187);
    assert_eq!(skip.stats.stale_skipped, 1);

    let trace = skip.trace.unwrap();
    let skipped: Vec<_> = trace
        .pops
        .iter()
        .filter(|p| p.disposition == PopDispositionV1::SkippedStale)
        .collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].entry_cost > skipped[0].best_cost);
}
