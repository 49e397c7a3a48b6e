//! Shared world builders for the wayfinder benchmark suites.

use wayfinder_harness::worlds::cubicle_maze::CubicleMaze;
use wayfinder_harness::worlds::facility::Facility;
use wayfinder_harness::worlds::grid::{Cell, GridWorld};

/// The four-floor, two-element facility.
pub const FACILITY_SAMPLE: &str = "\
The first floor contains a hydrogen-compatible microchip and a lithium-compatible microchip.
The second floor contains a hydrogen generator.
The third floor contains a lithium generator.
The fourth floor contains nothing relevant.
";

/// A named benchmark world.
pub struct Regime<W> {
    /// Stable label used in benchmark ids.
    pub name: &'static str,
    /// The world to search.
    pub world: W,
}

/// Deterministic wall placement: a fixed linear congruential sequence, so
/// every machine benchmarks the same layout.
///
/// Roughly `density_pct` percent of cells become walls; the start corner
/// and the goal corner are always left open.
#[must_use]
pub fn scattered_walls(size: i64, density_pct: u64, seed: u64) -> Vec<Cell> {
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
    walls
}

/// Grid regimes of increasing difficulty, all from the top-left corner to
/// the bottom-right corner.
///
/// # Panics
///
/// Never: every size is positive.
#[must_use]
pub fn grid_regimes() -> Vec<Regime<GridWorld>> {
    let corner = |size: i64| GridWorld::open(size, size, (0, 0), (size - 1, size - 1));
    vec![
        Regime {
            name: "open_32",
            world: corner(32).expect("valid grid"),
        },
        Regime {
            name: "open_128",
            world: corner(128).expect("valid grid"),
        },
        Regime {
            name: "scattered_64",
            world: corner(64)
                .expect("valid grid")
                .with_walls(scattered_walls(64, 25, 7)),
        },
        Regime {
            name: "overestimate_64",
            world: corner(64)
                .expect("valid grid")
                .with_walls(scattered_walls(64, 25, 7))
                .with_heuristic_weight(3),
        },
        Regime {
            name: "dead_end_48",
            world: corner(48)
                .expect("valid grid")
                .with_walls([(46, 47), (47, 46)]),
        },
    ]
}

/// The cubicle maze from favorite number 1352 to (31, 39).
#[must_use]
pub fn maze_regime() -> Regime<CubicleMaze> {
    Regime {
        name: "cubicle_maze_1352",
        world: CubicleMaze::new(1352, (1, 1), (31, 39)),
    }
}

/// The sample facility plus `extra_pairs` pairs on the first floor.
///
/// # Panics
///
/// Never: the sample layout is valid and the generated names are unique.
#[must_use]
pub fn facility_regime(extra_pairs: usize) -> Regime<Facility> {
    let mut facility = Facility::parse(FACILITY_SAMPLE).expect("valid facility");
    for i in 0..extra_pairs {
        facility = facility
            .with_pair(&format!("extra{i}"), 0)
            .expect("unique element");
    }
    Regime {
        name: if extra_pairs == 0 {
            "facility_sample"
        } else {
            "facility_extended"
        },
        world: facility,
    }
}
