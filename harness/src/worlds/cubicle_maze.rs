//! `CubicleMaze`: the office-building maze generated from a favorite number.
//!
//! A location `(x, y)` with non-negative coordinates is open when
//! `x*x + 3*x + 2*x*y + y + y*y + favorite` has an even number of set bits,
//! and a wall otherwise. The maze is unbounded to the right and downward;
//! negative coordinates do not exist.

use std::collections::HashSet;
use std::convert::Infallible;

use wayfinder_search::contract::SearchSpace;

use crate::contract::WorldV1;

/// A maze location `(x, y)`.
pub type Point = (u64, u64);

/// Cubicle maze seeded by `favorite`, searched from `start` to `goal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubicleMaze {
    favorite: u64,
    start: Point,
    goal: Point,
}

impl CubicleMaze {
    /// A maze seeded by `favorite`.
    #[must_use]
    pub fn new(favorite: u64, start: Point, goal: Point) -> Self {
        Self {
            favorite,
            start,
            goal,
        }
    }

    /// Whether `(x, y)` is open floor.
    ///
    /// Arithmetic wraps: coordinates large enough to overflow the formula
    /// are still classified deterministically.
    #[must_use]
    pub fn is_open(&self, (x, y): Point) -> bool {
        let value = x
            .wrapping_mul(x)
            .wrapping_add(x.wrapping_mul(3))
            .wrapping_add(x.wrapping_mul(y).wrapping_mul(2))
            .wrapping_add(y)
            .wrapping_add(y.wrapping_mul(y))
            .wrapping_add(self.favorite);
        value.count_ones() % 2 == 0
    }

    /// The goal location.
    #[must_use]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Draw the `width` x `height` corner of the maze: `#` walls, `.` open
    /// floor, `O` locations on `path`. One line per row, newline-terminated.
    #[must_use]
    pub fn render(&self, width: u64, height: u64, path: &[Point]) -> String {
        let on_path: HashSet<Point> = path.iter().copied().collect();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                let ch = if on_path.contains(&(x, y)) {
                    'O'
                } else if self.is_open((x, y)) {
                    '.'
                } else {
                    '#'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl SearchSpace for CubicleMaze {
    type State = Point;
    type Error = Infallible;

    fn heuristic(&self, &(x, y): &Point) -> Result<u64, Infallible> {
        Ok(x.abs_diff(self.goal.0).saturating_add(y.abs_diff(self.goal.1)))
    }

    fn neighbors(&self, &(x, y): &Point) -> Result<Vec<Point>, Infallible> {
        let candidates = [
            x.checked_add(1).map(|x| (x, y)),
            x.checked_sub(1).map(|x| (x, y)),
            y.checked_add(1).map(|y| (x, y)),
            y.checked_sub(1).map(|y| (x, y)),
        ];
        Ok(candidates
            .into_iter()
            .flatten()
            .filter(|&p| self.is_open(p))
            .collect())
    }
}

impl WorldV1 for CubicleMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "cubicle_maze"
    }

    fn start(&self) -> Point {
        self.start
    }

    fn describe(&self, (x, y): &Point) -> String {
        format!("({x},{y})")
    }
}
