//! `GridWorld`: 4-connected rectangular grid with optional walls.
//!
//! Moves are right, left, down, up, in that order, each at cost 1. The
//! heuristic is Manhattan distance to the goal times a configurable weight;
//! a weight above 1 overestimates and gives up the shortest-path guarantee.

use std::collections::BTreeSet;
use std::convert::Infallible;

use wayfinder_search::contract::SearchSpace;

use crate::contract::{WorldError, WorldV1};

/// A grid cell `(x, y)`.
pub type Cell = (i64, i64);

/// Neighbor offsets, in push order.
const MOVES: [Cell; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rectangular grid world.
#[derive(Debug, Clone)]
pub struct GridWorld {
    id: String,
    width: i64,
    height: i64,
    start: Cell,
    goal: Cell,
    walls: BTreeSet<Cell>,
    heuristic_weight: u64,
}

impl GridWorld {
    /// An open `width` x `height` grid with no walls.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] if the grid is empty or `start` or
    /// `goal` lies outside it.
    pub fn open(width: i64, height: i64, start: Cell, goal: Cell) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::Invalid {
                detail: format!("grid must be non-empty, got {width}x{height}"),
            });
        }
        let world = Self {
            id: "open_grid".into(),
            width,
            height,
            start,
            goal,
            walls: BTreeSet::new(),
            heuristic_weight: 1,
        };
        for (name, cell) in [("start", start), ("goal", goal)] {
            if !world.in_bounds(cell) {
                return Err(WorldError::Invalid {
                    detail: format!("{name} {cell:?} outside {width}x{height} grid"),
                });
            }
        }
        Ok(world)
    }

    /// Parse a character map: `#` is a wall, `S` the start, `G` the goal,
    /// anything else open floor. Rows may have different lengths; the grid
    /// is as wide as the longest one and short rows are padded with walls.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] on a missing or repeated `S`/`G`.
    pub fn parse(map: &str) -> Result<Self, WorldError> {
        let mut start = None;
        let mut goal = None;
        let mut walls = BTreeSet::new();
        let mut row_lens = Vec::new();

        for (y, row) in (0i64..).zip(map.lines()) {
            let mut row_len = 0i64;
            for (x, ch) in (0i64..).zip(row.chars()) {
                row_len = x + 1;
                match ch {
                    '#' => {
                        walls.insert((x, y));
                    }
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.replace((x, y)).is_some() {
                            return Err(WorldError::Parse {
                                line: line_number(y),
                                detail: format!("more than one '{ch}'"),
                            });
                        }
                    }
                    _ => {}
                }
            }
            row_lens.push((y, row_len));
        }

        let width = row_lens.iter().map(|&(_, len)| len).max().unwrap_or(0);
        let height = row_lens.last().map_or(0, |&(y, _)| y + 1);
        for &(y, len) in &row_lens {
            walls.extend((len..width).map(|x| (x, y)));
        }

        let start = start.ok_or_else(|| WorldError::Parse {
            line: 0,
            detail: "no 'S' in map".into(),
        })?;
        let goal = goal.ok_or_else(|| WorldError::Parse {
            line: 0,
            detail: "no 'G' in map".into(),
        })?;

        let mut world = Self::open(width, height, start, goal)?;
        world.id = "walled_grid".into();
        world.walls = walls;
        Ok(world)
    }

    /// Add walls.
    #[must_use]
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Cell>) -> Self {
        self.walls.extend(walls);
        if !self.walls.is_empty() {
            self.id = "walled_grid".into();
        }
        self
    }

    /// Scale the heuristic. A weight of `0` would make every cell a goal and
    /// is clamped to `1`.
    #[must_use]
    pub fn with_heuristic_weight(mut self, weight: u64) -> Self {
        self.heuristic_weight = weight.max(1);
        self
    }

    /// Override the world identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The goal cell.
    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Whether `cell` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.walls.contains(&cell)
    }

    /// Grid dimensions `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (i64, i64) {
        (self.width, self.height)
    }

    fn in_bounds(&self, (x, y): Cell) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

fn line_number(y: i64) -> usize {
    usize::try_from(y).map_or(usize::MAX, |y| y + 1)
}

/// Manhattan distance between two cells.
#[must_use]
pub fn manhattan((ax, ay): Cell, (bx, by): Cell) -> u64 {
    ax.abs_diff(bx).saturating_add(ay.abs_diff(by))
}

impl SearchSpace for GridWorld {
    type State = Cell;
    type Error = Infallible;

    fn heuristic(&self, state: &Cell) -> Result<u64, Infallible> {
        Ok(manhattan(*state, self.goal).saturating_mul(self.heuristic_weight))
    }

    fn neighbors(&self, &(x, y): &Cell) -> Result<Vec<Cell>, Infallible> {
        Ok(MOVES
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&cell| self.is_open(cell))
            .collect())
    }
}

impl WorldV1 for GridWorld {
    fn world_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn describe(&self, (x, y): &Cell) -> String {
        format!("({x},{y})")
    }
}
