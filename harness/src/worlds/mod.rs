//! Demo worlds for the harness runner.

pub mod cubicle_maze;
pub mod facility;
pub mod grid;
