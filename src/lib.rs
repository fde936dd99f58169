pub mod find;
pub mod grid;
pub mod util;

pub use find::{PathResult, Solver, SolverState, Visited};
pub use grid::{Cell, CellStorage, Direction, Maze, Point};
