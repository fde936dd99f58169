use rand::Rng;
use thiserror::Error;

use crate::grid::{Cell, Maze, Point};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("row {row} has length {len}, expected {expected}")]
    UnevenRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unexpected character {0:?} in maze text")]
    UnexpectedCharacter(char),
    #[error("maze must be at least 3x3 including its outer walls")]
    TooSmall,
}

/// Parse a maze from its text form, one line per row, `'+'` for walls and
/// `' '` for open pathways.
///
/// All rows must have the same length and no other characters are accepted.
/// A maze smaller than 3x3 cannot hold a walled border around its interior
/// and is rejected as well. On any of these the caller gets an error and no
/// maze at all; a malformed maze never reaches the solver.
pub fn parse_maze(text: &str) -> Result<Maze, ParseError> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    let rows = lines.len();
    let columns = lines.first().map_or(0, |line| line.chars().count());

    if rows < 3 || columns < 3 {
        return Err(ParseError::TooSmall);
    }

    let mut cells = Vec::with_capacity(rows * columns);
    for (row, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != columns {
            return Err(ParseError::UnevenRows {
                row,
                len,
                expected: columns,
            });
        }
        for character in line.chars() {
            cells.push(match character {
                '+' => Cell::Wall,
                ' ' => Cell::Open,
                other => return Err(ParseError::UnexpectedCharacter(other)),
            });
        }
    }

    Ok(Maze::from_cells(rows, columns, cells))
}

/// Generate a random maze with an interior of `rows x columns` cells.
///
/// The full maze is `(rows + 2) x (columns + 2)`: a wall border surrounds
/// the interior, the entrance and goal are always open, and every other
/// interior cell is open or wall with equal probability. The result is not
/// guaranteed to be solvable; callers must handle a failed solve.
pub fn random_maze<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Maze {
    let mut maze = Maze::new(rows + 2, columns + 2);
    let (start, goal) = (maze.start(), maze.goal());

    for row in 1..=rows {
        for col in 1..=columns {
            let p = Point { row, col };
            if p == start || p == goal || rng.random_bool(0.5) {
                maze.set(p, Cell::Open);
            }
        }
    }

    maze
}
