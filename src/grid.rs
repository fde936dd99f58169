use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A single cell of the maze: either a wall or an open pathway.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "+",
                Cell::Open => " ",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    /// Translate this point one cell in the given direction.
    ///
    /// Returns `None` if the move would leave the grid past row or column
    /// zero; positive overflow is left to the bounds check of the map that
    /// the resulting point is used with.
    pub fn step(self, dir: Direction) -> Option<Point> {
        let (d_row, d_col) = dir.delta();
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight compass directions a path may take, declared in the scan order
/// used by the solver. The order is part of the solver's contract: among
/// several open neighbors, the first one in this order is always expanded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in solver scan priority order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    // Lookup tables indexed by discriminant, same order as `ALL`.
    const DELTAS: [(isize, isize); 8] = [
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
    ];
    const OPPOSITES: [Direction; 8] = [
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
    ];

    /// The (row, column) change of a one-cell move in this direction.
    pub fn delta(self) -> (isize, isize) {
        Self::DELTAS[self as usize]
    }

    /// The direction pointing back the way we came.
    pub fn opposite(self) -> Direction {
        Self::OPPOSITES[self as usize]
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::North => "north",
                Direction::NorthEast => "north-east",
                Direction::East => "east",
                Direction::SouthEast => "south-east",
                Direction::South => "south",
                Direction::SouthWest => "south-west",
                Direction::West => "west",
                Direction::NorthWest => "north-west",
            }
        )
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "north-east" => Ok(Direction::NorthEast),
            "east" => Ok(Direction::East),
            "south-east" => Ok(Direction::SouthEast),
            "south" => Ok(Direction::South),
            "south-west" => Ok(Direction::SouthWest),
            "west" => Ok(Direction::West),
            "north-west" => Ok(Direction::NorthWest),
            _ => Err(anyhow::anyhow!("Invalid direction: {}", s)),
        }
    }
}

/// A rectangular maze backed by a single flat row-major buffer.
///
/// The maze is expected to be fully surrounded by wall cells, with the
/// entrance at `(1, 1)` and the goal at `(rows - 2, columns - 2)`. It is
/// populated once by its constructor and read-only for the duration of a
/// solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Maze {
    /// Create a maze of the given size with every cell a wall.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Wall; rows * columns],
        }
    }

    /// Create a maze from an existing flat row-major cell buffer.
    ///
    /// Panics if the buffer length does not match `rows * columns`.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(
            cells.len(),
            rows * columns,
            "cell buffer does not match maze dimensions"
        );
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Check that the point lies within the grid.
    pub fn is_valid(&self, p: Point) -> bool {
        p.row < self.rows && p.col < self.columns
    }

    pub fn get(&self, p: Point) -> Cell {
        assert!(self.is_valid(p), "point {} out of range", p);
        self.cells[p.row * self.columns + p.col]
    }

    /// Set a cell value. Only meant for construction-time population; the
    /// maze must not change while a solve is in progress.
    pub fn set(&mut self, p: Point, cell: Cell) {
        assert!(self.is_valid(p), "point {} out of range", p);
        self.cells[p.row * self.columns + p.col] = cell;
    }

    /// Whether the point is inside the grid and an open pathway.
    pub fn is_open(&self, p: Point) -> bool {
        self.is_valid(p) && self.get(p) == Cell::Open
    }

    /// The entrance of the maze.
    pub fn start(&self) -> Point {
        Point { row: 1, col: 1 }
    }

    /// The goal of the maze, in the opposite corner of the interior.
    pub fn goal(&self) -> Point {
        Point {
            row: self.rows - 2,
            col: self.columns - 2,
        }
    }

    /// Create a parallel storage with one `T::default()` per cell.
    pub fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> CellStorage<T> {
        CellStorage {
            rows: self.rows,
            columns: self.columns,
            cells: vec![Default::default(); self.rows * self.columns],
        }
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-cell storage parallel to a [`Maze`], backed by the same flat
/// row-major layout.
#[derive(Debug, Clone)]
pub struct CellStorage<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T: Copy + 'static> CellStorage<T> {
    pub fn get(&self, p: Point) -> T {
        self.cells[p.row * self.columns + p.col]
    }

    pub fn get_mut(&mut self, p: Point) -> &mut T {
        &mut self.cells[p.row * self.columns + p.col]
    }
}

impl<T: Display> Display for CellStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
