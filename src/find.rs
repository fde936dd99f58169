use std::fmt::Display;

use crate::grid::{CellStorage, Direction, Maze, Point};

/// Marker recording whether the search has already stepped onto a cell.
///
/// Marking is idempotent: writing `visited` over `visited` changes nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visited(pub bool);

impl Visited {
    pub fn is_visited(self) -> bool {
        self.0
    }
}

impl Display for Visited {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.0 { "*" } else { " " })
    }
}

/// The path found by a successful solve, entrance first, goal last.
///
/// The path is *a* way through the maze, not necessarily the shortest one.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverState {
    Searching,
    Failed,
    Succeeded(PathResult),
}

impl SolverState {
    fn is_done(&self) -> bool {
        !matches!(self, SolverState::Searching)
    }
}

/// Depth-first backtracking solver over a [`Maze`].
///
/// The solver keeps a single cursor, a visited marker parallel to the maze
/// and a trail of `(position, direction)` pairs recording each forward step.
/// On a dead end the trail is popped and the cursor retreats; on an empty
/// trail the search has exhausted every reachable cell and fails.
///
/// A solver runs exactly one search: construct a fresh one per maze.
#[derive(Debug)]
pub struct Solver {
    start: Point,
    goal: Point,
    current: Point,
    visited: CellStorage<Visited>,
    trail: Vec<(Point, Direction)>,
    state: SolverState,
}

impl Solver {
    pub fn new(maze: &Maze) -> Self {
        let start = maze.start();
        let mut visited = maze.create_storage();
        // the entrance counts as visited before the first step
        *visited.get_mut(start) = Visited(true);

        Self {
            start,
            goal: maze.goal(),
            current: start,
            visited,
            trail: Vec::new(),
            state: SolverState::Searching,
        }
    }

    /// Run the search to a terminal state and hand back the visited marks.
    pub fn finish(mut self, maze: &Maze) -> (SolverState, CellStorage<Visited>) {
        loop {
            match self.step(maze) {
                SolverState::Searching => {}
                s => return (s, self.visited),
            }
        }
    }

    /// Execute a single transition of the search.
    ///
    /// Either the goal is reached, or the cursor advances to the first open
    /// unvisited neighbor in [`Direction::ALL`] scan order, or a dead end
    /// pops one trail entry. Calling `step` on a finished solver is a no-op
    /// that returns the terminal state again.
    pub fn step(&mut self, maze: &Maze) -> SolverState {
        if self.state.is_done() {
            return self.state.clone();
        }

        if self.current == self.goal {
            let mut path: Vec<Point> = self.trail.iter().map(|&(p, _)| p).collect();
            path.push(self.goal);

            log::info!("goal {} reached after {} forward steps", self.goal, path.len() - 1);
            self.state = SolverState::Succeeded(PathResult {
                path,
                start: self.start,
                goal: self.goal,
            });
            return self.state.clone();
        }

        // the first open, unvisited neighbor in scan order wins
        for dir in Direction::ALL {
            if let Some(next) = self.current.step(dir) {
                if maze.is_open(next) && !self.visited.get(next).is_visited() {
                    self.trail.push((self.current, dir));
                    self.current = next;
                    *self.visited.get_mut(next) = Visited(true);
                    log::debug!("visited {}", next);
                    return self.state.clone();
                }
            }
        }

        // dead end: retreat one step, or fail once there is nowhere left
        // to retreat to. The direction stored in the entry is not needed
        // when backing up, only the coordinate is restored.
        match self.trail.pop() {
            Some((back, _)) => self.current = back,
            None => {
                log::info!("no path from {} to {}", self.start, self.goal);
                self.state = SolverState::Failed;
            }
        }

        self.state.clone()
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn visited(&self) -> &CellStorage<Visited> {
        &self.visited
    }

    /// The forward steps taken so far and not yet backtracked over.
    pub fn trail(&self) -> &[(Point, Direction)] {
        &self.trail
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;
    use crate::grid::Cell;
    use crate::util::parse_maze;

    const SAMPLE: &str = "\
++++++++
+ ++ +++
++   + +
+ ++ +++
++ ++  +
++++++++";

    /// A maze that is all walls except for the listed open cells.
    fn walled_maze(rows: usize, columns: usize, open: &[(usize, usize)]) -> Maze {
        let mut maze = Maze::new(rows, columns);
        for &(row, col) in open {
            maze.set(Point { row, col }, Cell::Open);
        }
        maze
    }

    fn solve(maze: &Maze) -> SolverState {
        Solver::new(maze).finish(maze).0
    }

    #[test]
    fn test_entrance_is_goal() {
        // 3x3: entrance and goal are the same interior cell
        let maze = walled_maze(3, 3, &[(1, 1)]);
        assert_eq!(maze.start(), maze.goal());

        match solve(&maze) {
            SolverState::Succeeded(result) => {
                assert_eq!(result.path, vec![Point { row: 1, col: 1 }]);
            }
            s => panic!("expected success, got {:?}", s),
        }
    }

    #[test]
    fn test_adjacent_goal_reached_diagonally() {
        // entrance (1,1) and goal (2,2) touch along the south-east diagonal
        let maze = walled_maze(4, 4, &[(1, 1), (2, 2)]);

        match solve(&maze) {
            SolverState::Succeeded(result) => {
                assert_eq!(
                    result.path,
                    vec![Point { row: 1, col: 1 }, Point { row: 2, col: 2 }]
                );
            }
            s => panic!("expected success, got {:?}", s),
        }
    }

    #[test]
    fn test_non_adjacent_goal_fails_with_empty_trail() {
        // entrance (1,1) and goal (3,3) open, everything between them wall
        let maze = walled_maze(5, 5, &[(1, 1), (3, 3)]);

        let mut solver = Solver::new(&maze);
        while !matches!(solver.step(&maze), SolverState::Failed | SolverState::Succeeded(_)) {}

        assert_eq!(*solver.state(), SolverState::Failed);
        assert!(solver.trail().is_empty());
    }

    #[test]
    fn test_sample_maze_solves() {
        let maze = parse_maze(SAMPLE).unwrap();
        assert_eq!(maze.goal(), Point { row: 4, col: 6 });

        let result = match solve(&maze) {
            SolverState::Succeeded(result) => result,
            s => panic!("expected success, got {:?}", s),
        };

        assert_eq!(result.path.first(), Some(&maze.start()));
        assert_eq!(result.path.last(), Some(&maze.goal()));

        // every cell on the path is open and was expanded exactly once
        let mut seen = HashSet::new();
        for p in &result.path {
            assert!(maze.is_open(*p), "path steps onto a wall at {}", p);
            assert!(seen.insert(*p), "path expands {} twice", p);
        }

        // consecutive cells differ by exactly one direction delta
        for pair in result.path.windows(2) {
            let stepped = Direction::ALL
                .iter()
                .any(|dir| pair[0].step(*dir) == Some(pair[1]));
            assert!(stepped, "{} -> {} is not a single move", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_deterministic_visit_sequence() {
        let maze = parse_maze(SAMPLE).unwrap();

        let run = |maze: &Maze| {
            let mut solver = Solver::new(maze);
            let mut cursors = Vec::new();
            loop {
                match solver.step(maze) {
                    SolverState::Searching => cursors.push(solver.current()),
                    s => return (cursors, s),
                }
            }
        };

        let (first_seq, first_state) = run(&maze);
        let (second_seq, second_state) = run(&maze);
        assert_eq!(first_seq, second_seq);
        assert_eq!(first_state, second_state);
    }

    #[test]
    fn test_scan_order_prefers_earlier_directions() {
        // from the entrance east, south-east and south are all open;
        // east comes first in the scan order and must win
        let maze = walled_maze(
            5,
            5,
            &[
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3),
            ],
        );

        let mut solver = Solver::new(&maze);
        solver.step(&maze);
        assert_eq!(solver.current(), Point { row: 1, col: 2 });
        assert_eq!(
            solver.trail(),
            &[(Point { row: 1, col: 1 }, Direction::East)]
        );
    }

    #[test]
    fn test_step_after_terminal_state_is_noop() {
        let maze = walled_maze(3, 3, &[(1, 1)]);
        let mut solver = Solver::new(&maze);

        let first = solver.step(&maze);
        let second = solver.step(&maze);
        assert!(matches!(first, SolverState::Succeeded(_)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_visited_marking_is_idempotent() {
        let maze = Maze::new(4, 4);
        let mut marks = maze.create_storage::<Visited>();
        let p = Point { row: 2, col: 1 };

        assert!(!marks.get(p).is_visited());
        *marks.get_mut(p) = Visited(true);
        let once = marks.get(p);
        *marks.get_mut(p) = Visited(true);
        assert_eq!(marks.get(p), once);
        assert!(marks.get(p).is_visited());
    }

    #[test]
    fn test_visited_display_marks_expanded_cells() {
        let maze = walled_maze(3, 3, &[(1, 1)]);
        let (_, visited) = Solver::new(&maze).finish(&maze);
        assert_eq!(visited.to_string(), "   \n * \n   \n");
    }
}
