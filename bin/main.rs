use mazewalk::{
    util::{parse_maze, random_maze},
    Solver, SolverState,
};

/// A static demo maze for running the solver without any input.
const DEMO_MAZE: &str = "\
++++++++++++++++++++++
+   +   ++ ++     ++++
+ +   +       +++ + ++
+ + +  ++  ++++   + ++
+++ ++++++    +++ +  +
+          ++  ++    +
+++++ ++++++   +++++ +
+     +   +++++++  + +
+ +++++++        +   +
+      +   ++    + +++
+++++ ++     +++++++ +
+ ++ ++   ++++  ++ +++
++++ +++++++  + ++++++
++   +++    ++++++ + +
+++ ++ +++++    ++   +
+   +++++    ++++   ++
+ ++     ++++  +++ +++
+ ++ ++++++++++++ + ++
+ ++ ++          ++ ++
+ ++   +++ +++   +++++
+++ ++++++   ++++    +
++++++++++++++++++++++";

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    // with two arguments, generate a random interior of that size;
    // otherwise solve the built-in demo maze
    let mut args = std::env::args().skip(1);
    let maze = match (args.next(), args.next()) {
        (Some(rows), Some(columns)) => {
            random_maze(rows.parse()?, columns.parse()?, &mut rand::rng())
        }
        _ => parse_maze(DEMO_MAZE)?,
    };

    println!("{}", maze);

    let (state, visited) = Solver::new(&maze).finish(&maze);

    match state {
        SolverState::Succeeded(result) => {
            println!(
                "found a path of {} moves from {} to {}:",
                result.path.len() - 1,
                result.start,
                result.goal
            );
            for point in &result.path {
                println!("  {}", point);
            }
        }
        SolverState::Failed => println!("no path from entrance to goal"),
        SolverState::Searching => unreachable!("finish only returns terminal states"),
    }

    println!("{}", visited);

    Ok(())
}
