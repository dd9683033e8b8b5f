//! Walk out of a maze by keeping one hand on the wall
//!
//! A [Maze] holds a fixed wall layout, a start cell, an end cell and a
//! walker. A [WallFollower] moves the walker one cell per step until it
//! reaches the end, reporting each [Step] so that a caller can animate it.
//!
//! # Examples
//! ## Corridor (two steps)
//! ```
//! use maze_walker::{Maze, Orientation, SolveType, WallFollower};
//!
//! let text = ["#######", "#X   E#", "#######"].join("\n");
//! let mut maze = Maze::parse_ascii(&text, Orientation::East).unwrap();
//! let solution = WallFollower::new(&mut maze, SolveType::HugLeft)
//!     .solve(None)
//!     .unwrap();
//! assert_eq!(solution.len(), 2);
//! assert!(maze.is_finished());
//! ```
//!
//! ## Step by step
//! ```
//! use maze_walker::{Cell, Maze, Orientation, SolveType, WallFollower};
//!
//! let text = [
//!     "#######",
//!     "#X    #",
//!     "### # #",
//!     "#   #E#",
//!     "#######",
//! ]
//! .join("\n");
//! let mut maze = Maze::parse_ascii(&text, Orientation::East).unwrap();
//! for step in WallFollower::new(&mut maze, SolveType::HugRight) {
//!     let step = step.unwrap();
//!     println!("{} -> {} over {:?}", step.previous, step.current, step.midpoint);
//! }
//! assert_eq!(maze.current_location(), Cell::new(2, 0));
//! ```

pub mod endpoints;
pub mod maze;
pub mod orientation;
pub mod playback;
pub mod solver;

pub use maze::{Cell, Maze, MazeError, WallLayout};
pub use orientation::Orientation;
pub use solver::{Solution, SolveType, Step, WallFollower};
