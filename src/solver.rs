//! Wall-following solver
//!
//! The walker keeps one hand on a wall: before every move it turns towards
//! that hand, then turns the other way until the cell ahead is open. The
//! solver holds no history, so it is only guaranteed to reach the end in a
//! simply-connected maze. If the layout has no path from start to end, or
//! the end sits inside a free-standing loop of walls, [WallFollower::solve]
//! without a step limit never returns.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::maze::{midpoint, Cell, Doubled, Maze, MazeError};

/// Rule used to pick the next move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveType {
    /// Keep the left hand on the wall
    HugLeft,
    /// Keep the right hand on the wall
    HugRight,
    /// Reserved for a backtracking solver; steps do nothing
    Recursive,
}

impl fmt::Display for SolveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveType::HugLeft => "left",
            SolveType::HugRight => "right",
            SolveType::Recursive => "recursive",
        };
        f.write_str(name)
    }
}

impl FromStr for SolveType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "hug-left" => Ok(SolveType::HugLeft),
            "right" | "hug-right" => Ok(SolveType::HugRight),
            "recursive" => Ok(SolveType::Recursive),
            other => bail!("Unknown solve type `{}`", other),
        }
    }
}

/// One completed move of the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Cell before the move
    pub previous: Cell,
    /// Cell after the move
    pub current: Cell,
    /// Doubled address between `previous` and `current`, passed over while moving
    pub midpoint: Doubled,
}

impl Step {
    fn between(previous: Cell, current: Cell) -> Self {
        Self {
            previous,
            current,
            midpoint: midpoint(previous.doubled(), current.doubled()),
        }
    }
}

/// Steps taken from start to end
#[derive(Debug, Clone)]
pub struct Solution {
    pub solve_type: SolveType,
    pub start: Cell,
    pub end: Cell,
    pub steps: Vec<Step>,
}

impl Solution {
    /// Number of moves taken
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Visited cells in order, including start & end
    pub fn path(&self) -> Vec<Cell> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|step| step.current))
            .collect()
    }

    /// Print report
    pub fn print_report(&self) {
        println!(
            "Hugging the {} wall reached {} from {} in {} steps.",
            self.solve_type,
            self.end,
            self.start,
            self.len()
        );
        println!("Path: {}", self.path().iter().join(" -> "));
    }
}

/// Drives a [Maze] one step at a time
pub struct WallFollower<'a> {
    maze: &'a mut Maze,
    solve_type: SolveType,
}

impl<'a> WallFollower<'a> {
    pub fn new(maze: &'a mut Maze, solve_type: SolveType) -> Self {
        Self { maze, solve_type }
    }

    pub fn maze(&self) -> &Maze {
        self.maze
    }

    /// Take a single step with the configured rule
    ///
    /// Returns `Ok(None)` without touching the walker when the maze is
    /// already finished, or when the rule is [SolveType::Recursive].
    pub fn step(&mut self) -> Result<Option<Step>, MazeError> {
        if self.maze.is_finished() {
            return Ok(None);
        }
        let previous = self.maze.current_location();
        match self.solve_type {
            SolveType::HugLeft => self.hug(Maze::turn_left, Maze::turn_right)?,
            SolveType::HugRight => self.hug(Maze::turn_right, Maze::turn_left)?,
            SolveType::Recursive => return Ok(None),
        }
        let step = Step::between(previous, self.maze.current_location());
        debug!(
            "Moved {} from {} to {}",
            self.maze.orientation(),
            step.previous,
            step.current
        );
        Ok(Some(step))
    }

    /// Turn towards the wall, then away from it until the way is open, then move
    fn hug(&mut self, towards: fn(&mut Maze), away: fn(&mut Maze)) -> Result<(), MazeError> {
        towards(&mut *self.maze);
        let mut turns = 0;
        while !self.maze.can_move() {
            // Every direction has been tried
            if turns == 3 {
                return Err(MazeError::Enclosed {
                    at: self.maze.current_location(),
                });
            }
            away(&mut *self.maze);
            turns += 1;
        }
        self.maze.move_forward()?;
        Ok(())
    }

    /// Step until the walker reaches the end
    ///
    /// - `step_limit`: give up with an error after this many steps. Without
    ///   a limit, a maze the rule cannot solve loops forever.
    ///
    /// Returns error for [SolveType::Recursive], which never makes progress.
    pub fn solve(mut self, step_limit: Option<usize>) -> anyhow::Result<Solution> {
        if self.solve_type == SolveType::Recursive && !self.maze.is_finished() {
            bail!("Recursive solving is not implemented");
        }
        let start = self.maze.current_location();
        let mut steps = Vec::new();
        while let Some(step) = self.step()? {
            steps.push(step);
            if step_limit.is_some_and(|limit| steps.len() >= limit) && !self.maze.is_finished() {
                warn!("Giving up after {} steps at {}", steps.len(), step.current);
                bail!(
                    "End {} not reached within {} steps",
                    self.maze.end(),
                    steps.len()
                );
            }
        }
        info!("Reached {} in {} steps", self.maze.end(), steps.len());
        Ok(Solution {
            solve_type: self.solve_type,
            start,
            end: self.maze.end(),
            steps,
        })
    }
}

/// Yields steps until the maze is finished
impl Iterator for WallFollower<'_> {
    type Item = Result<Step, MazeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}
