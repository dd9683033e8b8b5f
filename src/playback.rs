//! Terminal playback of a solution

use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::maze::{Doubled, Maze};
use crate::solver::{Solution, Step};

/// Character frame of the maze in doubled coordinates
pub struct Playback {
    /// Rows from the northern edge down
    squares: Vec<Vec<char>>,
}

impl Playback {
    const S_WALL: char = '#';
    const S_OPEN: char = ' ';
    const S_SEEN: char = '.';
    const S_CURRENT: char = '@';
    const S_START: char = 'X';
    const S_END: char = 'E';

    /// Initial frame: walls, start and end
    pub fn new(maze: &Maze) -> Self {
        let layout = maze.layout();
        let (w2, h2) = layout.doubled_size();
        let squares = (0..h2)
            .rev()
            .map(|y| {
                (0..w2)
                    .map(|x| {
                        if layout.is_wall_at((x, y)) {
                            Self::S_WALL
                        } else {
                            Self::S_OPEN
                        }
                    })
                    .collect()
            })
            .collect();
        let mut playback = Self { squares };
        playback.paint(maze.start().doubled(), Self::S_START);
        playback.paint(maze.end().doubled(), Self::S_END);
        playback
    }

    fn paint(&mut self, (x, y): Doubled, c: char) {
        let h2 = self.squares.len();
        if let Some(square) = self
            .squares
            .get_mut(h2.wrapping_sub(y + 1))
            .and_then(|row| row.get_mut(x))
        {
            *square = c;
        }
    }

    /// Mark the previous cell and the square passed over as seen
    pub fn apply(&mut self, step: &Step) {
        self.paint(step.previous.doubled(), Self::S_SEEN);
        self.paint(step.midpoint, Self::S_SEEN);
        self.paint(step.current.doubled(), Self::S_CURRENT);
    }

    pub fn render_frame(&self) -> String {
        self.squares.iter().map(|row| row.iter().join("")).join("\n")
    }

    /// Print solution to console
    ///
    /// ## Arguments
    /// - `solution`: Solution to the maze.
    /// - `step_ms`: Time step for each frame, milliseconds.
    pub fn play(mut self, solution: &Solution, step_ms: u64) {
        fn print_frame(frame: &str) {
            print!("\x1B[2J\x1B[1;1H");
            println!("{}", frame);
        }

        print_frame(&self.render_frame());
        for step in &solution.steps {
            thread::sleep(Duration::from_millis(step_ms));
            self.apply(step);
            print_frame(&self.render_frame());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Maze;
    use crate::orientation::Orientation;
    use crate::playback::Playback;
    use crate::solver::{SolveType, WallFollower};

    #[test]
    fn initial_frame_matches_input() {
        let text = "
#######
#X    #
### # #
#   #E#
#######"
            .trim();
        let maze = Maze::parse_ascii(text, Orientation::East).unwrap();
        assert_eq!(Playback::new(&maze).render_frame(), text);
    }

    #[test]
    fn steps_leave_a_trail() {
        let text = "
#######
#X   E#
#######"
            .trim();
        let mut maze = Maze::parse_ascii(text, Orientation::East).unwrap();
        let mut playback = Playback::new(&maze);
        let mut solver = WallFollower::new(&mut maze, SolveType::HugLeft);

        let step = solver.step().unwrap().unwrap();
        playback.apply(&step);
        assert_eq!(playback.render_frame(), "#######\n#..@ E#\n#######");

        let step = solver.step().unwrap().unwrap();
        playback.apply(&step);
        assert_eq!(playback.render_frame(), "#######\n#....@#\n#######");
    }
}
