//! Maze model: wall layout and the walker moving inside it
//!
//! Walls are stored in a doubled coordinate space. A maze `width` cells wide
//! and `height` cells tall is addressed as a `(2 * width + 1) x (2 * height + 1)`
//! grid, where cell `(x, y)` lives at `(2x + 1, 2y + 1)` and the address
//! between two adjacent cells holds the wall separating them. The outer ring
//! is always wall.

use std::fmt;

use anyhow::{anyhow, bail};
use itertools::iproduct;
use log::trace;
use thiserror::Error;

use crate::orientation::Orientation;

/// Address in the doubled coordinate space, `(x, y)`
pub type Doubled = (usize, usize);

/// Location of a cell in the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Adjacent cell in direction `orientation`
    ///
    /// Returns `None` if the step would leave the non-negative quadrant. The
    /// upper bounds of a maze are not checked here.
    pub fn neighbour(self, orientation: Orientation) -> Option<Cell> {
        let (dx, dy) = orientation.offset();
        Some(Cell {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Cells are adjacent if they differ by one along exactly one axis
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Address of the cell in the doubled coordinate space
    pub fn doubled(self) -> Doubled {
        (2 * self.x + 1, 2 * self.y + 1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mean of two doubled addresses
///
/// For two adjacent cells this is the wall address between them.
pub fn midpoint(a: Doubled, b: Doubled) -> Doubled {
    ((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}

/// Contract violations raised by the walker
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("cannot move {facing} from {at}: the way is blocked")]
    Blocked { at: Cell, facing: Orientation },
    #[error("walker at {at} is walled in on every side")]
    Enclosed { at: Cell },
}

/// Fixed topology of the maze
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallLayout {
    width: usize,
    height: usize,
    /// Wall flags in doubled coordinates, indexed `[y][x]`
    walls: Vec<Vec<bool>>,
}

impl WallLayout {
    const S_WALL: char = '#';
    const S_OPEN: char = ' ';
    const S_SEEN: char = '.';
    const S_START: char = 'X';
    const S_END: char = 'E';

    /// Layout without any internal walls
    ///
    /// Only the outer ring and the pillars between cell corners are wall.
    pub fn open(width: usize, height: usize) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            bail!("Maze must be at least 1x1, got {}x{}", width, height);
        }
        let (w2, h2) = (2 * width + 1, 2 * height + 1);
        let walls = (0..h2)
            .map(|y| {
                (0..w2)
                    .map(|x| {
                        x == 0 || y == 0 || x == w2 - 1 || y == h2 - 1 || (x % 2 == 0 && y % 2 == 0)
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            width,
            height,
            walls,
        })
    }

    /// Parse a layout from text, ignoring start and end markers
    ///
    /// See [Maze::parse_ascii] for the format.
    pub fn parse_ascii(text: &str) -> anyhow::Result<Self> {
        Ok(Self::parse_marked(text)?.0)
    }

    /// Parse a layout together with the `X` and `E` marker cells, if any
    fn parse_marked(text: &str) -> anyhow::Result<(Self, Option<Cell>, Option<Cell>)> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let h2 = rows.len();
        let w2 = rows.first().map_or(0, Vec::len);
        if h2 < 3 || w2 < 3 || h2 % 2 == 0 || w2 % 2 == 0 {
            bail!(
                "Maze text must have an odd number (at least 3) of rows and columns, got {}x{}",
                w2,
                h2
            );
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != w2) {
            bail!("Row {} has {} characters, expected {}", r, row.len(), w2);
        }

        let (width, height) = ((w2 - 1) / 2, (h2 - 1) / 2);
        let mut layout = Self::open(width, height)?;
        let mut start = None;
        let mut end = None;

        for (r, row) in rows.iter().enumerate() {
            // First text row is the northern edge
            let y = h2 - 1 - r;
            for (x, c) in row.iter().enumerate() {
                let is_cell = x % 2 == 1 && y % 2 == 1;
                let is_fixed =
                    x == 0 || y == 0 || x == w2 - 1 || y == h2 - 1 || (x % 2 == 0 && y % 2 == 0);
                match *c {
                    Self::S_WALL if is_cell => {
                        bail!("Cell at row={}, column={} cannot be a wall", r, x)
                    }
                    Self::S_WALL => layout.walls[y][x] = true,
                    Self::S_OPEN | Self::S_SEEN if is_fixed => {
                        bail!("Expected wall at row={}, column={}", r, x)
                    }
                    Self::S_OPEN | Self::S_SEEN => layout.walls[y][x] = false,
                    Self::S_START | Self::S_END if !is_cell => {
                        bail!("Marker `{}` at row={}, column={} is not on a cell", c, r, x)
                    }
                    Self::S_START | Self::S_END => {
                        let slot = if *c == Self::S_START { &mut start } else { &mut end };
                        if slot.is_some() {
                            bail!("Marker `{}` appears more than once", c);
                        }
                        *slot = Some(Cell::new(x / 2, y / 2));
                    }
                    val => bail!("Unexpected character `{}` at row={}, column={}", val, r, x),
                }
            }
        }

        Ok((layout, start, end))
    }

    /// Put a wall between adjacent cells `a` and `b`
    pub fn with_wall(mut self, a: Cell, b: Cell) -> anyhow::Result<Self> {
        let (x, y) = self.wall_address(a, b)?;
        self.walls[y][x] = true;
        Ok(self)
    }

    /// Remove the wall between adjacent cells `a` and `b`
    pub fn without_wall(mut self, a: Cell, b: Cell) -> anyhow::Result<Self> {
        let (x, y) = self.wall_address(a, b)?;
        self.walls[y][x] = false;
        Ok(self)
    }

    fn wall_address(&self, a: Cell, b: Cell) -> anyhow::Result<Doubled> {
        if !self.contains(a) || !self.contains(b) {
            bail!(
                "Cells {} and {} are not both inside the {}x{} maze",
                a,
                b,
                self.width,
                self.height
            );
        }
        if !a.is_adjacent(b) {
            bail!("Cells {} and {} are not adjacent", a, b);
        }
        Ok(midpoint(a.doubled(), b.doubled()))
    }

    /// Whether movement between `a` and `b` is blocked
    ///
    /// Cells that are not adjacent, or not both inside the maze, count as
    /// blocked.
    pub fn has_wall_between(&self, a: Cell, b: Cell) -> bool {
        match self.wall_address(a, b) {
            Ok((x, y)) => self.walls[y][x],
            Err(_) => true,
        }
    }

    /// Wall flag at a doubled address; outside the grid counts as wall
    pub fn is_wall_at(&self, (x, y): Doubled) -> bool {
        self.walls
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(true)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size `(width, height)` of the doubled grid
    pub fn doubled_size(&self) -> Doubled {
        (2 * self.width + 1, 2 * self.height + 1)
    }

    /// All cells, row by row from the southern edge
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.height, 0..self.width).map(|(y, x)| Cell { x, y })
    }
}

/// Position and facing of the walker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walker {
    position: Cell,
    orientation: Orientation,
    finished: bool,
}

impl Walker {
    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Maze with a walker travelling from a start cell to an end cell
///
/// Start and end are fixed at construction. The walker changes only through
/// [Maze::turn_left], [Maze::turn_right] and [Maze::move_forward].
#[derive(Clone, Debug)]
pub struct Maze {
    layout: WallLayout,
    start: Cell,
    end: Cell,
    walker: Walker,
}

impl Maze {
    /// Place a walker at `start`, facing `facing`
    ///
    /// Returns error if `start` or `end` is outside the layout. When they are
    /// equal the maze is finished from the outset.
    pub fn new(
        layout: WallLayout,
        start: Cell,
        end: Cell,
        facing: Orientation,
    ) -> anyhow::Result<Self> {
        for (name, cell) in [("Start", start), ("End", end)] {
            if !layout.contains(cell) {
                bail!(
                    "{} {} is outside the {}x{} maze",
                    name,
                    cell,
                    layout.width(),
                    layout.height()
                );
            }
        }
        Ok(Self {
            layout,
            start,
            end,
            walker: Walker {
                position: start,
                orientation: facing,
                finished: start == end,
            },
        })
    }

    /// Parse maze from its text representation
    ///
    /// - `text`: `2h + 1` lines of `2w + 1` characters. `#` is wall, a space
    ///   or `.` is open, `X` marks the start cell and `E` the end cell. The
    ///   first line is the northern edge.
    /// - `facing`: initial orientation of the walker.
    ///
    /// Returns error on ragged or even-sized input, unknown characters,
    /// markers outside cell addresses, missing markers, or gaps in the outer
    /// ring.
    ///
    /// # Examples
    /// ```
    /// use maze_walker::{Cell, Maze, Orientation};
    ///
    /// let text = ["#######", "#X   E#", "#######"].join("\n");
    /// let maze = Maze::parse_ascii(&text, Orientation::East).unwrap();
    /// assert_eq!(maze.start(), Cell::new(0, 0));
    /// assert_eq!(maze.end(), Cell::new(2, 0));
    /// ```
    pub fn parse_ascii(text: &str, facing: Orientation) -> anyhow::Result<Self> {
        let (layout, start, end) = WallLayout::parse_marked(text)?;
        let start =
            start.ok_or_else(|| anyhow!("Start `{}` not found in maze", WallLayout::S_START))?;
        let end = end.ok_or_else(|| anyhow!("End `{}` not found in maze", WallLayout::S_END))?;
        Self::new(layout, start, end, facing)
    }

    /// Whether the cell ahead is inside the maze and not walled off
    pub fn can_move(&self) -> bool {
        self.cell_ahead().is_some()
    }

    fn cell_ahead(&self) -> Option<Cell> {
        let at = self.walker.position;
        at.neighbour(self.walker.orientation)
            .filter(|next| !self.layout.has_wall_between(at, *next))
    }

    pub fn turn_left(&mut self) {
        self.walker.orientation = self.walker.orientation.turn_left();
        trace!("Turned left, now facing {}", self.walker.orientation);
    }

    pub fn turn_right(&mut self) {
        self.walker.orientation = self.walker.orientation.turn_right();
        trace!("Turned right, now facing {}", self.walker.orientation);
    }

    /// Advance one cell in the current orientation
    ///
    /// Must only be called when [Maze::can_move] holds. Otherwise nothing
    /// changes and [MazeError::Blocked] is returned.
    pub fn move_forward(&mut self) -> Result<Cell, MazeError> {
        let next = self.cell_ahead().ok_or(MazeError::Blocked {
            at: self.walker.position,
            facing: self.walker.orientation,
        })?;
        self.walker.position = next;
        if next == self.end {
            self.walker.finished = true;
        }
        Ok(next)
    }

    /// Whether the walker has reached the end; stays true once set
    pub fn is_finished(&self) -> bool {
        self.walker.finished
    }

    pub fn current_location(&self) -> Cell {
        self.walker.position
    }

    pub fn orientation(&self) -> Orientation {
        self.walker.orientation
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    pub fn layout(&self) -> &WallLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::{midpoint, Cell, Maze, MazeError, WallLayout};
    use crate::orientation::Orientation;

    const SMALL: &str = "
#######
#X    #
### # #
#   #E#
#######";

    #[test]
    fn parse_maze_input() {
        let maze = Maze::parse_ascii(SMALL.trim(), Orientation::East).unwrap();
        let layout = maze.layout();

        assert_eq!((layout.width(), layout.height()), (3, 2));
        assert_eq!(maze.start(), Cell::new(0, 1));
        assert_eq!(maze.end(), Cell::new(2, 0));
        assert_eq!(maze.current_location(), maze.start());
        assert!(!maze.is_finished());

        assert!(layout.has_wall_between(Cell::new(0, 0), Cell::new(0, 1)));
        assert!(layout.has_wall_between(Cell::new(1, 0), Cell::new(2, 0)));
        assert!(!layout.has_wall_between(Cell::new(1, 0), Cell::new(1, 1)));
        assert!(!layout.has_wall_between(Cell::new(0, 0), Cell::new(1, 0)));
        assert_eq!(layout.cells().count(), 6);
    }

    #[test]
    fn layout_ignores_markers() {
        let layout = WallLayout::parse_ascii("#######\n#     #\n#######").unwrap();
        assert_eq!((layout.width(), layout.height()), (3, 1));
        assert!(Maze::parse_ascii("#######\n#     #\n#######", Orientation::East).is_err());
    }

    #[test]
    fn walls_are_symmetric() {
        let maze = Maze::parse_ascii(SMALL.trim(), Orientation::East).unwrap();
        let layout = maze.layout();
        for a in layout.cells() {
            for b in layout.cells() {
                assert_eq!(layout.has_wall_between(a, b), layout.has_wall_between(b, a));
            }
        }
    }

    #[test]
    fn non_adjacent_cells_are_blocked() {
        let layout = WallLayout::open(3, 3).unwrap();
        assert!(layout.has_wall_between(Cell::new(0, 0), Cell::new(1, 1)));
        assert!(layout.has_wall_between(Cell::new(0, 0), Cell::new(0, 0)));
        assert!(layout.has_wall_between(Cell::new(2, 2), Cell::new(3, 2)));
        assert!(layout.with_wall(Cell::new(0, 0), Cell::new(2, 0)).is_err());
    }

    #[test]
    fn builder_adds_and_removes_walls() {
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 0);
        let layout = WallLayout::open(2, 1).unwrap().with_wall(a, b).unwrap();
        assert!(layout.has_wall_between(a, b));
        assert!(layout.is_wall_at(midpoint(a.doubled(), b.doubled())));
        let layout = layout.without_wall(b, a).unwrap();
        assert!(!layout.has_wall_between(a, b));
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(WallLayout::open(0, 3).is_err());
    }

    #[test]
    fn can_move_has_no_side_effects() {
        let maze = Maze::parse_ascii(SMALL.trim(), Orientation::North).unwrap();
        let before = maze.walker().clone();
        for _ in 0..5 {
            assert!(!maze.can_move());
        }
        assert_eq!(maze.walker(), &before);
    }

    #[test]
    fn move_follows_orientation() {
        let mut maze = Maze::parse_ascii(SMALL.trim(), Orientation::East).unwrap();
        assert!(maze.can_move());
        let next = maze.move_forward().unwrap();
        assert_eq!(next, Cell::new(1, 1));
        assert_eq!(maze.current_location(), next);
        assert_eq!(maze.orientation(), Orientation::East);

        maze.turn_right();
        assert_eq!(maze.orientation(), Orientation::South);
        assert_eq!(maze.current_location(), next);
        assert_eq!(maze.move_forward().unwrap(), Cell::new(1, 0));
    }

    #[test]
    fn blocked_move_is_reported_and_changes_nothing() {
        let mut maze = Maze::parse_ascii(SMALL.trim(), Orientation::South).unwrap();
        let before = maze.walker().clone();
        assert!(!maze.can_move());
        assert_eq!(
            maze.move_forward(),
            Err(MazeError::Blocked {
                at: Cell::new(0, 1),
                facing: Orientation::South
            })
        );
        assert_eq!(maze.walker(), &before);
    }

    #[test]
    fn reaching_end_finishes() {
        let mut maze = Maze::parse_ascii(SMALL.trim(), Orientation::East).unwrap();
        maze.move_forward().unwrap();
        maze.move_forward().unwrap();
        assert!(!maze.is_finished());
        maze.turn_right();
        maze.move_forward().unwrap();
        assert_eq!(maze.current_location(), maze.end());
        assert!(maze.is_finished());

        // Walking away again does not clear the flag
        maze.turn_left();
        maze.turn_left();
        maze.move_forward().unwrap();
        assert!(maze.is_finished());
    }

    #[test]
    fn start_equal_to_end_is_finished() {
        let layout = WallLayout::open(2, 2).unwrap();
        let maze = Maze::new(layout, Cell::new(1, 1), Cell::new(1, 1), Orientation::West).unwrap();
        assert!(maze.is_finished());
    }

    #[test]
    fn endpoints_must_be_inside() {
        let layout = WallLayout::open(2, 2).unwrap();
        assert!(Maze::new(layout, Cell::new(0, 0), Cell::new(2, 0), Orientation::West).is_err());
    }

    #[test]
    fn malformed_text_is_rejected() {
        let cases = [
            // Ragged
            "#####\n#X E#\n####",
            // Even width
            "####\n#XE#\n####",
            // Unknown character
            "#######\n#X ? E#\n#######",
            // Missing end
            "#######\n#X    #\n#######",
            // Duplicate start
            "#######\n#X X E#\n#######",
            // Marker on a wall address
            "#######\n# XE  #\n#######",
            // Hole in the outer ring
            "### ###\n#X   E#\n#######",
            // Wall on a cell address
            "#######\n#X # E#\n#######",
        ];
        for case in cases {
            assert!(
                Maze::parse_ascii(case, Orientation::North).is_err(),
                "accepted {:?}",
                case
            );
        }
    }

    #[test]
    fn doubled_addresses() {
        assert_eq!(Cell::new(0, 0).doubled(), (1, 1));
        assert_eq!(Cell::new(2, 1).doubled(), (5, 3));
        assert_eq!(
            midpoint(Cell::new(1, 1).doubled(), Cell::new(2, 1).doubled()),
            (4, 3)
        );
        assert!(Cell::new(0, 0).neighbour(Orientation::West).is_none());
        assert_eq!(
            Cell::new(0, 0).neighbour(Orientation::North),
            Some(Cell::new(0, 1))
        );
    }
}
