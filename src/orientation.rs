//! Compass orientation of the walker

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Direction the walker is facing
///
/// The four values are ordered clockwise starting from north. `y` grows
/// towards the north, so the southern edge of the maze is row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// All orientations, clockwise from north
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Rotate one step counter-clockwise (north -> west)
    pub fn turn_left(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    /// Rotate one step clockwise (north -> east)
    pub fn turn_right(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Unit step `(dx, dy)` taken when moving forward
    pub fn offset(self) -> (isize, isize) {
        match self {
            Orientation::North => (0, 1),
            Orientation::East => (1, 0),
            Orientation::South => (0, -1),
            Orientation::West => (-1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::North => "north",
            Orientation::East => "east",
            Orientation::South => "south",
            Orientation::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Orientation::North),
            "e" | "east" => Ok(Orientation::East),
            "s" | "south" => Ok(Orientation::South),
            "w" | "west" => Ok(Orientation::West),
            other => bail!("Unknown orientation `{}`", other),
        }
    }
}
