use std::fmt;

use serde::{Deserialize, Serialize};

/// Split axis of a BSP node. `Vertical` places children left/right (first
/// child on the left), `Horizontal` places them top/bottom (first on top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// Insert direction that lands a window in the first-child slot when a
    /// split of this orientation is carved out by yabai. The planners depend
    /// on this table for command generation.
    pub fn start_direction(self) -> Direction {
        match self {
            Orientation::Vertical => Direction::North,
            Orientation::Horizontal => Direction::West,
        }
    }

    pub fn end_direction(self) -> Direction { self.start_direction().opposite() }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::East => write!(f, "east"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Argument accepted by yabai's `--insert`: the four cardinal directions
/// plus the non-spatial `stack` slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertDirection {
    North,
    South,
    East,
    West,
    Stack,
}

impl From<Direction> for InsertDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => InsertDirection::North,
            Direction::South => InsertDirection::South,
            Direction::East => InsertDirection::East,
            Direction::West => InsertDirection::West,
        }
    }
}

impl fmt::Display for InsertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertDirection::North => write!(f, "north"),
            InsertDirection::South => write!(f, "south"),
            InsertDirection::East => write!(f, "east"),
            InsertDirection::West => write!(f, "west"),
            InsertDirection::Stack => write!(f, "stack"),
        }
    }
}
