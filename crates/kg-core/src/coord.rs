use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KgError;

/// An integer cell position on the world grid.
///
/// `x` grows to the east (right), `y` grows to the south (bottom), matching
/// the screen layout of the room files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Create a coordinate from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, or `None` if either axis leaves the `i32` range.
    pub fn checked_add(self, rhs: Coord) -> Option<Self> {
        Some(Self::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }

    /// Component-wise difference, or `None` if either axis leaves the `i32` range.
    pub fn checked_sub(self, rhs: Coord) -> Option<Self> {
        Some(Self::new(self.x.checked_sub(rhs.x)?, self.y.checked_sub(rhs.y)?))
    }

    /// The adjacent cell in the given direction. `None` at the edge of the grid.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.checked_add(Coord::new(dx, dy))
    }

    /// The orthogonal neighbors that exist, paired with the direction that
    /// leads there. Cells on the grid edge have fewer than four.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Coord)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.step(d).map(|c| (d, c)))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The side of a screen a door sits on.
///
/// The set is closed: anything else is rejected at the import boundary with
/// [`KgError::InvalidDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// West side.
    Left,
    /// East side.
    Right,
    /// North side.
    Up,
    /// South side.
    Bottom,
}

impl Direction {
    /// Every direction, in neighbor scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Bottom,
        Direction::Up,
    ];

    /// The direction a peer door must face to connect with this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Bottom,
            Self::Bottom => Self::Up,
        }
    }

    /// Grid offset of the neighbor cell on this side.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Bottom => (0, 1),
        }
    }

    /// The lowercase symbol used in room files and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for Direction {
    type Err = KgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "bottom" => Ok(Self::Bottom),
            other => Err(KgError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
