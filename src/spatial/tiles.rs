//! Tile shapes, cardinal directions and the geometric connection table
//!
//! Every tile is a pipe segment joining exactly two of the four cell edges. The
//! connection table here drives the territory contest; placement legality is
//! decided separately by the authored rule table in `algorithm::rules`.

use std::fmt;
use std::str::FromStr;

/// Number of distinct tile shapes
pub const TILE_COUNT: usize = 6;

/// Cardinal direction from a cell toward one of its neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward negative y
    Above,
    /// Toward positive y
    Below,
    /// Toward negative x
    Left,
    /// Toward positive x
    Right,
}

impl Direction {
    /// All directions in rule-table index order
    pub const ALL: [Self; 4] = [Self::Above, Self::Below, Self::Left, Self::Right];

    /// Order in which neighbors are checked, recomputed and visited
    pub const NEIGHBOR_ORDER: [Self; 4] = [Self::Left, Self::Right, Self::Above, Self::Below];

    /// Index into per-direction rule tables
    pub const fn index(self) -> usize {
        match self {
            Self::Above => 0,
            Self::Below => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Unit vector `(dx, dy)` with y growing downward
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Above => (0, -1),
            Self::Below => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One of the six pipe pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileShape {
    /// `─` joins left and right
    Horizontal,
    /// `│` joins above and below
    Vertical,
    /// `┗` joins above and right
    BottomLeftCorner,
    /// `┏` joins below and right
    TopLeftCorner,
    /// `┛` joins above and left
    BottomRightCorner,
    /// `┓` joins below and left
    TopRightCorner,
}

impl TileShape {
    /// Canonical order; every domain lists its survivors in this order
    pub const ALL: [Self; TILE_COUNT] = [
        Self::Horizontal,
        Self::Vertical,
        Self::BottomLeftCorner,
        Self::TopLeftCorner,
        Self::BottomRightCorner,
        Self::TopRightCorner,
    ];

    /// Position in the canonical order
    pub const fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
            Self::BottomLeftCorner => 2,
            Self::TopLeftCorner => 3,
            Self::BottomRightCorner => 4,
            Self::TopRightCorner => 5,
        }
    }

    /// Inverse of [`TileShape::index`]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Horizontal),
            1 => Some(Self::Vertical),
            2 => Some(Self::BottomLeftCorner),
            3 => Some(Self::TopLeftCorner),
            4 => Some(Self::BottomRightCorner),
            5 => Some(Self::TopRightCorner),
            _ => None,
        }
    }

    /// The two edges this piece connects, in contest order
    pub const fn connections(self) -> [Direction; 2] {
        match self {
            Self::Horizontal => [Direction::Left, Direction::Right],
            Self::Vertical => [Direction::Above, Direction::Below],
            Self::BottomLeftCorner => [Direction::Right, Direction::Above],
            Self::TopLeftCorner => [Direction::Right, Direction::Below],
            Self::BottomRightCorner => [Direction::Left, Direction::Above],
            Self::TopRightCorner => [Direction::Left, Direction::Below],
        }
    }

    /// Box-drawing glyph used in text output
    pub const fn glyph(self) -> char {
        match self {
            Self::Horizontal => '─',
            Self::Vertical => '│',
            Self::BottomLeftCorner => '┗',
            Self::TopLeftCorner => '┏',
            Self::BottomRightCorner => '┛',
            Self::TopRightCorner => '┓',
        }
    }

    /// Long kebab-case name accepted on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::BottomLeftCorner => "bottom-left",
            Self::TopLeftCorner => "top-left",
            Self::BottomRightCorner => "bottom-right",
            Self::TopRightCorner => "top-right",
        }
    }

    const fn short_name(self) -> &'static str {
        match self {
            Self::Horizontal => "h",
            Self::Vertical => "v",
            Self::BottomLeftCorner => "bl",
            Self::TopLeftCorner => "tl",
            Self::BottomRightCorner => "br",
            Self::TopRightCorner => "tr",
        }
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Error returned when a string names no tile shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTileShape(pub String);

impl fmt::Display for UnknownTileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tile shape '{}'", self.0)
    }
}

impl std::error::Error for UnknownTileShape {}

impl FromStr for TileShape {
    type Err = UnknownTileShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|shape| {
                needle == shape.name()
                    || needle == shape.short_name()
                    || needle.chars().eq(std::iter::once(shape.glyph()))
            })
            .ok_or_else(|| UnknownTileShape(s.to_string()))
    }
}
