//! Movement directions.
//!
//! A turn answer is one of the four cardinal steps or `Stay`. Cardinal
//! directions are always enumerated in the fixed order North, East, South,
//! West, which is also the tie-break order of the path search.

use std::fmt;

/// A move the active hero can make this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Stay,
}

impl Direction {
    /// The four cardinal directions in search expansion order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the protocol name of the direction.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
            Direction::Stay => "Stay",
        }
    }

    /// Row and column offsets of one step in this direction.
    /// North decreases the row (distance from top).
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::Stay => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
