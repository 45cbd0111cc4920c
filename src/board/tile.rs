//! Tiles, heroes, and coordinates.
//!
//! Every tile carries its own coordinates. Hero tiles and mine owners share
//! the `HeroRef` identity type.

use std::fmt;

/// Hero identifier assigned by the game server.
pub type HeroId = u32;

/// Team identifier assigned by the game server.
pub type TeamId = u32;

/// A board position: `row` is the distance from the top edge, `col` the
/// distance from the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.row, self.col)
    }
}

/// Identity and state of a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeroRef {
    pub id: HeroId,
    pub team: TeamId,
    /// Health on a 0..=100 scale.
    pub health: u8,
    pub coord: Coord,
}

impl HeroRef {
    /// Returns true if `other` is on a different team.
    pub fn is_enemy_of(&self, other: &HeroRef) -> bool {
        self.team != other.team
    }

    /// Returns true if `other` is a different hero on the same team.
    pub fn is_teammate_of(&self, other: &HeroRef) -> bool {
        self.team == other.team && self.id != other.id
    }
}

/// The payload-free discriminant of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Unoccupied,
    Wall,
    HealthWell,
    DiamondMine,
    Hero,
}

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Unoccupied,
    Wall,
    HealthWell,
    /// A capturable mine; `owner` is `None` while unowned.
    DiamondMine { owner: Option<HeroRef> },
    Hero(HeroRef),
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub coord: Coord,
    pub kind: TileKind,
}

impl Tile {
    pub const fn new(coord: Coord, kind: TileKind) -> Self {
        Tile { coord, kind }
    }

    pub const fn tile_type(&self) -> TileType {
        match self.kind {
            TileKind::Unoccupied => TileType::Unoccupied,
            TileKind::Wall => TileType::Wall,
            TileKind::HealthWell => TileType::HealthWell,
            TileKind::DiamondMine { .. } => TileType::DiamondMine,
            TileKind::Hero(_) => TileType::Hero,
        }
    }

    /// Only unoccupied tiles can be walked through.
    pub const fn is_unoccupied(&self) -> bool {
        matches!(self.kind, TileKind::Unoccupied)
    }

    /// Returns the hero standing on this tile, if any.
    pub fn hero(&self) -> Option<&HeroRef> {
        match &self.kind {
            TileKind::Hero(h) => Some(h),
            _ => None,
        }
    }

    /// Returns `Some(owner)` for a mine tile and `None` for anything else.
    pub fn mine_owner(&self) -> Option<Option<&HeroRef>> {
        match &self.kind {
            TileKind::DiamondMine { owner } => Some(owner.as_ref()),
            _ => None,
        }
    }
}
