//! Board representation and turn-snapshot types.
//!
//! Contains the tile grid, tiles and heroes, movement directions, and the
//! per-turn snapshot handed to the decision policy.

pub mod direction;
pub mod grid;
pub mod snapshot;
pub mod tile;

pub use direction::Direction;
pub use grid::{Board, BoardError};
pub use snapshot::GameSnapshot;
pub use tile::{Coord, HeroId, HeroRef, TeamId, Tile, TileKind, TileType};
