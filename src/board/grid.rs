//! The square tile grid.

use super::direction::Direction;
use super::tile::{Coord, Tile, TileKind};

/// Errors raised when assembling a board from raw rows.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,

    #[error("row {row} has {len} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("tile at {found} is stored at position {expected}")]
    MisplacedTile { expected: Coord, found: Coord },
}

/// A square grid of tiles indexed `[row][col]`.
///
/// Invariant: `tiles.len() == size` and every row has `size` tiles, each
/// carrying its own position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Board {
    /// Builds a board from its rows, checking the square-grid invariant.
    pub fn from_rows(tiles: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let size = tiles.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        for (r, row) in tiles.iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::NotSquare {
                    row: r,
                    len: row.len(),
                    expected: size,
                });
            }
            for (c, tile) in row.iter().enumerate() {
                let expected = Coord::new(r, c);
                if tile.coord != expected {
                    return Err(BoardError::MisplacedTile {
                        expected,
                        found: tile.coord,
                    });
                }
            }
        }
        Ok(Board { size, tiles })
    }

    /// Creates an `size`×`size` board of unoccupied tiles.
    pub fn open(size: usize) -> Self {
        let tiles = (0..size)
            .map(|r| {
                (0..size)
                    .map(|c| Tile::new(Coord::new(r, c), TileKind::Unoccupied))
                    .collect()
            })
            .collect();
        Board { size, tiles }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_valid(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(coord.row).and_then(|r| r.get(coord.col))
    }

    /// Replaces the contents of one tile. Out-of-range coordinates are ignored.
    pub fn set(&mut self, coord: Coord, kind: TileKind) {
        if let Some(tile) = self.tiles.get_mut(coord.row).and_then(|r| r.get_mut(coord.col)) {
            tile.kind = kind;
        }
    }

    /// Returns the coordinate one step from `coord`, or `None` past the edge.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = coord.row as isize + dr;
        let col = coord.col as isize + dc;
        if self.is_valid(row, col) {
            Some(Coord::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Returns the tile one step from `coord`, or `None` past the edge.
    pub fn tile_toward(&self, coord: Coord, direction: Direction) -> Option<&Tile> {
        self.neighbor(coord, direction).and_then(|c| self.tile(c))
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Iterates over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }
}
