//! Compact text notation for boards.
//!
//! One board row per line, cells separated by whitespace:
//!
//! | token               | tile                                   |
//! |---------------------|----------------------------------------|
//! | `.`                 | unoccupied                             |
//! | `#`                 | wall                                   |
//! | `+`                 | health well                            |
//! | `$`                 | unowned diamond mine                   |
//! | `$<id>`             | mine owned by hero `<id>`              |
//! | `@<team>:<health>`  | the active hero                        |
//! | `h<team>:<health>`  | any other hero                         |
//!
//! Heroes are numbered in row-major order starting at 0, the active hero
//! included. Blank lines are skipped. Exactly one `@` is required.

use std::collections::HashMap;

use crate::board::{
    Board, BoardError, Coord, GameSnapshot, HeroId, HeroRef, TeamId, Tile, TileKind,
};

/// Errors that can occur during layout parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid cell token '{token}' at {coord}")]
    InvalidToken { token: String, coord: Coord },

    #[error("invalid hero health '{0}' (expected 0..=100)")]
    InvalidHealth(String),

    #[error("mine at {coord} is owned by unknown hero {owner}")]
    UnknownOwner { coord: Coord, owner: HeroId },

    #[error("expected exactly one active hero, found {0}")]
    ActiveHeroCount(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A cell before mine owners are resolved.
enum Cell {
    Kind(TileKind),
    OwnedMine(HeroId),
}

/// Parses a layout string into a snapshot.
pub fn parse_layout(s: &str) -> Result<GameSnapshot, LayoutError> {
    let mut cells: Vec<Vec<Cell>> = Vec::new();
    let mut heroes: HashMap<HeroId, HeroRef> = HashMap::new();
    let mut active: Vec<HeroRef> = Vec::new();
    let mut next_id: HeroId = 0;

    for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row = cells.len();
        let mut out = Vec::new();
        for (col, token) in line.split_whitespace().enumerate() {
            let coord = Coord::new(row, col);
            let invalid = || LayoutError::InvalidToken {
                token: token.to_string(),
                coord,
            };
            let cell = match token {
                "." => Cell::Kind(TileKind::Unoccupied),
                "#" => Cell::Kind(TileKind::Wall),
                "+" => Cell::Kind(TileKind::HealthWell),
                "$" => Cell::Kind(TileKind::DiamondMine { owner: None }),
                t if t.starts_with('$') => {
                    let owner = t[1..].parse::<HeroId>().map_err(|_| invalid())?;
                    Cell::OwnedMine(owner)
                }
                t if t.starts_with('@') || t.starts_with('h') => {
                    let (team, health) = parse_hero(&t[1..]).ok_or_else(invalid)?;
                    let health = parse_health(health)?;
                    let hero = HeroRef {
                        id: next_id,
                        team,
                        health,
                        coord,
                    };
                    next_id += 1;
                    heroes.insert(hero.id, hero);
                    if t.starts_with('@') {
                        active.push(hero);
                    }
                    Cell::Kind(TileKind::Hero(hero))
                }
                _ => return Err(invalid()),
            };
            out.push(cell);
        }
        cells.push(out);
    }

    if active.len() != 1 {
        return Err(LayoutError::ActiveHeroCount(active.len()));
    }

    let mut rows = Vec::with_capacity(cells.len());
    for (r, row) in cells.into_iter().enumerate() {
        let mut tiles = Vec::with_capacity(row.len());
        for (c, cell) in row.into_iter().enumerate() {
            let coord = Coord::new(r, c);
            let kind = match cell {
                Cell::Kind(kind) => kind,
                Cell::OwnedMine(owner) => {
                    let hero = heroes
                        .get(&owner)
                        .copied()
                        .ok_or(LayoutError::UnknownOwner { coord, owner })?;
                    TileKind::DiamondMine { owner: Some(hero) }
                }
            };
            tiles.push(Tile::new(coord, kind));
        }
        rows.push(tiles);
    }

    let board = Board::from_rows(rows)?;
    Ok(GameSnapshot::new(board, active[0]))
}

/// Splits `<team>:<health>`.
fn parse_hero(s: &str) -> Option<(TeamId, &str)> {
    let (team, health) = s.split_once(':')?;
    Some((team.parse().ok()?, health))
}

fn parse_health(s: &str) -> Result<u8, LayoutError> {
    match s.parse::<u8>() {
        Ok(h) if h <= 100 => Ok(h),
        _ => Err(LayoutError::InvalidHealth(s.to_string())),
    }
}

/// Formats a snapshot in layout notation. Columns are padded so rows line
/// up. Mine owners are written by their row-major hero index, the numbering
/// `parse_layout` assigns, so parsing the output yields the same board with
/// heroes renumbered. An owner that is not on the board is written as an
/// unowned mine.
pub fn format_layout(snapshot: &GameSnapshot) -> String {
    let board = &snapshot.board;
    let index: HashMap<HeroId, HeroId> = board
        .iter()
        .filter_map(|t| t.hero())
        .zip(0..)
        .map(|(h, i)| (h.id, i))
        .collect();
    let tokens: Vec<Vec<String>> = board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|t| cell_token(t, snapshot.active_hero.id, &index))
                .collect()
        })
        .collect();
    let width = tokens.iter().flatten().map(String::len).max().unwrap_or(1);

    tokens
        .iter()
        .map(|row| {
            row.iter()
                .map(|t| format!("{:<width$}", t, width = width))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_token(tile: &Tile, active: HeroId, index: &HashMap<HeroId, HeroId>) -> String {
    match &tile.kind {
        TileKind::Unoccupied => ".".to_string(),
        TileKind::Wall => "#".to_string(),
        TileKind::HealthWell => "+".to_string(),
        TileKind::DiamondMine { owner } => match owner.and_then(|h| index.get(&h.id)) {
            Some(i) => format!("${}", i),
            None => "$".to_string(),
        },
        TileKind::Hero(h) => {
            let marker = if h.id == active { '@' } else { 'h' };
            format!("{}{}:{}", marker, h.team, h.health)
        }
    }
}
