//! Game-server JSON snapshot decoding.
//!
//! The server sends the full game state every turn as
//! `{"activeHero": {...}, "board": {"lengthOfSide": N, "tiles": [[...]]}}`.
//! Tiles are tagged by `type` and carry `distanceFromTop` and
//! `distanceFromLeft`; hero tiles add `id`, `team`, `health`, and mines an
//! optional `owner` hero. Fields this engine has no use for are ignored.

use serde::Deserialize;

use crate::board::{Board, BoardError, Coord, GameSnapshot, HeroId, HeroRef, TeamId, Tile, TileKind};

/// Errors that can occur while decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lengthOfSide is {declared} but the grid has {rows} rows")]
    SideMismatch { declared: usize, rows: usize },

    #[error("hero tile at {coord} is missing '{field}'")]
    MissingHeroField { coord: Coord, field: &'static str },

    #[error("active hero at {0} is off the board")]
    ActiveHeroOffBoard(Coord),

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameData {
    active_hero: HeroData,
    board: BoardData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardData {
    length_of_side: usize,
    tiles: Vec<Vec<TileData>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum TileTypeData {
    Unoccupied,
    #[serde(alias = "Impassable")]
    Wall,
    HealthWell,
    DiamondMine,
    Hero,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileData {
    #[serde(rename = "type")]
    tile_type: TileTypeData,
    distance_from_top: usize,
    distance_from_left: usize,
    #[serde(default)]
    id: Option<HeroId>,
    #[serde(default)]
    team: Option<TeamId>,
    #[serde(default)]
    health: Option<i64>,
    #[serde(default)]
    owner: Option<HeroData>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeroData {
    id: HeroId,
    team: TeamId,
    #[serde(default)]
    health: i64,
    distance_from_top: usize,
    distance_from_left: usize,
}

impl HeroData {
    fn to_hero(self) -> HeroRef {
        HeroRef {
            id: self.id,
            team: self.team,
            health: clamp_health(self.health),
            coord: Coord::new(self.distance_from_top, self.distance_from_left),
        }
    }
}

/// Health outside 0..=100 (dead heroes, overheal) is clamped into range.
fn clamp_health(h: i64) -> u8 {
    h.clamp(0, 100) as u8
}

impl TileData {
    fn into_tile(self) -> Result<Tile, SnapshotError> {
        let coord = Coord::new(self.distance_from_top, self.distance_from_left);
        let kind = match self.tile_type {
            TileTypeData::Unoccupied => TileKind::Unoccupied,
            TileTypeData::Wall => TileKind::Wall,
            TileTypeData::HealthWell => TileKind::HealthWell,
            TileTypeData::DiamondMine => TileKind::DiamondMine {
                owner: self.owner.map(HeroData::to_hero),
            },
            TileTypeData::Hero => {
                let missing = |field| SnapshotError::MissingHeroField { coord, field };
                TileKind::Hero(HeroRef {
                    id: self.id.ok_or_else(|| missing("id"))?,
                    team: self.team.ok_or_else(|| missing("team"))?,
                    health: clamp_health(self.health.ok_or_else(|| missing("health"))?),
                    coord,
                })
            }
        };
        Ok(Tile::new(coord, kind))
    }
}

/// Decodes one turn's JSON into a snapshot.
pub fn parse_snapshot(json: &str) -> Result<GameSnapshot, SnapshotError> {
    let data: GameData = serde_json::from_str(json)?;

    let rows = data.board.tiles.len();
    if rows != data.board.length_of_side {
        return Err(SnapshotError::SideMismatch {
            declared: data.board.length_of_side,
            rows,
        });
    }

    let tiles = data
        .board
        .tiles
        .into_iter()
        .map(|row| row.into_iter().map(TileData::into_tile).collect())
        .collect::<Result<Vec<Vec<Tile>>, _>>()?;
    let board = Board::from_rows(tiles)?;

    let active_hero = data.active_hero.to_hero();
    if board.tile(active_hero.coord).is_none() {
        return Err(SnapshotError::ActiveHeroOffBoard(active_hero.coord));
    }

    Ok(GameSnapshot::new(board, active_hero))
}
