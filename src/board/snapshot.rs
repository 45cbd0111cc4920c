//! Per-turn game snapshot.
//!
//! Holds the complete view the decision policy works from: the board and the
//! hero being controlled this turn. Snapshots are built fresh every turn and
//! never mutated by the policy.

use super::grid::Board;
use super::tile::HeroRef;

/// The board plus the acting hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub active_hero: HeroRef,
}

impl GameSnapshot {
    pub fn new(board: Board, active_hero: HeroRef) -> Self {
        GameSnapshot { board, active_hero }
    }
}

