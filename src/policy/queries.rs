//! Board queries used by the rule chains.
//!
//! Stateless functions over a snapshot. Each one runs a single path search
//! from the active hero with its own predicate.

use crate::board::{Direction, GameSnapshot, TileType};
use crate::pathfind::{search, search_avoiding, PathResult};

/// Nearest health well.
pub fn nearest_health_well(snapshot: &GameSnapshot) -> Option<PathResult> {
    nearest_of_type(snapshot, TileType::HealthWell)
}

/// Nearest tile of the given type.
pub fn nearest_of_type(snapshot: &GameSnapshot, tile_type: TileType) -> Option<PathResult> {
    search(&snapshot.board, snapshot.active_hero.coord, |t| {
        t.tile_type() == tile_type
    })
}

/// Nearest hero on another team. The matched hero is available through
/// [`PathResult::hero`].
pub fn nearest_enemy(snapshot: &GameSnapshot) -> Option<PathResult> {
    let me = snapshot.active_hero;
    search(&snapshot.board, me.coord, |t| {
        t.hero().is_some_and(|h| me.is_enemy_of(h))
    })
}

/// Nearest enemy with strictly less health than the active hero.
pub fn nearest_weaker_enemy(snapshot: &GameSnapshot) -> Option<PathResult> {
    let me = snapshot.active_hero;
    search(&snapshot.board, me.coord, |t| {
        t.hero()
            .is_some_and(|h| me.is_enemy_of(h) && h.health < me.health)
    })
}

/// Nearest other hero on the active hero's team.
pub fn nearest_teammate(snapshot: &GameSnapshot) -> Option<PathResult> {
    let me = snapshot.active_hero;
    search(&snapshot.board, me.coord, |t| {
        t.hero().is_some_and(|h| me.is_teammate_of(h))
    })
}

/// Nearest mine that is unowned or owned by another team.
pub fn nearest_non_team_mine(snapshot: &GameSnapshot) -> Option<PathResult> {
    let me = snapshot.active_hero;
    search(&snapshot.board, me.coord, |t| match t.mine_owner() {
        Some(Some(owner)) => owner.team != me.team,
        Some(None) => true,
        None => false,
    })
}

/// Nearest mine the active hero does not own itself. Mines held by
/// teammates count.
pub fn nearest_unowned_mine(snapshot: &GameSnapshot) -> Option<PathResult> {
    let me = snapshot.active_hero;
    search(&snapshot.board, me.coord, |t| match t.mine_owner() {
        Some(Some(owner)) => owner.id != me.id,
        Some(None) => true,
        None => false,
    })
}

/// The nearer of [`nearest_non_team_mine`] and [`nearest_unowned_mine`].
/// On equal distance the non-team result is kept, even if the two point at
/// different mines.
pub fn nearest_capturable_mine(snapshot: &GameSnapshot) -> Option<PathResult> {
    let non_team = nearest_non_team_mine(snapshot);
    let unowned = nearest_unowned_mine(snapshot);
    match (non_team, unowned) {
        (Some(a), Some(b)) => Some(if a.distance <= b.distance { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// Counts enemy heroes on the four tiles around the active hero.
pub fn adjacent_enemy_count(snapshot: &GameSnapshot) -> usize {
    let me = snapshot.active_hero;
    Direction::CARDINALS
        .iter()
        .filter_map(|&d| snapshot.board.tile_toward(me.coord, d))
        .filter(|t| t.hero().is_some_and(|h| me.is_enemy_of(h)))
        .count()
}

/// True when exactly one enemy is adjacent and the nearest enemy is no
/// healthier than the active hero.
pub fn can_take_lone_enemy(snapshot: &GameSnapshot, nearest_enemy: Option<&PathResult>) -> bool {
    let Some(enemy) = nearest_enemy.and_then(|e| e.hero()) else {
        return false;
    };
    adjacent_enemy_count(snapshot) == 1 && enemy.health <= snapshot.active_hero.health
}

/// Nearest tile of `target` type reached without stepping first in the
/// direction of `enemy`.
pub fn escape_toward(
    snapshot: &GameSnapshot,
    enemy: &PathResult,
    target: TileType,
) -> Option<PathResult> {
    search_avoiding(
        &snapshot.board,
        snapshot.active_hero.coord,
        enemy.direction,
        |t| t.tile_type() == target,
    )
}
