//! Decision rules and the per-strategy rule tables.
//!
//! Each `Rule` is one `(condition, action)` pair: `Rule::apply` returns the
//! direction to take if the rule's condition holds and every query it needs
//! found something, and `None` otherwise. A strategy is an ordered slice of
//! rules; the first rule that yields a direction decides the turn.

use crate::board::{Direction, GameSnapshot, HeroRef, TileType};
use crate::config::Thresholds;
use crate::pathfind::PathResult;

use super::queries;

/// Query results gathered once per turn before any rule runs. Queries no
/// rule of the active table reads are left unset.
#[derive(Debug, Clone)]
pub struct Survey {
    pub hero: HeroRef,
    pub health_well: Option<PathResult>,
    pub enemy: Option<PathResult>,
    pub teammate: Option<PathResult>,
    pub mine: Option<PathResult>,
    /// Nearest unowned mine on its own, for strategies that ignore teams.
    pub unowned_mine: Option<PathResult>,
    pub can_take_lone_enemy: bool,
    /// Path to a health well whose first step leads away from the nearest
    /// enemy.
    pub escape: Option<PathResult>,
}

/// A survey entry a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    HealthWell,
    Enemy,
    Teammate,
    Mine,
    UnownedMine,
    LoneEnemy,
    Escape,
}

impl Survey {
    /// Runs the queries that `rules` read against the snapshot.
    pub fn gather(snapshot: &GameSnapshot, rules: &[Rule]) -> Self {
        let needs = |input| rules.iter().any(|r| r.inputs().contains(&input));
        let run = |input, query: fn(&GameSnapshot) -> Option<PathResult>| {
            if needs(input) {
                query(snapshot)
            } else {
                None
            }
        };

        let enemy = if needs(Input::Enemy) || needs(Input::LoneEnemy) || needs(Input::Escape) {
            queries::nearest_enemy(snapshot)
        } else {
            None
        };
        let escape = if needs(Input::Escape) {
            enemy
                .as_ref()
                .and_then(|e| queries::escape_toward(snapshot, e, TileType::HealthWell))
        } else {
            None
        };
        let can_take_lone_enemy =
            needs(Input::LoneEnemy) && queries::can_take_lone_enemy(snapshot, enemy.as_ref());

        Survey {
            hero: snapshot.active_hero,
            health_well: run(Input::HealthWell, queries::nearest_health_well),
            teammate: run(Input::Teammate, queries::nearest_teammate),
            mine: run(Input::Mine, queries::nearest_capturable_mine),
            unowned_mine: run(Input::UnownedMine, queries::nearest_unowned_mine),
            can_take_lone_enemy,
            escape,
            enemy,
        }
    }
}

/// A named rule of a decision chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// At full health, or facing a single enemy that is no healthier: attack
    /// the nearest enemy.
    Bloodlust,
    /// Not too healthy yourself, with a badly hurt teammate adjacent: go to it.
    RescueTeammate,
    /// At full health with a capturable mine adjacent: take it.
    CaptureAdjacentMine,
    /// Adjacent to a well and hurt: drink.
    DrinkFromWell,
    /// Critically hurt: get away from a nearby enemy, or head for a well.
    Retreat,
    /// Hurt and adjacent to a well: drink. Repeats `DrinkFromWell`'s
    /// condition as a safety net after `Retreat`.
    TopUpAtWell,
    /// Teammate too far away: move toward it.
    Regroup,
    /// Adjacent teammate is hurt: heal it.
    HealTeammate,
    /// Enemy adjacent: attack.
    Attack,
    /// Healthy with a mine close by: go capture it.
    Mine,
    /// Head for a teammate, or failing that an enemy.
    Advance,
    /// Hurt enough to abandon mining: head for a well.
    SelfishRetreat,
    /// Walk to the nearest mine the hero does not own itself.
    SeizeMine,
    /// Always head for the nearest well.
    SeekWell,
}

impl Rule {
    /// The survey entries this rule reads.
    pub const fn inputs(self) -> &'static [Input] {
        match self {
            Rule::Bloodlust => &[Input::Enemy, Input::LoneEnemy],
            Rule::RescueTeammate | Rule::Regroup | Rule::HealTeammate => &[Input::Teammate],
            Rule::CaptureAdjacentMine | Rule::Mine => &[Input::Mine],
            Rule::DrinkFromWell | Rule::TopUpAtWell | Rule::SelfishRetreat | Rule::SeekWell => {
                &[Input::HealthWell]
            }
            Rule::Retreat => &[Input::HealthWell, Input::Enemy, Input::Teammate, Input::Escape],
            Rule::Attack => &[Input::Enemy],
            Rule::Advance => &[Input::Teammate, Input::Enemy],
            Rule::SeizeMine => &[Input::UnownedMine],
        }
    }

    /// Returns the direction this rule picks, or `None` if it does not apply.
    pub fn apply(self, s: &Survey, t: &Thresholds) -> Option<Direction> {
        let health = s.hero.health;
        let full = health >= t.full_health;
        match self {
            Rule::Bloodlust => {
                if full || s.can_take_lone_enemy {
                    direction(&s.enemy)
                } else {
                    None
                }
            }
            Rule::RescueTeammate => {
                let mate = s.teammate.as_ref()?;
                let mate_health = mate.hero()?.health;
                if health <= t.rescue_self_max
                    && mate.distance == 1
                    && mate_health < t.rescue_teammate_below
                {
                    Some(mate.direction)
                } else {
                    None
                }
            }
            Rule::CaptureAdjacentMine => {
                let mine = s.mine.as_ref()?;
                (full && mine.distance == 1).then_some(mine.direction)
            }
            Rule::DrinkFromWell | Rule::TopUpAtWell => {
                let well = s.health_well.as_ref()?;
                (well.distance == 1 && !full).then_some(well.direction)
            }
            Rule::Retreat => {
                if health > t.critical_health {
                    return None;
                }
                match &s.enemy {
                    Some(enemy) if enemy.distance <= t.threat_range => retreat_from(enemy, s),
                    _ => direction(&s.health_well),
                }
            }
            Rule::Regroup => {
                let mate = s.teammate.as_ref()?;
                (mate.distance > t.regroup_beyond).then_some(mate.direction)
            }
            Rule::HealTeammate => {
                let mate = s.teammate.as_ref()?;
                let mate_health = mate.hero()?.health;
                (mate.distance == 1 && mate_health <= t.heal_teammate_max)
                    .then_some(mate.direction)
            }
            Rule::Attack => {
                let enemy = s.enemy.as_ref()?;
                (enemy.distance == 1).then_some(enemy.direction)
            }
            Rule::Mine => {
                let mine = s.mine.as_ref()?;
                (health > t.mining_health_above && mine.distance <= t.mining_range)
                    .then_some(mine.direction)
            }
            Rule::Advance => direction(&s.teammate).or_else(|| direction(&s.enemy)),
            Rule::SelfishRetreat => {
                if health < t.selfish_retreat_below {
                    direction(&s.health_well)
                } else {
                    None
                }
            }
            Rule::SeizeMine => direction(&s.unowned_mine),
            Rule::SeekWell => direction(&s.health_well),
        }
    }
}

/// The retreat maneuver with an enemy inside the threat range. A missing
/// teammate counts as infinitely far away.
fn retreat_from(enemy: &PathResult, s: &Survey) -> Option<Direction> {
    let mate_distance = s.teammate.as_ref().map_or(usize::MAX, |m| m.distance);
    if let Some(escape) = &s.escape {
        if escape.distance < mate_distance {
            return Some(escape.direction);
        }
    }
    if let Some(well) = s.health_well.as_ref().filter(|w| w.distance == 1) {
        return Some(well.direction);
    }
    let mate = s.teammate.as_ref()?;
    if mate.distance == 1 {
        // Stand with the teammate and fight.
        Some(enemy.direction)
    } else {
        Some(mate.direction)
    }
}

fn direction(result: &Option<PathResult>) -> Option<Direction> {
    result.as_ref().map(|r| r.direction)
}

/// Barbarian healer miner: fight when healthy, heal and regroup otherwise,
/// mine opportunistically.
pub const HEALER_MINER: &[Rule] = &[
    Rule::Bloodlust,
    Rule::RescueTeammate,
    Rule::CaptureAdjacentMine,
    Rule::DrinkFromWell,
    Rule::Retreat,
    Rule::TopUpAtWell,
    Rule::Regroup,
    Rule::HealTeammate,
    Rule::Attack,
    Rule::Mine,
    Rule::Advance,
];

/// Captures mines regardless of who owns them, healing only when needed.
pub const SELFISH_MINER: &[Rule] = &[Rule::SelfishRetreat, Rule::TopUpAtWell, Rule::SeizeMine];

/// Stays at the nearest well.
pub const COWARD: &[Rule] = &[Rule::SeekWell];
