//! Turn decision policy.
//!
//! Surveys the board once per turn, then walks the active strategy's rule
//! table in order. The first rule that yields a direction decides; if none
//! does, the hero stays put.

pub mod queries;
pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Direction, GameSnapshot};
use crate::config::{ConfigError, PolicyConfig};

pub use rules::{Input, Rule, Survey};

/// Selectable rule tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    HealerMiner,
    SelfishMiner,
    Coward,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::HealerMiner, Strategy::SelfishMiner, Strategy::Coward];

    /// The ordered rules of this strategy.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Strategy::HealerMiner => rules::HEALER_MINER,
            Strategy::SelfishMiner => rules::SELFISH_MINER,
            Strategy::Coward => rules::COWARD,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::HealerMiner => "healer-miner",
            Strategy::SelfishMiner => "selfish-miner",
            Strategy::Coward => "coward",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// The chosen direction and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// `None` when no rule applied and the hero stays.
    pub rule: Option<Rule>,
}

/// Evaluates a rule table against a survey in a single pass.
pub fn evaluate(rules: &[Rule], survey: &Survey, config: &PolicyConfig) -> Decision {
    rules
        .iter()
        .find_map(|&rule| {
            rule.apply(survey, &config.thresholds).map(|direction| Decision {
                direction,
                rule: Some(rule),
            })
        })
        .unwrap_or(Decision {
            direction: Direction::Stay,
            rule: None,
        })
}

/// Decides the turn and reports which rule fired.
pub fn explain(snapshot: &GameSnapshot, config: &PolicyConfig) -> Decision {
    let rules = config.strategy.rules();
    let survey = Survey::gather(snapshot, rules);
    let decision = evaluate(rules, &survey, config);
    tracing::debug!(
        hero = snapshot.active_hero.id,
        health = snapshot.active_hero.health,
        strategy = %config.strategy,
        rule = ?decision.rule,
        direction = %decision.direction,
        "turn decided"
    );
    decision
}

/// Decides the turn.
pub fn decide(snapshot: &GameSnapshot, config: &PolicyConfig) -> Direction {
    explain(snapshot, config).direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::layout::parse_layout;

    fn healer() -> PolicyConfig {
        PolicyConfig::default()
    }

    fn with_strategy(strategy: Strategy) -> PolicyConfig {
        PolicyConfig {
            strategy,
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn strategy_names_parse() {
        for st in Strategy::ALL {
            assert_eq!(st.name().parse::<Strategy>().unwrap(), st);
        }
        assert!(matches!(
            "berserker".parse::<Strategy>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn first_applicable_rule_wins() {
        // Full health: bloodlust fires before the adjacent mine is considered.
        let s = parse_layout(
            ".  $       .
             .  @0:100  .
             .  .       h1:100",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::Bloodlust));
        assert_eq!(d.direction, Direction::East);
    }

    #[test]
    fn adjacent_mine_taken_when_no_enemy() {
        let s = parse_layout(
            ".  $       .
             .  @0:100  .
             .  .       .",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::CaptureAdjacentMine));
        assert_eq!(d.direction, Direction::North);
    }

    #[test]
    fn hurt_hero_next_to_well_drinks() {
        let s = parse_layout(
            ".  +      .
             .  @0:90  .
             .  .      h1:100",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::DrinkFromWell));
        assert_eq!(d.direction, Direction::North);
    }

    #[test]
    fn hurt_teammate_rescued_first() {
        let s = parse_layout(
            "h0:30 @0:70 .
             .     .     .
             .     .     h1:100",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::RescueTeammate));
        assert_eq!(d.direction, Direction::West);
    }

    #[test]
    fn attack_adjacent_stronger_enemy_when_pair_is_adjacent() {
        // Two adjacent enemies, so bloodlust is off; hero is healthy enough
        // to skip retreating and the teammate is close.
        let s = parse_layout(
            ".     h1:100 .
             h1:90 @0:90  .
             .     h0:100 .",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::Attack));
        assert_eq!(d.direction, Direction::North);
    }

    #[test]
    fn mine_within_range() {
        let s = parse_layout(
            "@0:90 . . $
             h0:100 . . .
             . . . .
             . . . .",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, Some(Rule::Mine));
        assert_eq!(d.direction, Direction::East);
    }

    #[test]
    fn nothing_reachable_stays() {
        let s = parse_layout(
            "@0:90 #
             #     .",
        )
        .unwrap();
        let d = explain(&s, &healer());
        assert_eq!(d.rule, None);
        assert_eq!(d.direction, Direction::Stay);
        assert_eq!(decide(&s, &healer()), Direction::Stay);
    }

    #[test]
    fn coward_walks_to_well() {
        let s = parse_layout(
            "@0:100 . .
             .      . .
             h1:10  . +",
        )
        .unwrap();
        assert_eq!(decide(&s, &with_strategy(Strategy::Coward)), Direction::East);
        assert_eq!(decide(&s, &healer()), Direction::South);
    }

    #[test]
    fn selfish_miner_takes_teammate_mines() {
        let s = parse_layout(
            "@0:80 $1 .
             .     .  .
             .     .  h0:100",
        )
        .unwrap();
        let d = explain(&s, &with_strategy(Strategy::SelfishMiner));
        assert_eq!(d.rule, Some(Rule::SeizeMine));
        assert_eq!(d.direction, Direction::East);
    }

    #[test]
    fn selfish_miner_heals_when_low() {
        let s = parse_layout(
            "@0:30 $ .
             .     . .
             +     . .",
        )
        .unwrap();
        let d = explain(&s, &with_strategy(Strategy::SelfishMiner));
        assert_eq!(d.rule, Some(Rule::SelfishRetreat));
        assert_eq!(d.direction, Direction::South);
    }
}
