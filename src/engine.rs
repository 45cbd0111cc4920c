//! Engine state management.
//!
//! Holds the active policy configuration, applies options, and answers the
//! `turn` command with a move. The configuration is the only state kept
//! between turns; every decision starts from a fresh snapshot.

use std::io::{self, Write};

use crate::board::Direction;
use crate::config::{ConfigError, PolicyConfig};
use crate::policy::{explain, Strategy};
use crate::protocol::json::parse_snapshot;
use crate::protocol::layout::format_layout;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    /// Configuration in effect for the next turn.
    pub config: PolicyConfig,
    /// Configuration restored by `newgame`.
    base: PolicyConfig,
}

impl Engine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Engine::with_config(PolicyConfig::default())
    }

    /// Creates an engine that starts from, and resets to, `config`.
    pub fn with_config(config: PolicyConfig) -> Self {
        Engine {
            base: config.clone(),
            config,
        }
    }

    /// Resets options changed during the previous game.
    pub fn new_game(&mut self) {
        self.config = self.base.clone();
        tracing::info!(strategy = %self.config.strategy, "new game");
    }

    /// Applies `setoption`. `ConfigFile` replaces the whole configuration,
    /// including the base restored by `newgame`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;
        match name {
            "Strategy" => {
                self.config.strategy = value.parse::<Strategy>()?;
            }
            "ConfigFile" => {
                let config = PolicyConfig::load(value)?;
                self.base = config.clone();
                self.config = config;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Handles the handshake: writes id, options, and `hapok`.
    pub fn handle_hap<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name warden")?;
        writeln!(out, "id author warden")?;
        let strategies: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
        writeln!(
            out,
            "option name Strategy type combo default {} var {}",
            self.config.strategy,
            strategies.join(" var ")
        )?;
        writeln!(out, "option name ConfigFile type string default <empty>")?;
        writeln!(out, "hapok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Decides a move for one JSON snapshot. A snapshot that fails to decode
    /// is answered with `Stay`.
    pub fn decide_json(&self, json: &str) -> Direction {
        let snapshot = match parse_snapshot(json) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "rejected snapshot, staying put");
                return Direction::Stay;
            }
        };
        tracing::trace!("board:\n{}", format_layout(&snapshot));
        explain(&snapshot, &self.config).direction
    }

    /// Handles the `turn` command: writes `move <direction>`.
    pub fn handle_turn<W: Write>(&self, json: &str, out: &mut W) -> io::Result<()> {
        let direction = self.decide_json(json);
        writeln!(out, "move {}", direction)?;
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Active hero at (0,0) with an enemy directly east on a 2x2 board.
    const DUEL_JSON: &str = r#"{"activeHero":{"id":0,"team":0,"health":100,"distanceFromTop":0,"distanceFromLeft":0},"board":{"lengthOfSide":2,"tiles":[[{"type":"Hero","id":0,"team":0,"health":100,"distanceFromTop":0,"distanceFromLeft":0},{"type":"Hero","id":1,"team":1,"health":50,"distanceFromTop":0,"distanceFromLeft":1}],[{"type":"HealthWell","distanceFromTop":1,"distanceFromLeft":0},{"type":"Unoccupied","distanceFromTop":1,"distanceFromLeft":1}]]}}"#;

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_uses_defaults() {
        let engine = Engine::new();
        assert_eq!(engine.config, PolicyConfig::default());
    }

    #[test]
    fn set_strategy_option() {
        let mut engine = Engine::new();
        engine.set_option("Strategy", Some("coward")).unwrap();
        assert_eq!(engine.config.strategy, Strategy::Coward);
        assert!(matches!(
            engine.set_option("Strategy", Some("berserker")),
            Err(ConfigError::UnknownStrategy(_))
        ));
        assert!(matches!(
            engine.set_option("Strategy", None),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            engine.set_option("Threads", Some("4")),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn new_game_restores_base_config() {
        let mut engine = Engine::new();
        engine.set_option("Strategy", Some("selfish-miner")).unwrap();
        engine.new_game();
        assert_eq!(engine.config.strategy, Strategy::HealerMiner);
    }

    #[test]
    fn missing_config_file_keeps_config() {
        let mut engine = Engine::new();
        engine.set_option("Strategy", Some("coward")).unwrap();
        assert!(engine
            .set_option("ConfigFile", Some("/nonexistent/warden.json"))
            .is_err());
        assert_eq!(engine.config.strategy, Strategy::Coward);
    }

    #[test]
    fn handle_turn_outputs_move() {
        let engine = Engine::new();
        let out = output_of(|o| engine.handle_turn(DUEL_JSON, o));
        assert_eq!(out.trim(), "move East");
    }

    #[test]
    fn strategy_changes_the_move() {
        let mut engine = Engine::new();
        engine.set_option("Strategy", Some("coward")).unwrap();
        assert_eq!(engine.decide_json(DUEL_JSON), Direction::South);
    }

    #[test]
    fn bad_snapshot_stays() {
        let engine = Engine::new();
        assert_eq!(engine.decide_json("not json"), Direction::Stay);
        let out = output_of(|o| engine.handle_turn("{}", o));
        assert_eq!(out.trim(), "move Stay");
    }

    #[test]
    fn handle_hap_outputs_handshake() {
        let engine = Engine::new();
        let out = output_of(|o| engine.handle_hap(o));
        assert!(out.contains("id name warden"));
        assert!(out.contains(
            "option name Strategy type combo default healer-miner var healer-miner var selfish-miner var coward"
        ));
        assert_eq!(out.lines().last(), Some("hapok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let out = output_of(|o| engine.handle_isready(o));
        assert_eq!(out.trim(), "readyok");
    }
}
