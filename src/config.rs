//! Game configuration.
//!
//! A game can be configured entirely from the command line, or from a JSON
//! file that pre-registers territories and the mission pool. Every field is
//! optional; command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::board::{Board, Territory, TerritoryError, MAX_TERRITORIES, MIN_TERRITORIES};
use crate::combat::CombatRule;
use crate::mission::{Mission, MissionPool, DEFAULT_PLAYER_COLOR};

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse game config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Territory(#[from] TerritoryError),

    #[error("territory count must be at least {min}, got {0}", min = MIN_TERRITORIES)]
    TooFewTerritories(usize),

    #[error("territory count must be at most {max}, got {0}", max = MAX_TERRITORIES)]
    TooManyTerritories(usize),
}

/// How the control loop is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Menu-driven play with a secret mission; ends on victory or exit.
    #[default]
    Campaign,
    /// Back-to-back attacks with no mission; ends when the player stops.
    Skirmish,
}

/// Full configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rule: CombatRule,
    pub mode: PlayMode,
    pub player_color: String,
    /// RNG seed for dice and the mission draw. 0 means entropy.
    pub seed: u64,
    /// Number of territories to register interactively.
    pub territory_count: Option<usize>,
    /// Pre-registered territories. When present, interactive setup is skipped.
    pub territories: Vec<Territory>,
    /// Candidate missions. Empty means the classic pool.
    pub missions: Vec<Mission>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rule: CombatRule::default(),
            mode: PlayMode::default(),
            player_color: DEFAULT_PLAYER_COLOR.to_string(),
            seed: 0,
            territory_count: None,
            territories: Vec::new(),
            missions: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Checks invariants serde cannot express: every pre-registered
    /// territory starts with troops, and board sizes stay within
    /// `MIN_TERRITORIES..=MAX_TERRITORIES`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for t in &self.territories {
            Territory::new(t.name.clone(), t.owner_color.clone(), t.troops)?;
        }
        if !self.territories.is_empty() {
            check_board_size(self.territories.len())?;
        }
        if let Some(n) = self.territory_count {
            check_board_size(n)?;
        }
        Ok(())
    }

    /// Returns the pre-registered board, if the config provides one.
    pub fn initial_board(&self) -> Option<Board> {
        if self.territories.is_empty() {
            None
        } else {
            Some(Board::new(self.territories.clone()))
        }
    }

    /// Returns the configured mission pool, falling back to the classic one.
    pub fn mission_pool(&self) -> MissionPool {
        if self.missions.is_empty() {
            MissionPool::classic(&self.player_color)
        } else {
            MissionPool::new(self.missions.clone())
        }
    }
}

fn check_board_size(n: usize) -> Result<(), ConfigError> {
    if n < MIN_TERRITORIES {
        Err(ConfigError::TooFewTerritories(n))
    } else if n > MAX_TERRITORIES {
        Err(ConfigError::TooManyTerritories(n))
    } else {
        Ok(())
    }
}

/// Loads and validates a game config from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&data)
}

/// Loads and validates a game config from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_json() -> &'static str {
        r#"{
            "rule": "attrition",
            "mode": "skirmish",
            "player_color": "Azul",
            "seed": 17,
            "territories": [
                {"name": "Brasil", "color": "Azul", "troops": 5},
                {"name": "Chile", "color": "Verde", "troops": 2}
            ],
            "missions": [{"kind": "eliminate", "color": "Verde"}]
        }"#
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.rule, CombatRule::Conquest);
        assert_eq!(config.mode, PlayMode::Campaign);
        assert_eq!(config.player_color, DEFAULT_PLAYER_COLOR);
        assert!(config.initial_board().is_none());
        assert_eq!(config.mission_pool(), MissionPool::classic(DEFAULT_PLAYER_COLOR));
    }

    #[test]
    fn full_config_parses() {
        let config = load_config_from_str(test_json()).unwrap();
        assert_eq!(config.rule, CombatRule::Attrition);
        assert_eq!(config.mode, PlayMode::Skirmish);
        assert_eq!(config.seed, 17);
        let board = config.initial_board().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.get(0).unwrap().owner_color, "Azul");
        assert_eq!(config.mission_pool().missions().len(), 1);
    }

    #[test]
    fn zero_troop_territory_rejected() {
        let err = load_config_from_str(
            r#"{"territories": [
                {"name": "A", "color": "Red", "troops": 0},
                {"name": "B", "color": "Blue", "troops": 1}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Territory(TerritoryError::NoInitialTroops(ref n)) if n == "A"
        ));
    }

    #[test]
    fn single_territory_rejected() {
        let err = load_config_from_str(
            r#"{"territories": [{"name": "A", "color": "Red", "troops": 3}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TooFewTerritories(1)));
        assert!(matches!(
            load_config_from_str(r#"{"territory_count": 1}"#),
            Err(ConfigError::TooFewTerritories(1))
        ));
    }

    #[test]
    fn oversized_board_rejected() {
        assert!(matches!(
            load_config_from_str(r#"{"territory_count": 18446744073709551615}"#),
            Err(ConfigError::TooManyTerritories(_))
        ));
        let at_cap = format!(r#"{{"territory_count": {}}}"#, MAX_TERRITORIES);
        assert!(load_config_from_str(&at_cap).is_ok());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            load_config_from_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            load_config_from_str(r#"{"rule": "blitz"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_config(Path::new("/nonexistent/conquista.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/conquista.json"));
    }
}
