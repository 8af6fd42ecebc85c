//! Game configuration with documented constants
//!
//! Everything tunable lives here. The config is owned by the turn controller
//! and handed down to the systems that need it; there is no global copy.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::squad::UnitClass;

/// Relative weights of the faces on a combat die
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Axe faces per die (melee hits)
    pub axe_weight: u32,
    /// Arrow faces per die (ranged hits)
    pub arrow_weight: u32,
    /// Panic faces per die
    pub panic_weight: u32,
    /// Chance that a thrown die lands cocked and has to be thrown again
    ///
    /// Cocked dice never reach the rules; the dice subsystem rethrows them
    /// on the next tick.
    pub cocked_chance: f64,
}

impl Default for DiceConfig {
    fn default() -> Self {
        // Six-sided die: three axes, two arrows, one panic
        Self {
            axe_weight: 3,
            arrow_weight: 2,
            panic_weight: 1,
            cocked_chance: 0.05,
        }
    }
}

/// Configuration for a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === BOARD ===
    /// Tiles per row
    pub board_width: usize,

    /// Tiles per column
    pub board_height: usize,

    /// Edge length of one tile in world units
    ///
    /// Only used to turn tile coordinates into animation destinations.
    pub tile_size: f32,

    /// Rows at each end of the board a player may deploy into
    pub deployment_rows: usize,

    // === TURNS ===
    /// Action points granted at the start of every turn
    pub ap_per_turn: u32,

    /// A player whose squad count drops to this value loses
    ///
    /// At 1, a player reduced to a single squad (normally the king) is beaten.
    pub min_squads_remaining: usize,

    /// Squads each player deploys, in placement order (exactly one King)
    pub army: Vec<UnitClass>,

    // === COMBAT ===
    /// Upper bound on tiles a panicking squad retreats
    pub max_retreat_distance: u32,

    /// Seconds a retreating squad rests after its march before the next step
    pub panic_settle_delay: f32,

    /// Seconds an eliminated squad lingers before it is removed
    pub elimination_linger: f32,

    pub dice: DiceConfig,

    // === SCHEDULER ===
    /// Seconds a presentation task may stay in flight before it is forced to finish
    pub animation_timeout: f32,

    /// Seconds combat waits for the contact/block reports before applying damage anyway
    pub handshake_timeout: f32,

    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 9,
            board_height: 9,
            tile_size: 2.0,
            deployment_rows: 2,

            ap_per_turn: 3,
            min_squads_remaining: 1,
            army: vec![
                UnitClass::King,
                UnitClass::Knight,
                UnitClass::Infantry,
                UnitClass::Infantry,
                UnitClass::Archer,
                UnitClass::HeavyInfantry,
                UnitClass::Mercenary,
                UnitClass::Peasant,
            ],

            max_retreat_distance: 2,
            panic_settle_delay: 0.25,
            elimination_linger: 1.5,
            dice: DiceConfig::default(),

            animation_timeout: 10.0,
            handshake_timeout: 10.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a config from TOML, filling missing fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.board_width < 3 || self.board_height < 3 {
            return Err(GameError::Config(format!(
                "board must be at least 3x3, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        // Both deployment zones must fit with at least one neutral row between them
        if self.deployment_rows == 0 || self.deployment_rows * 2 >= self.board_height {
            return Err(GameError::Config(format!(
                "deployment_rows ({}) must be between 1 and {}",
                self.deployment_rows,
                (self.board_height - 1) / 2
            )));
        }

        let kings = self
            .army
            .iter()
            .filter(|class| matches!(class, UnitClass::King))
            .count();
        if kings != 1 {
            return Err(GameError::Config(format!(
                "army must contain exactly one King, found {}",
                kings
            )));
        }

        if self.army.len() > self.deployment_rows * self.board_width {
            return Err(GameError::Config(format!(
                "army of {} squads does not fit in {} deployment tiles",
                self.army.len(),
                self.deployment_rows * self.board_width
            )));
        }

        if self.ap_per_turn == 0 {
            return Err(GameError::Config("ap_per_turn must be positive".into()));
        }

        if self.max_retreat_distance == 0 {
            return Err(GameError::Config(
                "max_retreat_distance must be positive".into(),
            ));
        }

        let dice = &self.dice;
        if dice.axe_weight + dice.arrow_weight + dice.panic_weight == 0 {
            return Err(GameError::Config("dice face weights are all zero".into()));
        }
        if !(0.0..1.0).contains(&dice.cocked_chance) {
            return Err(GameError::Config(format!(
                "cocked_chance ({}) must be in [0, 1)",
                dice.cocked_chance
            )));
        }

        if self.animation_timeout <= 0.0 || self.handshake_timeout <= 0.0 {
            return Err(GameError::Config("timeouts must be positive".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            ap_per_turn = 4
            seed = 7

            [dice]
            cocked_chance = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.ap_per_turn, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.dice.cocked_chance, 0.0);
        assert_eq!(config.dice.axe_weight, 3);
        assert_eq!(config.board_width, 9);
    }

    #[test]
    fn test_army_from_toml() {
        let config = GameConfig::from_toml_str(r#"army = ["King", "Archer", "Peasant"]"#).unwrap();
        assert_eq!(
            config.army,
            vec![UnitClass::King, UnitClass::Archer, UnitClass::Peasant]
        );
    }

    #[test]
    fn test_army_without_king_rejected() {
        let result = GameConfig::from_toml_str(r#"army = ["Knight", "Archer"]"#);
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_overlapping_deployment_rejected() {
        let mut config = GameConfig::default();
        config.deployment_rows = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cocked_chance_must_be_below_one() {
        let mut config = GameConfig::default();
        config.dice.cocked_chance = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let result = GameConfig::from_toml_str("ap_per_turn = \"many\"");
        assert!(matches!(result, Err(GameError::TomlError(_))));
    }
}
