//! Match phases

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// The given player is deploying their roster
    ArmyPlacement(PlayerId),
    /// Both players throw a die to decide who moves first
    TurnOrderRoll,
    /// The active player may act
    Active,
    /// An attack is being resolved; input is locked
    Attacking,
    GameOver { winner: PlayerId },
}

impl GamePhase {
    pub fn is_placement(&self) -> bool {
        matches!(self, GamePhase::ArmyPlacement(_))
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::ArmyPlacement(PlayerId::ONE)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::ArmyPlacement(player) => {
                write!(f, "army placement (player {})", player.0 + 1)
            }
            GamePhase::TurnOrderRoll => write!(f, "turn order roll"),
            GamePhase::Active => write!(f, "active"),
            GamePhase::Attacking => write!(f, "attacking"),
            GamePhase::GameOver { winner } => write!(f, "game over (player {} wins)", winner.0 + 1),
        }
    }
}
