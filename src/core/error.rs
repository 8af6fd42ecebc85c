use thiserror::Error;

use crate::board::TilePos;
use crate::core::types::{PlayerId, SquadId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    #[error("Squad not found: {0:?}")]
    SquadNotFound(SquadId),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl GameError {
    /// The player-facing rejection, if this error is one
    pub fn as_illegal(&self) -> Option<&IllegalAction> {
        match self {
            GameError::Illegal(illegal) => Some(illegal),
            _ => None,
        }
    }
}

/// Rejected player intents. Recovered locally and shown to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("not enough action points ({remaining} left, {required} needed)")]
    NotEnoughAp { required: u32, remaining: u32 },

    #[error("tile {0} is not a valid target")]
    NotHighlighted(TilePos),

    #[error("tile {0} is already occupied")]
    TileOccupied(TilePos),

    #[error("tile {0} is outside the deployment zone")]
    OutsideDeploymentZone(TilePos),

    #[error("tile {0} is off the board")]
    OffBoard(TilePos),

    #[error("every squad must be placed first ({remaining} left)")]
    RosterIncomplete { remaining: usize },

    #[error("no squads left to place")]
    RosterExhausted,

    #[error("squad {0:?} belongs to player {1:?}")]
    NotYourSquad(SquadId, PlayerId),

    #[error("select one of your squads first")]
    NoSquadSelected,

    #[error("squad already faces that way")]
    AlreadyFacing,

    #[error("that cannot be done right now")]
    WrongPhase,

    #[error("wait for the current action to finish")]
    Busy,

    #[error("the dice are already rolling")]
    DiceBusy,
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_action_message() {
        let err = GameError::from(IllegalAction::NotEnoughAp {
            required: 2,
            remaining: 1,
        });
        assert_eq!(
            err.to_string(),
            "Illegal action: not enough action points (1 left, 2 needed)"
        );
        assert!(err.as_illegal().is_some());
    }

    #[test]
    fn test_tile_messages_use_row_and_col() {
        let illegal = IllegalAction::TileOccupied(TilePos::new(3, 4));
        assert_eq!(illegal.to_string(), "tile (3, 4) is already occupied");
    }

    #[test]
    fn test_invariant_is_not_illegal() {
        let err = GameError::Invariant("two squads on one tile".into());
        assert!(err.as_illegal().is_none());
    }
}
