//! Player input as the UI reports it

use serde::{Deserialize, Serialize};

use crate::board::{Orientation, TilePos};
use crate::core::types::SquadId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    TileClicked(TilePos),
    SquadClicked(SquadId),
    /// One of the arrows around a squad; turns it to face that way
    RotationArrowClicked(SquadId, Orientation),
    DiceRollRequested,
    EndPlacementRequested,
    /// Pass the rest of the turn
    EndTurnRequested,
}
