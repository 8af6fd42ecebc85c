//! Requests the rules engine sends to the presentation layer

use serde::{Deserialize, Serialize};

use crate::anim::AnimationTask;
use crate::board::{HighlightKind, TilePos};
use crate::core::types::{EntityId, PlayerId};

/// Where the camera should frame the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraPhase {
    Overview,
    Placement(PlayerId),
    TurnStart(PlayerId),
    Combat { attacker: TilePos, defender: TilePos },
    GameOver,
}

/// One-shot sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    March,
    AttackSwing,
    Hit,
    Death,
    Cheer,
    DiceRoll,
    Panic,
    Error,
    TurnStart,
    Victory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationRequest {
    /// Play a task on an entity; answered by `report_animation_complete`
    Animation { entity: EntityId, task: AnimationTask },
    /// Answered by `report_camera_transition_complete`
    CameraMove(CameraPhase),
    SoundCue(SoundId),
    Highlight { tile: TilePos, kind: HighlightKind },
    /// Transient text for the player
    Message(String),
}

impl PresentationRequest {
    pub fn animation(entity: EntityId, task: AnimationTask) -> Self {
        PresentationRequest::Animation { entity, task }
    }

    pub fn highlight(tile: TilePos, kind: HighlightKind) -> Self {
        PresentationRequest::Highlight { tile, kind }
    }

    pub fn message(text: impl Into<String>) -> Self {
        PresentationRequest::Message(text.into())
    }
}
