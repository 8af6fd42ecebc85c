//! Animation intents queued on animatable entities

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What an animation task asks the entity to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Walk to the payload position
    March,
    /// Turn to face the payload direction
    Rotate,
    /// Swing towards the payload direction; reports a contact frame
    Attack,
    /// Raise guard towards the payload direction; reports block-ready
    Block,
    Idle,
    Cheer,
    Die,
    /// Group barrier: releases every member parked on `WaitForCue`
    Cue,
    /// Park until cued
    WaitForCue,
    /// Hold for `payload.x` seconds
    Delay,
    /// End-of-sequence marker
    Done,
}

impl AnimationKind {
    /// Played by the presentation layer and finished only by its completion report
    pub fn needs_completion_signal(&self) -> bool {
        matches!(
            self,
            AnimationKind::March
                | AnimationKind::Rotate
                | AnimationKind::Attack
                | AnimationKind::Block
                | AnimationKind::Cheer
                | AnimationKind::Die
        )
    }

    /// Finishes the moment it starts
    pub fn is_instant(&self) -> bool {
        matches!(self, AnimationKind::Idle | AnimationKind::Done)
    }
}

/// An animation intent. Immutable once enqueued.
///
/// The payload is a destination (March), a direction (Rotate, Attack,
/// Block) or a duration in `x` (Delay), depending on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTask {
    pub kind: AnimationKind,
    pub payload: Vec3,
}

impl AnimationTask {
    pub fn new(kind: AnimationKind, payload: Vec3) -> Self {
        Self { kind, payload }
    }

    pub fn march(destination: Vec3) -> Self {
        Self::new(AnimationKind::March, destination)
    }

    pub fn rotate(direction: Vec3) -> Self {
        Self::new(AnimationKind::Rotate, direction)
    }

    pub fn attack(direction: Vec3) -> Self {
        Self::new(AnimationKind::Attack, direction)
    }

    pub fn block(direction: Vec3) -> Self {
        Self::new(AnimationKind::Block, direction)
    }

    pub fn idle() -> Self {
        Self::new(AnimationKind::Idle, Vec3::ZERO)
    }

    pub fn cheer() -> Self {
        Self::new(AnimationKind::Cheer, Vec3::ZERO)
    }

    pub fn die() -> Self {
        Self::new(AnimationKind::Die, Vec3::ZERO)
    }

    pub fn cue() -> Self {
        Self::new(AnimationKind::Cue, Vec3::ZERO)
    }

    pub fn wait_for_cue() -> Self {
        Self::new(AnimationKind::WaitForCue, Vec3::ZERO)
    }

    pub fn delay(seconds: f32) -> Self {
        Self::new(AnimationKind::Delay, Vec3::new(seconds, 0.0, 0.0))
    }

    pub fn done() -> Self {
        Self::new(AnimationKind::Done, Vec3::ZERO)
    }

    /// Delay length in seconds (only meaningful for `Delay`)
    pub fn duration(&self) -> f32 {
        self.payload.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_kinds() {
        assert!(AnimationKind::March.needs_completion_signal());
        assert!(AnimationKind::Die.needs_completion_signal());
        assert!(!AnimationKind::Delay.needs_completion_signal());
        assert!(!AnimationKind::WaitForCue.needs_completion_signal());
        assert!(!AnimationKind::Cue.needs_completion_signal());
    }

    #[test]
    fn test_delay_payload() {
        let task = AnimationTask::delay(1.5);
        assert_eq!(task.kind, AnimationKind::Delay);
        assert_eq!(task.duration(), 1.5);
    }
}
