//! Animatable entities: squad members and spectator crowds

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::anim::queue::AnimationQueue;
use crate::anim::task::{AnimationKind, AnimationTask};
use crate::core::types::{EntityId, PlayerId};
use crate::presentation::{PresentationRequest, SoundId};

/// Anything that owns an animation queue and is advanced by the scheduler
pub trait Animatable {
    fn entity_id(&self) -> EntityId;

    /// Queue a task; dead entities drop it
    fn enqueue(&mut self, task: AnimationTask) -> bool;

    /// One scheduling tick. Started presentation tasks are pushed to `out`.
    fn advance_if_idle(&mut self, dt: f32, out: &mut Vec<PresentationRequest>);

    fn is_animating(&self) -> bool;

    /// Presentation finished the in-flight task
    fn complete_current(&mut self) -> Option<AnimationTask>;
}

/// What a unit is visibly doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Marching,
    Rotating,
    Attacking,
    Blocking,
    Cheering,
    Waiting,
    Dying,
    Dead,
}

impl AnimationState {
    fn for_task(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::March => AnimationState::Marching,
            AnimationKind::Rotate => AnimationState::Rotating,
            AnimationKind::Attack => AnimationState::Attacking,
            AnimationKind::Block => AnimationState::Blocking,
            AnimationKind::Cheer => AnimationState::Cheering,
            AnimationKind::Die => AnimationState::Dying,
            AnimationKind::WaitForCue | AnimationKind::Delay | AnimationKind::Cue => {
                AnimationState::Waiting
            }
            AnimationKind::Idle | AnimationKind::Done => AnimationState::Idle,
        }
    }
}

/// One figure in a squad
#[derive(Debug, Clone)]
pub struct Unit {
    id: EntityId,
    captain: bool,
    alive: bool,
    hit_points: u32,
    state: AnimationState,
    queue: AnimationQueue,
    position: Vec3,
    facing: Vec3,
}

impl Unit {
    pub fn new(id: EntityId, hit_points: u32, position: Vec3, facing: Vec3) -> Self {
        Self {
            id,
            captain: false,
            alive: true,
            hit_points,
            state: AnimationState::Idle,
            queue: AnimationQueue::new(),
            position,
            facing,
        }
    }

    pub fn as_captain(mut self) -> Self {
        self.captain = true;
        self
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.queue = self.queue.with_timeout(seconds);
        self
    }

    pub fn is_captain(&self) -> bool {
        self.captain
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Where the last started March was heading
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn queue(&self) -> &AnimationQueue {
        &self.queue
    }

    pub fn is_waiting_for_cue(&self) -> bool {
        self.queue.is_waiting_for_cue()
    }

    pub fn cue(&mut self) -> bool {
        self.queue.cue()
    }

    /// Take up to `amount` hit points. Returns how many were absorbed.
    ///
    /// A unit brought to zero dies: its queue is cleared and only `Die` plays.
    pub fn wound(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let absorbed = amount.min(self.hit_points);
        self.hit_points -= absorbed;
        if self.hit_points == 0 {
            self.kill();
        }
        absorbed
    }

    /// Die immediately, dropping anything still queued
    pub fn kill(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.hit_points = 0;
        self.queue.kill_with(AnimationTask::die());
    }

    /// Die after the tasks already queued have played
    pub fn kill_after_queued(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.hit_points = 0;
        self.queue.enqueue(AnimationTask::die());
        self.queue.seal();
    }

    fn settle_state(&mut self) {
        if self.queue.in_flight() {
            return;
        }
        self.state = if self.alive {
            AnimationState::Idle
        } else if self.queue.is_animating() {
            AnimationState::Dying
        } else {
            AnimationState::Dead
        };
    }
}

impl Animatable for Unit {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn enqueue(&mut self, task: AnimationTask) -> bool {
        self.queue.enqueue(task)
    }

    fn advance_if_idle(&mut self, dt: f32, out: &mut Vec<PresentationRequest>) {
        let Some(task) = self.queue.advance_if_idle(dt) else {
            self.settle_state();
            return;
        };

        tracing::debug!("unit {:?} starts {:?}", self.id, task.kind);
        self.state = AnimationState::for_task(task.kind);

        match task.kind {
            AnimationKind::March => self.position = task.payload,
            AnimationKind::Rotate | AnimationKind::Attack | AnimationKind::Block => {
                self.facing = task.payload.normalize_or_zero();
            }
            _ => {}
        }

        if task.kind.needs_completion_signal() {
            out.push(PresentationRequest::animation(self.id, task));
        }

        // Squad-level cues come from the captain only
        if self.captain {
            match task.kind {
                AnimationKind::March => out.push(PresentationRequest::SoundCue(SoundId::March)),
                AnimationKind::Attack => {
                    out.push(PresentationRequest::SoundCue(SoundId::AttackSwing))
                }
                _ => {}
            }
        }

        if task.kind.is_instant() {
            self.settle_state();
        }
    }

    fn is_animating(&self) -> bool {
        self.queue.is_animating()
    }

    fn complete_current(&mut self) -> Option<AnimationTask> {
        let finished = self.queue.complete_current();
        self.settle_state();
        finished
    }
}

/// Crowd at one side of the board that reacts to the fight
#[derive(Debug, Clone)]
pub struct SpectatorGroup {
    id: EntityId,
    side: PlayerId,
    queue: AnimationQueue,
    cheers: u32,
}

impl SpectatorGroup {
    pub fn new(id: EntityId, side: PlayerId) -> Self {
        Self {
            id,
            side,
            queue: AnimationQueue::new(),
            cheers: 0,
        }
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.queue = self.queue.with_timeout(seconds);
        self
    }

    pub fn side(&self) -> PlayerId {
        self.side
    }

    /// Cheers started so far
    pub fn cheers(&self) -> u32 {
        self.cheers
    }

    pub fn cheer(&mut self) {
        self.queue.enqueue(AnimationTask::cheer());
    }
}

impl Animatable for SpectatorGroup {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn enqueue(&mut self, task: AnimationTask) -> bool {
        self.queue.enqueue(task)
    }

    fn advance_if_idle(&mut self, dt: f32, out: &mut Vec<PresentationRequest>) {
        let Some(task) = self.queue.advance_if_idle(dt) else {
            return;
        };
        if task.kind == AnimationKind::Cheer {
            self.cheers += 1;
            out.push(PresentationRequest::SoundCue(SoundId::Cheer));
        }
        if task.kind.needs_completion_signal() {
            out.push(PresentationRequest::animation(self.id, task));
        }
    }

    fn is_animating(&self) -> bool {
        self.queue.is_animating()
    }

    fn complete_current(&mut self) -> Option<AnimationTask> {
        self.queue.complete_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Unit {
        Unit::new(EntityId(7), 2, Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn test_march_emits_request_and_waits() {
        let mut u = unit().as_captain();
        let mut out = Vec::new();
        u.enqueue(AnimationTask::march(Vec3::new(1.0, 0.0, 3.0)));
        u.enqueue(AnimationTask::idle());

        u.advance_if_idle(0.1, &mut out);
        assert_eq!(u.state(), AnimationState::Marching);
        assert_eq!(u.position(), Vec3::new(1.0, 0.0, 3.0));
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1], PresentationRequest::SoundCue(SoundId::March)));

        out.clear();
        u.advance_if_idle(0.1, &mut out);
        assert!(out.is_empty());
        assert!(u.is_animating());

        u.complete_current();
        u.advance_if_idle(0.1, &mut out);
        assert_eq!(u.state(), AnimationState::Idle);
        assert!(!u.is_animating());
    }

    #[test]
    fn test_only_captain_plays_sounds() {
        let mut u = unit();
        let mut out = Vec::new();
        u.enqueue(AnimationTask::attack(Vec3::X));
        u.advance_if_idle(0.1, &mut out);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], PresentationRequest::Animation { .. }));
    }

    #[test]
    fn test_lethal_wound_clears_queue() {
        let mut u = unit();
        let mut out = Vec::new();
        u.enqueue(AnimationTask::march(Vec3::X));
        u.enqueue(AnimationTask::block(Vec3::X));

        assert_eq!(u.wound(1), 1);
        assert!(u.is_alive());
        assert_eq!(u.wound(5), 1);
        assert!(!u.is_alive());
        assert!(!u.enqueue(AnimationTask::cheer()));

        u.advance_if_idle(0.1, &mut out);
        assert_eq!(u.state(), AnimationState::Dying);
        u.complete_current();
        assert_eq!(u.state(), AnimationState::Dead);
    }

    #[test]
    fn test_kill_after_queued_keeps_pending_tasks() {
        let mut u = unit();
        let mut out = Vec::new();
        u.enqueue(AnimationTask::march(Vec3::X));
        u.kill_after_queued();

        u.advance_if_idle(0.1, &mut out);
        assert_eq!(u.state(), AnimationState::Marching);
        u.complete_current();
        u.advance_if_idle(0.1, &mut out);
        assert_eq!(u.state(), AnimationState::Dying);
    }

    #[test]
    fn test_spectators_count_cheers() {
        let mut crowd = SpectatorGroup::new(EntityId(99), PlayerId::ONE);
        let mut out = Vec::new();
        crowd.cheer();
        crowd.cheer();
        crowd.advance_if_idle(0.1, &mut out);
        crowd.advance_if_idle(0.1, &mut out);
        assert_eq!(crowd.cheers(), 1);
        crowd.complete_current();
        crowd.advance_if_idle(0.1, &mut out);
        assert_eq!(crowd.cheers(), 2);
    }
}
