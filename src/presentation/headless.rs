//! Presentation layer without a screen
//!
//! Acknowledges every request on the spot, the way a renderer would once
//! each animation finished playing. Used by the CLI, the script runner and
//! the tests to drive whole matches.

use ahash::AHashMap;

use crate::anim::AnimationKind;
use crate::core::error::{GameError, Result};
use crate::game::TurnController;
use crate::presentation::request::{CameraPhase, PresentationRequest, SoundId};

#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    sounds: AHashMap<SoundId, u32>,
    messages: Vec<String>,
    cameras: Vec<CameraPhase>,
    animations_played: u64,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `sound` has been cued
    pub fn sound_count(&self, sound: SoundId) -> u32 {
        self.sounds.get(&sound).copied().unwrap_or(0)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    pub fn cameras(&self) -> &[CameraPhase] {
        &self.cameras
    }

    pub fn animations_played(&self) -> u64 {
        self.animations_played
    }

    /// Drain the controller's requests and answer each one
    pub fn pump(&mut self, controller: &mut TurnController) {
        for request in controller.drain_requests() {
            match request {
                PresentationRequest::Animation { entity, task } => {
                    self.animations_played += 1;
                    match task.kind {
                        AnimationKind::Attack => controller.report_attack_contact_frame(entity),
                        AnimationKind::Block => controller.report_block_ready(entity),
                        _ => {}
                    }
                    controller.report_animation_complete(entity);
                }
                PresentationRequest::CameraMove(phase) => {
                    self.cameras.push(phase);
                    controller.report_camera_transition_complete();
                }
                PresentationRequest::SoundCue(sound) => {
                    *self.sounds.entry(sound).or_insert(0) += 1;
                }
                PresentationRequest::Message(text) => {
                    tracing::info!("{}", text);
                    self.messages.push(text);
                }
                PresentationRequest::Highlight { .. } => {}
            }
        }
    }

    /// Tick and pump until nothing is pending; returns the ticks taken
    pub fn run_until_settled(
        &mut self,
        controller: &mut TurnController,
        dt: f32,
        max_ticks: u64,
    ) -> Result<u64> {
        self.pump(controller);
        for ticks in 0..max_ticks {
            if controller.is_settled() {
                return Ok(ticks);
            }
            controller.tick(dt)?;
            self.pump(controller);
        }
        if controller.is_settled() {
            return Ok(max_ticks);
        }
        Err(GameError::Invariant(format!(
            "match still busy after {} ticks in phase {}",
            max_ticks,
            controller.phase()
        )))
    }
}
