//! Attack transaction
//!
//! One resolver per declared attack. It is stepped once per scheduler tick
//! and walks `Initiated -> AwaitingDiceRoll -> DamageEvaluation ->
//! (BonusRoll) -> AnimationPlayback -> Resolved`. Damage lands only once the
//! attacker's contact frame and the defender's block posture have both been
//! reported (or the handshake times out).

use serde::{Deserialize, Serialize};

use crate::board::BoardGrid;
use crate::combat::data::{CombatData, PanicResult};
use crate::combat::panic::{resolve_panic, retreat_direction, retreat_distance, PanicProfile};
use crate::combat::retreat::PanicRetreat;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::EntityId;
use crate::dice::{DiceFace, DiceOutcome, DiceSubsystem};
use crate::game::events::{EventLog, GameEventKind};
use crate::presentation::{PresentationRequest, SoundId};
use crate::squad::{SquadEntity, SquadRoster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    Initiated,
    AwaitingDiceRoll,
    DamageEvaluation,
    BonusRoll,
    AnimationPlayback,
    Resolved,
}

/// Everything a resolver touches while it steps
pub struct CombatContext<'a> {
    pub roster: &'a mut SquadRoster,
    pub board: &'a mut BoardGrid,
    pub dice: &'a mut DiceSubsystem,
    pub config: &'a GameConfig,
    pub log: &'a mut EventLog,
    pub out: &'a mut Vec<PresentationRequest>,
}

#[derive(Debug, Clone, Default)]
struct Handshake {
    contact: bool,
    block_ready: bool,
    waited: f32,
}

#[derive(Debug, Clone)]
pub struct CombatResolver {
    state: CombatState,
    data: CombatData,
    attacker_captain: Option<EntityId>,
    defender_captain: Option<EntityId>,
    /// The current roll is the doubled follow-up
    bonus_pass: bool,
    rolls: Vec<DiceOutcome>,
    handshake: Handshake,
    impact_applied: bool,
    retreat: Option<PanicRetreat>,
}

impl CombatResolver {
    pub fn initiate(attacker: &SquadEntity, defender: &SquadEntity, tile_size: f32) -> Self {
        Self {
            state: CombatState::Initiated,
            data: CombatData::new(attacker, defender, tile_size),
            attacker_captain: attacker.captain_id(),
            defender_captain: defender.captain_id(),
            bonus_pass: false,
            rolls: Vec::new(),
            handshake: Handshake::default(),
            impact_applied: false,
            retreat: None,
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn data(&self) -> &CombatData {
        &self.data
    }

    /// Settled rolls in order; two when a bonus roll was earned
    pub fn rolls(&self) -> &[DiceOutcome] {
        &self.rolls
    }

    pub fn is_resolved(&self) -> bool {
        self.state == CombatState::Resolved
    }

    pub fn bonus_pending(&self) -> bool {
        self.state == CombatState::BonusRoll
    }

    /// Attacker captain's swing connected. True if it belonged to this fight.
    pub fn on_contact(&mut self, entity: EntityId) -> bool {
        if self.state == CombatState::AnimationPlayback && self.attacker_captain == Some(entity) {
            self.handshake.contact = true;
            return true;
        }
        false
    }

    /// Defender captain has its guard up
    pub fn on_block_ready(&mut self, entity: EntityId) -> bool {
        if self.state == CombatState::AnimationPlayback && self.defender_captain == Some(entity) {
            self.handshake.block_ready = true;
            return true;
        }
        false
    }

    /// Advance as far as possible this tick
    pub fn step(&mut self, dt: f32, ctx: &mut CombatContext<'_>) -> Result<()> {
        loop {
            match self.state {
                CombatState::Initiated => {
                    if !self.start_roll(ctx)? {
                        return Ok(());
                    }
                    self.state = CombatState::AwaitingDiceRoll;
                    return Ok(());
                }
                CombatState::AwaitingDiceRoll | CombatState::BonusRoll => {
                    let Some(outcome) = ctx.dice.tick() else {
                        return Ok(());
                    };
                    ctx.log.push(
                        GameEventKind::DiceRolled {
                            faces: outcome.faces.clone(),
                        },
                        format!(
                            "Rolled {} axe, {} arrow, {} panic",
                            outcome.count(DiceFace::Axe),
                            outcome.count(DiceFace::Arrow),
                            outcome.count(DiceFace::Panic)
                        ),
                    );
                    self.rolls.push(outcome);
                    self.state = CombatState::DamageEvaluation;
                }
                CombatState::DamageEvaluation => {
                    self.evaluate(ctx)?;
                    if self.state != CombatState::AnimationPlayback {
                        return Ok(());
                    }
                }
                CombatState::AnimationPlayback => return self.playback(dt, ctx),
                CombatState::Resolved => return Ok(()),
            }
        }
    }

    /// Throw the attacker's dice. False if the attack short-circuited instead.
    fn start_roll(&mut self, ctx: &mut CombatContext<'_>) -> Result<bool> {
        let defender_gone = ctx
            .roster
            .get(self.data.defender)
            .map_or(true, SquadEntity::is_eliminated);
        if self.data.dice_available == 0 || defender_gone {
            tracing::info!(
                "attack by {:?} on {:?} has nothing to roll, resolving",
                self.data.attacker,
                self.data.defender
            );
            self.state = CombatState::Resolved;
            return Ok(false);
        }

        ctx.dice.start_roll(self.data.dice_available as usize)?;
        ctx.out.push(PresentationRequest::SoundCue(SoundId::DiceRoll));
        Ok(true)
    }

    fn evaluate(&mut self, ctx: &mut CombatContext<'_>) -> Result<()> {
        let outcome = self
            .rolls
            .last()
            .ok_or_else(|| GameError::Invariant("damage evaluation without a roll".into()))?;
        let raw = outcome
            .faces
            .iter()
            .filter(|face| self.data.attack_type.matches(**face))
            .count() as u32;
        let panic_faces = outcome.count(DiceFace::Panic);

        if !self.bonus_pass && raw == 1 && self.data.bonus_eligible {
            self.data.bonus_eligible = false;
            self.data.bonus_earned = true;
            self.data.damage_dealt = 0;
            self.bonus_pass = true;
            ctx.log.push(
                GameEventKind::BonusRollEarned {
                    attacker: self.data.attacker,
                },
                format!("Squad {:?} earns a bonus roll", self.data.attacker),
            );
            self.state = if self.start_roll(ctx)? {
                CombatState::BonusRoll
            } else {
                CombatState::Resolved
            };
            return Ok(());
        }

        let attacker = ctx.roster.require(self.data.attacker)?;
        let defender = ctx.roster.require(self.data.defender)?;

        let damage = if self.bonus_pass { raw * 2 } else { raw };
        self.data.damage_dealt = damage;
        self.data.panic_faces = panic_faces;
        self.data.panic = if self.bonus_pass {
            PanicResult::None
        } else {
            resolve_panic(
                PanicProfile::of(attacker),
                PanicProfile::of(defender),
                panic_faces,
                defender.would_survive(damage),
            )
        };

        let to_defender = self.data.to_defender();
        let to_attacker = self.data.to_attacker;
        ctx.roster.require_mut(self.data.attacker)?.enqueue_attack(to_defender);
        ctx.roster.require_mut(self.data.defender)?.enqueue_block(to_attacker);

        self.handshake = Handshake::default();
        self.state = CombatState::AnimationPlayback;
        Ok(())
    }

    fn playback(&mut self, dt: f32, ctx: &mut CombatContext<'_>) -> Result<()> {
        if !self.impact_applied {
            if !(self.handshake.contact && self.handshake.block_ready) {
                self.handshake.waited += dt;
                if self.handshake.waited < ctx.config.handshake_timeout {
                    return Ok(());
                }
                tracing::warn!(
                    "combat handshake timed out after {:.1}s (contact: {}, block: {})",
                    self.handshake.waited,
                    self.handshake.contact,
                    self.handshake.block_ready
                );
            }
            self.apply_impact(ctx)?;
            self.impact_applied = true;
            return Ok(());
        }

        if let Some(retreat) = &mut self.retreat {
            retreat.step(dt, ctx.roster, ctx.board, ctx.log)?;
            if !retreat.is_finished() {
                return Ok(());
            }
        }

        tracing::info!(
            "attack by {:?} on {:?} resolved: {} damage, panic {:?}",
            self.data.attacker,
            self.data.defender,
            self.data.damage_dealt,
            self.data.panic
        );
        self.state = CombatState::Resolved;
        Ok(())
    }

    fn apply_impact(&mut self, ctx: &mut CombatContext<'_>) -> Result<()> {
        let damage = self.data.damage_dealt;
        let report = ctx.roster.require_mut(self.data.defender)?.apply_damage(damage);
        ctx.log.push(
            GameEventKind::DamageDealt {
                defender: self.data.defender,
                damage,
            },
            format!(
                "Squad {:?} takes {} damage ({} units lost)",
                self.data.defender,
                damage,
                report.killed.len()
            ),
        );
        if report.absorbed > 0 {
            ctx.out.push(PresentationRequest::SoundCue(SoundId::Hit));
        }
        if !report.killed.is_empty() {
            ctx.out.push(PresentationRequest::SoundCue(SoundId::Death));
        }
        ctx.roster.check_elimination(ctx.board, self.data.defender);

        let (panicking, opponent) = match self.data.panic {
            PanicResult::None => return Ok(()),
            PanicResult::DefenderPanics => (self.data.defender, self.data.attacker),
            PanicResult::AttackerPanics => (self.data.attacker, self.data.defender),
        };

        let attacker_facing = ctx.roster.require(self.data.attacker)?.orientation();
        let fallback = if panicking == self.data.defender {
            attacker_facing
        } else {
            attacker_facing.opposite()
        };
        let (Some(from), Some(threat)) = (
            ctx.roster.require(panicking)?.tile(),
            ctx.roster.require(opponent)?.tile(),
        ) else {
            return Ok(());
        };

        let direction = retreat_direction(from, threat, fallback);
        let distance = retreat_distance(self.data.panic_faces, ctx.config.max_retreat_distance);
        ctx.out.push(PresentationRequest::SoundCue(SoundId::Panic));
        ctx.log.push(
            GameEventKind::Panic {
                squad: panicking,
                distance,
            },
            format!(
                "Squad {:?} panics and flees {} tile(s) {:?}",
                panicking, distance, direction
            ),
        );
        self.retreat = Some(PanicRetreat::new(
            panicking,
            direction,
            distance,
            ctx.config.panic_settle_delay,
        ));
        Ok(())
    }
}
