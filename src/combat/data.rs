//! Per-attack bookkeeping

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::SquadId;
use crate::squad::{DamageType, SquadEntity};

/// Which side, if any, breaks and runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PanicResult {
    #[default]
    None,
    AttackerPanics,
    DefenderPanics,
}

/// Lives from attack initiation until the attack (and any bonus roll) resolves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatData {
    pub attacker: SquadId,
    pub defender: SquadId,
    /// Dice thrown per roll
    pub dice_available: u32,
    pub attack_type: DamageType,
    /// Damage of the pass that actually lands
    pub damage_dealt: u32,
    /// Set at initiation; consumed the first time it is used
    pub bonus_eligible: bool,
    pub bonus_earned: bool,
    pub panic: PanicResult,
    pub panic_faces: u32,
    /// Unit vector from the defender towards the attacker
    pub to_attacker: Vec3,
}

impl CombatData {
    /// Snapshot both squads at the moment the attack is declared
    ///
    /// The attacker earns a bonus roll only while it fields fewer units than
    /// the squad it attacks.
    pub fn new(attacker: &SquadEntity, defender: &SquadEntity, tile_size: f32) -> Self {
        let to_attacker = match (attacker.tile(), defender.tile()) {
            (Some(a), Some(d)) => {
                (a.world_center(tile_size) - d.world_center(tile_size)).normalize_or_zero()
            }
            _ => Vec3::ZERO,
        };

        Self {
            attacker: attacker.id(),
            defender: defender.id(),
            dice_available: attacker.dice_available(),
            attack_type: attacker.properties().damage_type,
            damage_dealt: 0,
            bonus_eligible: attacker.units_remaining() < defender.units_remaining(),
            bonus_earned: false,
            panic: PanicResult::None,
            panic_faces: 0,
            to_attacker,
        }
    }

    /// Direction the attacker swings in
    pub fn to_defender(&self) -> Vec3 {
        -self.to_attacker
    }
}
