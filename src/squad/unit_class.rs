//! Unit classes and their static properties

use serde::{Deserialize, Serialize};

use crate::dice::DiceFace;

/// Class of a squad; every member shares it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    King,
    Knight,
    Infantry,
    Archer,
    Mercenary,
    HeavyInfantry,
    Peasant,
}

/// Which die face counts as a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    Axe,
    Arrow,
    /// Axes and arrows both hit
    Any,
}

impl DamageType {
    pub fn matches(&self, face: DiceFace) -> bool {
        match (self, face) {
            (_, DiceFace::Panic) => false,
            (DamageType::Any, _) => true,
            (DamageType::Axe, DiceFace::Axe) => true,
            (DamageType::Arrow, DiceFace::Arrow) => true,
            _ => false,
        }
    }
}

/// How a squad reacts to panic faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanicBehavior {
    /// Never panics
    Never,
    /// Panics when the panic faces reach its threshold
    Normal,
    /// Panics on any panic face, defending or attacking
    AlwaysPanic,
    /// Turns a threshold hit back onto the attacker
    CausesPanic,
}

/// Static per-class attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassProperties {
    pub move_cost: u32,
    pub attack_cost: u32,
    pub rotate_cost: u32,
    pub dice_per_unit: u32,
    pub health_per_unit: u32,
    pub damage_type: DamageType,
    pub panic_behavior: PanicBehavior,
    /// Panic faces needed to trigger `Normal` and `CausesPanic`
    pub panic_threshold: u32,
    pub can_receive_panic: bool,
    pub squad_size: usize,
}

impl UnitClass {
    pub fn properties(&self) -> ClassProperties {
        match self {
            UnitClass::King => ClassProperties {
                move_cost: 1,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 2,
                health_per_unit: 3,
                damage_type: DamageType::Axe,
                panic_behavior: PanicBehavior::Never,
                panic_threshold: u32::MAX,
                can_receive_panic: false,
                squad_size: 1,
            },

            UnitClass::Knight => ClassProperties {
                move_cost: 2,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 2,
                health_per_unit: 2,
                damage_type: DamageType::Axe,
                panic_behavior: PanicBehavior::Normal,
                panic_threshold: 2,
                can_receive_panic: true,
                squad_size: 2,
            },

            UnitClass::Infantry => ClassProperties {
                move_cost: 1,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 1,
                health_per_unit: 1,
                damage_type: DamageType::Axe,
                panic_behavior: PanicBehavior::Normal,
                panic_threshold: 1,
                can_receive_panic: true,
                squad_size: 3,
            },

            UnitClass::Archer => ClassProperties {
                move_cost: 1,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 1,
                health_per_unit: 1,
                damage_type: DamageType::Arrow,
                panic_behavior: PanicBehavior::Normal,
                panic_threshold: 1,
                can_receive_panic: true,
                squad_size: 3,
            },

            // Sellswords hold their ground and send the enemy running instead
            UnitClass::Mercenary => ClassProperties {
                move_cost: 1,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 1,
                health_per_unit: 1,
                damage_type: DamageType::Axe,
                panic_behavior: PanicBehavior::CausesPanic,
                panic_threshold: 1,
                can_receive_panic: false,
                squad_size: 3,
            },

            UnitClass::HeavyInfantry => ClassProperties {
                move_cost: 2,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 1,
                health_per_unit: 2,
                damage_type: DamageType::Axe,
                panic_behavior: PanicBehavior::Normal,
                panic_threshold: 2,
                can_receive_panic: true,
                squad_size: 3,
            },

            UnitClass::Peasant => ClassProperties {
                move_cost: 1,
                attack_cost: 1,
                rotate_cost: 1,
                dice_per_unit: 1,
                health_per_unit: 1,
                damage_type: DamageType::Any,
                panic_behavior: PanicBehavior::AlwaysPanic,
                panic_threshold: 1,
                can_receive_panic: true,
                squad_size: 4,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitClass::King => "King",
            UnitClass::Knight => "Knight",
            UnitClass::Infantry => "Infantry",
            UnitClass::Archer => "Archer",
            UnitClass::Mercenary => "Mercenary",
            UnitClass::HeavyInfantry => "Heavy Infantry",
            UnitClass::Peasant => "Peasant",
        }
    }

    /// Scans forward through empty tiles when moving
    pub fn has_long_move(&self) -> bool {
        matches!(self, UnitClass::King | UnitClass::Knight)
    }
}
