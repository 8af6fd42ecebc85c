//! Panic rules
//!
//! Panic faces only matter when the defender survives the hit and the pass
//! is not a doubled bonus roll. The defender's behaviour is checked before
//! the attacker's, and a squad that cannot receive panic never runs.

use crate::board::{Orientation, TilePos};
use crate::combat::data::PanicResult;
use crate::squad::{PanicBehavior, SquadEntity};

/// The panic-relevant slice of a squad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanicProfile {
    pub behavior: PanicBehavior,
    pub threshold: u32,
    pub can_receive: bool,
}

impl PanicProfile {
    pub fn of(squad: &SquadEntity) -> Self {
        let properties = squad.properties();
        Self {
            behavior: properties.panic_behavior,
            threshold: properties.panic_threshold,
            can_receive: properties.can_receive_panic,
        }
    }
}

/// Decide who panics after a roll showing `panic_faces`
pub fn resolve_panic(
    attacker: PanicProfile,
    defender: PanicProfile,
    panic_faces: u32,
    defender_survives: bool,
) -> PanicResult {
    if panic_faces == 0 || !defender_survives {
        return PanicResult::None;
    }

    match defender.behavior {
        PanicBehavior::Normal if panic_faces >= defender.threshold && defender.can_receive => {
            return PanicResult::DefenderPanics;
        }
        PanicBehavior::AlwaysPanic if defender.can_receive => {
            return PanicResult::DefenderPanics;
        }
        PanicBehavior::CausesPanic if panic_faces >= defender.threshold && attacker.can_receive => {
            return PanicResult::AttackerPanics;
        }
        _ => {}
    }

    if attacker.behavior == PanicBehavior::AlwaysPanic && attacker.can_receive {
        return PanicResult::AttackerPanics;
    }

    PanicResult::None
}

/// Tiles a panicking squad runs: one per panic face, capped
pub fn retreat_distance(panic_faces: u32, max_distance: u32) -> u32 {
    panic_faces.clamp(1, max_distance.max(1))
}

/// Direction away from `opponent`; `fallback` on an exact diagonal
pub fn retreat_direction(
    panicking: TilePos,
    opponent: TilePos,
    fallback: Orientation,
) -> Orientation {
    Orientation::toward(opponent, panicking).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL_1: PanicProfile = PanicProfile {
        behavior: PanicBehavior::Normal,
        threshold: 1,
        can_receive: true,
    };
    const NORMAL_2: PanicProfile = PanicProfile {
        behavior: PanicBehavior::Normal,
        threshold: 2,
        can_receive: true,
    };
    const KING: PanicProfile = PanicProfile {
        behavior: PanicBehavior::Never,
        threshold: u32::MAX,
        can_receive: false,
    };
    const PEASANT: PanicProfile = PanicProfile {
        behavior: PanicBehavior::AlwaysPanic,
        threshold: 1,
        can_receive: true,
    };
    const MERCENARY: PanicProfile = PanicProfile {
        behavior: PanicBehavior::CausesPanic,
        threshold: 1,
        can_receive: false,
    };

    #[test]
    fn test_no_panic_faces_no_panic() {
        assert_eq!(resolve_panic(NORMAL_1, PEASANT, 0, true), PanicResult::None);
    }

    #[test]
    fn test_dead_defender_does_not_panic() {
        assert_eq!(resolve_panic(NORMAL_1, NORMAL_1, 3, false), PanicResult::None);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(resolve_panic(NORMAL_1, NORMAL_2, 1, true), PanicResult::None);
        assert_eq!(resolve_panic(NORMAL_1, NORMAL_2, 2, true), PanicResult::DefenderPanics);
    }

    #[test]
    fn test_peasant_defender_always_panics() {
        let heavy_threshold = PanicProfile {
            threshold: 5,
            ..PEASANT
        };
        assert_eq!(resolve_panic(NORMAL_1, heavy_threshold, 1, true), PanicResult::DefenderPanics);
    }

    #[test]
    fn test_peasant_attacker_panics_itself() {
        assert_eq!(resolve_panic(PEASANT, NORMAL_2, 1, true), PanicResult::AttackerPanics);
        // Defender precedence
        assert_eq!(resolve_panic(PEASANT, NORMAL_1, 1, true), PanicResult::DefenderPanics);
    }

    #[test]
    fn test_mercenary_turns_panic_around() {
        assert_eq!(resolve_panic(NORMAL_1, MERCENARY, 1, true), PanicResult::AttackerPanics);
        assert_eq!(resolve_panic(KING, MERCENARY, 2, true), PanicResult::None);
    }

    #[test]
    fn test_king_never_panics() {
        assert_eq!(resolve_panic(NORMAL_1, KING, 4, true), PanicResult::None);
    }

    #[test]
    fn test_retreat_distance_clamped() {
        assert_eq!(retreat_distance(1, 2), 1);
        assert_eq!(retreat_distance(5, 2), 2);
        assert_eq!(retreat_distance(0, 2), 1);
    }

    #[test]
    fn test_retreat_direction_away_from_opponent() {
        let me = TilePos::new(4, 4);
        assert_eq!(
            retreat_direction(me, TilePos::new(5, 4), Orientation::East),
            Orientation::North
        );
        assert_eq!(
            retreat_direction(me, TilePos::new(5, 5), Orientation::East),
            Orientation::East
        );
    }
}
