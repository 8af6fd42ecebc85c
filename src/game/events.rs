//! Match event log

use serde::{Deserialize, Serialize};

use crate::board::{Orientation, TilePos};
use crate::core::types::{PlayerId, SquadId, Tick};
use crate::dice::DiceFace;
use crate::game::phase::GamePhase;

/// Something that happened during the match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: Tick,
    pub kind: GameEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    PhaseChanged { phase: GamePhase },
    SquadPlaced { squad: SquadId, tile: TilePos },
    SquadMoved { squad: SquadId, from: TilePos, to: TilePos },
    SquadRotated { squad: SquadId, orientation: Orientation },
    AttackDeclared { attacker: SquadId, defender: SquadId },
    DiceRolled { faces: Vec<DiceFace> },
    TurnOrderTied,
    TurnOrderDecided { first: PlayerId },
    BonusRollEarned { attacker: SquadId },
    DamageDealt { defender: SquadId, damage: u32 },
    Panic { squad: SquadId, distance: u32 },
    Retreated { squad: SquadId, to: TilePos },
    PanicDeath { squad: SquadId },
    SquadEliminated { squad: SquadId, owner: PlayerId },
    ActionRejected { reason: String },
    TurnEnded { player: PlayerId },
    GameOver { winner: PlayerId },
}

/// Append-only log stamped with the scheduler tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    tick: Tick,
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    pub fn push(&mut self, kind: GameEventKind, description: String) {
        tracing::debug!(tick = self.tick, "{}", description);
        self.events.push(GameEvent {
            tick: self.tick,
            kind,
            description,
        });
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Events matching a predicate on their kind
    pub fn filter<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a GameEvent> + 'a
    where
        F: Fn(&GameEventKind) -> bool + 'a,
    {
        self.events.iter().filter(move |event| predicate(&event.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_carry_tick() {
        let mut log = EventLog::new();
        log.push(
            GameEventKind::TurnEnded { player: PlayerId::ONE },
            "Player 1 ends their turn".into(),
        );
        log.set_tick(12);
        log.push(
            GameEventKind::GameOver { winner: PlayerId::TWO },
            "Player 2 wins".into(),
        );

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].tick, 0);
        assert_eq!(log.last().unwrap().tick, 12);
        assert_eq!(
            log.filter(|k| matches!(k, GameEventKind::GameOver { .. })).count(),
            1
        );
    }
}
