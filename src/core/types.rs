//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Identifier for anything that owns an animation queue (units, squads, spectators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Identifier for squads on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquadId(pub u32);

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(0);
    pub const TWO: PlayerId = PlayerId(1);

    pub fn opponent(&self) -> Self {
        PlayerId(1 - self.0.min(1))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Scheduler tick counter (one per rendered frame)
pub type Tick = u64;

/// Hands out sequential ids so runs with the same seed are reproducible
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_entity: u32,
    next_squad: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub fn squad(&mut self) -> SquadId {
        let id = SquadId(self.next_squad);
        self.next_squad += 1;
        id
    }
}
