//! Every squad in the match, indexed by squad and by animation entity

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::anim::{Animatable, AnimationTask};
use crate::board::{BoardGrid, Orientation, TilePos};
use crate::core::error::{GameError, Result};
use crate::core::types::{EntityId, PlayerId, SquadId};
use crate::presentation::PresentationRequest;
use crate::squad::entity::SquadEntity;

#[derive(Debug, Clone, Default)]
pub struct SquadRoster {
    squads: BTreeMap<SquadId, SquadEntity>,
    by_entity: AHashMap<EntityId, SquadId>,
    /// Eliminated since the last `take_eliminations`
    eliminations: Vec<SquadId>,
}

impl SquadRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, squad: SquadEntity) {
        for entity in squad.entity_ids() {
            self.by_entity.insert(entity, squad.id());
        }
        self.squads.insert(squad.id(), squad);
    }

    pub fn get(&self, id: SquadId) -> Option<&SquadEntity> {
        self.squads.get(&id)
    }

    pub fn get_mut(&mut self, id: SquadId) -> Option<&mut SquadEntity> {
        self.squads.get_mut(&id)
    }

    /// Like `get`, but a missing squad is an error
    pub fn require(&self, id: SquadId) -> Result<&SquadEntity> {
        self.squads.get(&id).ok_or(GameError::SquadNotFound(id))
    }

    pub fn require_mut(&mut self, id: SquadId) -> Result<&mut SquadEntity> {
        self.squads.get_mut(&id).ok_or(GameError::SquadNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.squads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SquadEntity> {
        self.squads.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SquadEntity> {
        self.squads.values_mut()
    }

    /// Squads of `player` still on the board
    pub fn active_squads(&self, player: PlayerId) -> impl Iterator<Item = &SquadEntity> {
        self.squads
            .values()
            .filter(move |squad| squad.owner() == player && !squad.is_eliminated())
    }

    pub fn owner_of(&self, id: SquadId) -> Option<PlayerId> {
        self.squads.get(&id).map(SquadEntity::owner)
    }

    pub fn squad_for_entity(&self, entity: EntityId) -> Option<SquadId> {
        self.by_entity.get(&entity).copied()
    }

    /// Where each live squad believes it stands, for occupancy checks
    pub fn placements(&self) -> impl Iterator<Item = (SquadId, Option<TilePos>)> + '_ {
        self.squads
            .values()
            .filter(|squad| !squad.is_eliminated())
            .map(|squad| (squad.id(), squad.tile()))
    }

    /// Move a squad one or more tiles: board pair-update plus march
    pub fn relocate(&mut self, board: &mut BoardGrid, id: SquadId, to: TilePos) -> Result<()> {
        let squad = self.squads.get_mut(&id).ok_or(GameError::SquadNotFound(id))?;
        let from = squad
            .tile()
            .ok_or_else(|| GameError::Invariant(format!("squad {:?} is not on the board", id)))?;
        board.move_squad(from, to)?;
        squad.enqueue_march(to);
        Ok(())
    }

    /// Eliminate `id` if it has no units left. True if this call eliminated it.
    pub fn check_elimination(&mut self, board: &mut BoardGrid, id: SquadId) -> bool {
        match self.squads.get(&id) {
            Some(squad) if !squad.is_eliminated() && squad.units_remaining() == 0 => {
                self.eliminate(board, id)
            }
            _ => false,
        }
    }

    /// Take a squad off the board. Reported once through `take_eliminations`.
    pub fn eliminate(&mut self, board: &mut BoardGrid, id: SquadId) -> bool {
        let Some(squad) = self.squads.get_mut(&id) else {
            return false;
        };
        if squad.is_eliminated() {
            return false;
        }
        if let Some(tile) = squad.tile() {
            board.clear_tile(tile);
        }
        squad.eliminate();
        self.eliminations.push(id);
        true
    }

    /// Panic death: vacate, stagger towards `direction`, then die
    pub fn panic_death(
        &mut self,
        board: &mut BoardGrid,
        id: SquadId,
        direction: Orientation,
    ) -> bool {
        let Some(squad) = self.squads.get_mut(&id) else {
            return false;
        };
        if squad.is_eliminated() {
            return false;
        }
        if let Some(tile) = squad.tile() {
            board.clear_tile(tile);
        }
        squad.panic_death(direction);
        self.eliminations.push(id);
        true
    }

    pub fn take_eliminations(&mut self) -> Vec<SquadId> {
        std::mem::take(&mut self.eliminations)
    }

    /// Advance every squad's queues
    pub fn advance(&mut self, dt: f32, out: &mut Vec<PresentationRequest>) {
        for squad in self.squads.values_mut() {
            squad.advance_if_idle(dt, out);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.squads.values().any(Animatable::is_animating)
    }

    /// Forward a presentation completion to the owning queue
    pub fn complete_entity(&mut self, entity: EntityId) -> Option<AnimationTask> {
        let id = self.by_entity.get(&entity)?;
        self.squads.get_mut(id)?.complete_entity(entity)
    }

    /// Drop eliminated squads whose linger has run out
    pub fn sweep(&mut self, dt: f32) -> Vec<SquadId> {
        let expired: Vec<SquadId> = self
            .squads
            .values_mut()
            .filter_map(|squad| squad.linger_elapsed(dt).then(|| squad.id()))
            .collect();

        for id in &expired {
            if let Some(squad) = self.squads.remove(id) {
                for entity in squad.entity_ids() {
                    self.by_entity.remove(&entity);
                }
            }
        }
        expired
    }
}
