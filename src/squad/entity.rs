//! A squad: same-class units sharing one tile
//!
//! The squad owns its members, its facing and its idea of which tile it
//! stands on. Board occupancy itself lives in [`BoardGrid`](crate::board::BoardGrid);
//! callers change both together.

use glam::Vec3;

use crate::anim::{Animatable, AnimationQueue, AnimationTask, Unit};
use crate::board::{Orientation, TilePos};
use crate::core::config::GameConfig;
use crate::core::types::{EntityId, IdAllocator, PlayerId, SquadId};
use crate::presentation::PresentationRequest;
use crate::squad::formation::slot_position;
use crate::squad::unit_class::{ClassProperties, UnitClass};

/// Result of applying damage to a squad
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Hit points actually removed
    pub absorbed: u32,
    /// Members that died
    pub killed: Vec<EntityId>,
}

#[derive(Debug, Clone)]
pub struct SquadEntity {
    id: SquadId,
    entity: EntityId,
    owner: PlayerId,
    class: UnitClass,
    properties: ClassProperties,
    orientation: Orientation,
    tile: Option<TilePos>,
    /// Front to back; index 0 is the captain
    members: Vec<Unit>,
    /// Group queue: cue barriers
    queue: AnimationQueue,
    tile_size: f32,
    eliminated: bool,
    linger: f32,
}

impl SquadEntity {
    /// Create a full-strength squad standing on `tile`
    pub fn spawn(
        id: SquadId,
        owner: PlayerId,
        class: UnitClass,
        tile: TilePos,
        orientation: Orientation,
        ids: &mut IdAllocator,
        config: &GameConfig,
    ) -> Self {
        let properties = class.properties();
        let size = properties.squad_size;
        let members = (0..size)
            .map(|index| {
                let position = slot_position(tile, index, size, orientation, config.tile_size);
                let unit = Unit::new(
                    ids.entity(),
                    properties.health_per_unit,
                    position,
                    orientation.world_vector(),
                )
                .with_timeout(config.animation_timeout);
                if index == 0 {
                    unit.as_captain()
                } else {
                    unit
                }
            })
            .collect();

        Self {
            id,
            entity: ids.entity(),
            owner,
            class,
            properties,
            orientation,
            tile: Some(tile),
            members,
            queue: AnimationQueue::new(),
            tile_size: config.tile_size,
            eliminated: false,
            linger: config.elimination_linger,
        }
    }

    pub fn id(&self) -> SquadId {
        self.id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn class(&self) -> UnitClass {
        self.class
    }

    pub fn properties(&self) -> &ClassProperties {
        &self.properties
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// `None` once the squad has left the board
    pub fn tile(&self) -> Option<TilePos> {
        self.tile
    }

    pub fn members(&self) -> &[Unit] {
        &self.members
    }

    pub fn captain(&self) -> Option<&Unit> {
        self.members.iter().find(|unit| unit.is_captain())
    }

    pub fn captain_id(&self) -> Option<EntityId> {
        self.captain().map(Animatable::entity_id)
    }

    pub fn has_member(&self, entity: EntityId) -> bool {
        self.members.iter().any(|unit| unit.entity_id() == entity)
    }

    pub fn units_remaining(&self) -> usize {
        self.members.iter().filter(|unit| unit.is_alive()).count()
    }

    pub fn hit_points(&self) -> u32 {
        self.members.iter().map(Unit::hit_points).sum()
    }

    /// Dice this squad throws when it attacks
    pub fn dice_available(&self) -> u32 {
        self.units_remaining() as u32 * self.properties.dice_per_unit
    }

    pub fn can_receive_panic(&self) -> bool {
        self.properties.can_receive_panic
    }

    /// Whether `damage` leaves at least one unit standing
    pub fn would_survive(&self, damage: u32) -> bool {
        damage < self.hit_points()
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub(crate) fn set_tile(&mut self, tile: Option<TilePos>) {
        self.tile = tile;
    }

    /// Remove hit points, rearmost unit first so the captain falls last
    pub fn apply_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport::default();
        let mut left = amount;
        for unit in self.members.iter_mut().rev() {
            if left == 0 {
                break;
            }
            if !unit.is_alive() {
                continue;
            }
            let absorbed = unit.wound(left);
            left -= absorbed;
            report.absorbed += absorbed;
            if !unit.is_alive() {
                report.killed.push(unit.entity_id());
            }
        }
        report
    }

    fn live_members(&mut self) -> impl Iterator<Item = (usize, &mut Unit)> {
        self.members
            .iter_mut()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
    }

    fn slot(&self, tile: TilePos, index: usize, orientation: Orientation) -> Vec3 {
        slot_position(tile, index, self.members.len(), orientation, self.tile_size)
    }

    /// Walk every live member to its slot on `destination`
    pub fn enqueue_march(&mut self, destination: TilePos) {
        self.tile = Some(destination);
        let slots: Vec<Vec3> = (0..self.members.len())
            .map(|index| self.slot(destination, index, self.orientation))
            .collect();
        for (index, unit) in self.live_members() {
            unit.enqueue(AnimationTask::march(slots[index]));
        }
    }

    /// Turn to `orientation`: everyone rotates, waits for the rest, then re-forms
    pub fn enqueue_rotation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        let Some(tile) = self.tile else { return };

        let facing = orientation.world_vector();
        let slots: Vec<Vec3> = (0..self.members.len())
            .map(|index| self.slot(tile, index, orientation))
            .collect();
        for (index, unit) in self.live_members() {
            unit.enqueue(AnimationTask::rotate(facing));
            unit.enqueue(AnimationTask::wait_for_cue());
            unit.enqueue(AnimationTask::march(slots[index]));
        }
        self.queue.enqueue(AnimationTask::cue());
    }

    pub fn enqueue_attack(&mut self, direction: Vec3) {
        for (_, unit) in self.live_members() {
            unit.enqueue(AnimationTask::attack(direction));
        }
    }

    pub fn enqueue_block(&mut self, direction: Vec3) {
        for (_, unit) in self.live_members() {
            unit.enqueue(AnimationTask::block(direction));
        }
    }

    /// Leave the board for good: every live member dies at once
    pub fn eliminate(&mut self) {
        if self.eliminated {
            return;
        }
        self.eliminated = true;
        self.tile = None;
        self.queue.clear();
        for unit in &mut self.members {
            unit.kill();
        }
    }

    /// Flee off the board towards `direction`, then die
    pub fn panic_death(&mut self, direction: Orientation) {
        if self.eliminated {
            return;
        }
        self.eliminated = true;
        self.tile = None;
        self.queue.clear();

        let displacement = direction.world_vector() * (self.tile_size * 0.5);
        for unit in &mut self.members {
            if unit.is_alive() {
                let destination = unit.position() + displacement;
                unit.enqueue(AnimationTask::march(destination));
                unit.kill_after_queued();
            }
        }
    }

    /// Count down the post-elimination linger. True once the squad can be removed.
    pub fn linger_elapsed(&mut self, dt: f32) -> bool {
        if !self.eliminated {
            return false;
        }
        self.linger -= dt;
        self.linger <= 0.0 && !self.is_animating()
    }

    /// Route a presentation completion to whichever of our queues it belongs to
    pub fn complete_entity(&mut self, entity: EntityId) -> Option<AnimationTask> {
        if entity == self.entity {
            return self.queue.complete_current();
        }
        self.members
            .iter_mut()
            .find(|unit| unit.entity_id() == entity)
            .and_then(|unit| unit.complete_current())
    }

    /// All entity ids this squad answers for
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::once(self.entity).chain(self.members.iter().map(Animatable::entity_id))
    }

    /// Release the rotation barrier once every live member is parked on it
    fn release_barrier(&mut self) {
        if !self.queue.is_holding_barrier() {
            return;
        }
        let all_waiting = self
            .members
            .iter()
            .filter(|unit| unit.is_alive())
            .all(Unit::is_waiting_for_cue);
        if all_waiting {
            for unit in &mut self.members {
                unit.cue();
            }
            self.queue.complete_current();
        }
    }
}

impl Animatable for SquadEntity {
    fn entity_id(&self) -> EntityId {
        self.entity
    }

    fn enqueue(&mut self, task: AnimationTask) -> bool {
        self.queue.enqueue(task)
    }

    fn advance_if_idle(&mut self, dt: f32, out: &mut Vec<PresentationRequest>) {
        for unit in &mut self.members {
            unit.advance_if_idle(dt, out);
        }
        if let Some(task) = self.queue.advance_if_idle(dt) {
            tracing::debug!("squad {:?} group task {:?}", self.id, task.kind);
        }
        self.release_barrier();
    }

    fn is_animating(&self) -> bool {
        self.queue.is_animating() || self.members.iter().any(Animatable::is_animating)
    }

    fn complete_current(&mut self) -> Option<AnimationTask> {
        self.queue.complete_current()
    }
}
