//! Turn controller - the top-level match state machine
//!
//! Owns the board, the squads, the dice and the config. Player intents come
//! in through [`TurnController::handle_intent`], presentation reports through
//! the `report_*` methods, and [`TurnController::tick`] advances every queue
//! once per frame. Requests for the presentation layer accumulate until
//! [`TurnController::drain_requests`].

use crate::anim::{Animatable, SpectatorGroup};
use crate::board::{BoardGrid, HighlightKind, Orientation, TilePos};
use crate::combat::{CombatContext, CombatData, CombatResolver};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, IllegalAction, Result};
use crate::core::types::{EntityId, IdAllocator, PlayerId, SquadId, Tick};
use crate::dice::{DiceFace, DiceSource, DiceSubsystem, RandomDice};
use crate::game::events::{EventLog, GameEvent, GameEventKind};
use crate::game::intent::PlayerIntent;
use crate::game::phase::GamePhase;
use crate::game::placement::{
    default_facing, deployment_tiles, in_deployment_zone, quick_start_layout, PlacementQueue,
};
use crate::game::player::Player;
use crate::presentation::{CameraPhase, PresentationRequest, SoundId};
use crate::squad::{enable_action_highlights, ActionTargets, SquadEntity, SquadRoster, UnitClass};

/// Camera move the controller is waiting on
#[derive(Debug, Clone, Copy)]
struct CameraWait {
    phase: CameraPhase,
    elapsed: f32,
}

pub struct TurnController {
    config: GameConfig,
    board: BoardGrid,
    roster: SquadRoster,
    players: [Player; 2],
    spectators: [SpectatorGroup; 2],
    dice: DiceSubsystem,
    ids: IdAllocator,

    phase: GamePhase,
    active: PlayerId,
    placement: [PlacementQueue; 2],
    selected: Option<SquadId>,
    /// A move or rotation is animating
    action_in_progress: bool,
    combat: Option<CombatResolver>,
    last_combat: Option<CombatData>,
    camera: Option<CameraWait>,

    tick: Tick,
    log: EventLog,
    requests: Vec<PresentationRequest>,
}

impl TurnController {
    /// New match using weighted random dice
    pub fn new(config: GameConfig) -> Result<Self> {
        let dice = RandomDice::new(&config.dice, config.seed)?;
        Self::with_dice(config, Box::new(dice))
    }

    /// New match drawing throws from `source`
    pub fn with_dice(config: GameConfig, source: Box<dyn DiceSource>) -> Result<Self> {
        config.validate()?;

        let mut ids = IdAllocator::new();
        let spectators = [
            SpectatorGroup::new(ids.entity(), PlayerId::ONE).with_timeout(config.animation_timeout),
            SpectatorGroup::new(ids.entity(), PlayerId::TWO).with_timeout(config.animation_timeout),
        ];
        let placement = [
            PlacementQueue::new(&config.army),
            PlacementQueue::new(&config.army),
        ];

        let mut controller = Self {
            board: BoardGrid::build(config.board_width, config.board_height),
            roster: SquadRoster::new(),
            players: [Player::new(PlayerId::ONE), Player::new(PlayerId::TWO)],
            spectators,
            dice: DiceSubsystem::new(source),
            ids,
            phase: GamePhase::ArmyPlacement(PlayerId::ONE),
            active: PlayerId::ONE,
            placement,
            selected: None,
            action_in_progress: false,
            combat: None,
            last_combat: None,
            camera: None,
            tick: 0,
            log: EventLog::new(),
            requests: Vec::new(),
            config,
        };

        controller.enter_phase(GamePhase::ArmyPlacement(PlayerId::ONE));
        Ok(controller)
    }

    // === QUERIES ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn ap_remaining(&self, id: PlayerId) -> u32 {
        self.players[id.index()].ap_remaining()
    }

    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    pub fn roster(&self) -> &SquadRoster {
        &self.roster
    }

    pub fn squad(&self, id: SquadId) -> Option<&SquadEntity> {
        self.roster.get(id)
    }

    /// Squad standing on `pos`
    pub fn squad_at(&self, pos: TilePos) -> Option<&SquadEntity> {
        self.board.occupant(pos).and_then(|id| self.roster.get(id))
    }

    pub fn selected(&self) -> Option<SquadId> {
        self.selected
    }

    pub fn spectators(&self, side: PlayerId) -> &SpectatorGroup {
        &self.spectators[side.index()]
    }

    pub fn combat(&self) -> Option<&CombatResolver> {
        self.combat.as_ref()
    }

    /// Bookkeeping of the most recently resolved attack
    pub fn last_combat(&self) -> Option<&CombatData> {
        self.last_combat.as_ref()
    }

    pub fn events(&self) -> &[GameEvent] {
        self.log.events()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Squads `player` still has to deploy
    pub fn placement_remaining(&self, player: PlayerId) -> usize {
        self.placement[player.index()].remaining()
    }

    pub fn is_animating(&self) -> bool {
        self.roster.is_animating() || self.spectators.iter().any(|group| group.is_animating())
    }

    /// Nothing pending: no action, combat, roll, camera move or animation
    pub fn is_settled(&self) -> bool {
        !self.action_in_progress
            && self.combat.is_none()
            && !self.dice.is_rolling()
            && self.camera.is_none()
            && !self.is_animating()
    }

    pub fn drain_requests(&mut self) -> Vec<PresentationRequest> {
        std::mem::take(&mut self.requests)
    }

    // === PRESENTATION REPORTS ===

    pub fn report_animation_complete(&mut self, entity: EntityId) {
        if self.roster.complete_entity(entity).is_some() {
            return;
        }
        if let Some(group) = self
            .spectators
            .iter_mut()
            .find(|group| group.entity_id() == entity)
        {
            group.complete_current();
            return;
        }
        tracing::debug!("completion report for {:?} matched nothing in flight", entity);
    }

    pub fn report_attack_contact_frame(&mut self, entity: EntityId) {
        if let Some(combat) = &mut self.combat {
            combat.on_contact(entity);
        }
    }

    pub fn report_block_ready(&mut self, entity: EntityId) {
        if let Some(combat) = &mut self.combat {
            combat.on_block_ready(entity);
        }
    }

    pub fn report_camera_transition_complete(&mut self) {
        self.camera = None;
    }

    // === INTENTS ===

    /// Apply a player intent
    ///
    /// Illegal intents change nothing; they produce a message and an error
    /// sound for the player and come back as `GameError::Illegal`.
    pub fn handle_intent(&mut self, intent: PlayerIntent) -> Result<()> {
        let result = self.dispatch(intent);
        if let Err(GameError::Illegal(reason)) = &result {
            let text = reason.to_string();
            self.requests.push(PresentationRequest::message(text.clone()));
            self.requests.push(PresentationRequest::SoundCue(SoundId::Error));
            self.log.push(
                GameEventKind::ActionRejected {
                    reason: text.clone(),
                },
                format!("Rejected {:?}: {}", intent, text),
            );
        }
        result
    }

    fn dispatch(&mut self, intent: PlayerIntent) -> Result<()> {
        match self.phase {
            GamePhase::ArmyPlacement(player) => match intent {
                PlayerIntent::TileClicked(pos) => self.place_next(player, pos),
                PlayerIntent::RotationArrowClicked(id, facing) => {
                    self.rotate_during_placement(player, id, facing)
                }
                PlayerIntent::EndPlacementRequested => self.end_placement(player),
                _ => Err(IllegalAction::WrongPhase.into()),
            },

            GamePhase::TurnOrderRoll => match intent {
                PlayerIntent::DiceRollRequested => self.roll_turn_order(),
                _ => Err(IllegalAction::WrongPhase.into()),
            },

            GamePhase::Active => {
                if self.action_in_progress || self.roster.is_animating() {
                    return Err(IllegalAction::Busy.into());
                }
                match intent {
                    PlayerIntent::SquadClicked(id) => self.click_squad(id),
                    PlayerIntent::TileClicked(pos) => self.click_tile(pos),
                    PlayerIntent::RotationArrowClicked(id, facing) => self.rotate(id, facing),
                    PlayerIntent::EndTurnRequested => {
                        self.end_turn();
                        Ok(())
                    }
                    PlayerIntent::DiceRollRequested | PlayerIntent::EndPlacementRequested => {
                        Err(IllegalAction::WrongPhase.into())
                    }
                }
            }

            GamePhase::Attacking => Err(IllegalAction::Busy.into()),
            GamePhase::GameOver { .. } => Err(IllegalAction::WrongPhase.into()),
        }
    }

    // === PLACEMENT ===

    fn place_next(&mut self, player: PlayerId, pos: TilePos) -> Result<()> {
        let class = self.placement[player.index()]
            .next()
            .ok_or(IllegalAction::RosterExhausted)?;
        if !self.board.contains(pos) {
            return Err(IllegalAction::OffBoard(pos).into());
        }
        if !in_deployment_zone(player, pos, &self.config) {
            return Err(IllegalAction::OutsideDeploymentZone(pos).into());
        }
        if self.board.is_occupied(pos) {
            return Err(IllegalAction::TileOccupied(pos).into());
        }

        self.placement[player.index()].take();
        let id = self.spawn_squad(player, class, pos)?;
        self.log.push(
            GameEventKind::SquadPlaced { squad: id, tile: pos },
            format!("Player {} places {} at {}", player.0 + 1, class.name(), pos),
        );
        self.highlight_deployment_zone(player);
        Ok(())
    }

    fn spawn_squad(&mut self, player: PlayerId, class: UnitClass, pos: TilePos) -> Result<SquadId> {
        let id = self.ids.squad();
        let squad = SquadEntity::spawn(
            id,
            player,
            class,
            pos,
            default_facing(player),
            &mut self.ids,
            &self.config,
        );
        self.board.place_squad(pos, id)?;
        self.roster.insert(squad);
        self.players[player.index()].add_squad(id, class == UnitClass::King);
        Ok(id)
    }

    /// Free rotation while deploying
    fn rotate_during_placement(
        &mut self,
        player: PlayerId,
        id: SquadId,
        facing: Orientation,
    ) -> Result<()> {
        let squad = self.roster.require_mut(id)?;
        if squad.owner() != player {
            return Err(IllegalAction::NotYourSquad(id, squad.owner()).into());
        }
        if squad.orientation() == facing {
            return Err(IllegalAction::AlreadyFacing.into());
        }
        squad.enqueue_rotation(facing);
        self.log.push(
            GameEventKind::SquadRotated {
                squad: id,
                orientation: facing,
            },
            format!("Squad {:?} turns {:?}", id, facing),
        );
        Ok(())
    }

    fn end_placement(&mut self, player: PlayerId) -> Result<()> {
        let remaining = self.placement[player.index()].remaining();
        if remaining > 0 {
            return Err(IllegalAction::RosterIncomplete { remaining }.into());
        }
        if player == PlayerId::ONE {
            self.enter_phase(GamePhase::ArmyPlacement(PlayerId::TWO));
        } else {
            self.enter_phase(GamePhase::TurnOrderRoll);
        }
        Ok(())
    }

    /// Deploy both armies in the fixed layout and start play with player one
    pub fn quick_start(&mut self) -> Result<()> {
        if self.phase != GamePhase::ArmyPlacement(PlayerId::ONE) || !self.roster.is_empty() {
            return Err(IllegalAction::WrongPhase.into());
        }

        let layouts = [
            quick_start_layout(PlayerId::ONE, &self.config)?,
            quick_start_layout(PlayerId::TWO, &self.config)?,
        ];
        for (player, layout) in [PlayerId::ONE, PlayerId::TWO].into_iter().zip(layouts) {
            for (class, pos) in layout {
                let id = self.spawn_squad(player, class, pos)?;
                self.log.push(
                    GameEventKind::SquadPlaced { squad: id, tile: pos },
                    format!("Player {} places {} at {}", player.0 + 1, class.name(), pos),
                );
            }
            self.placement[player.index()].clear();
        }

        tracing::info!("quick start: both armies deployed");
        self.begin_turn(PlayerId::ONE);
        self.enter_phase(GamePhase::Active);
        Ok(())
    }

    // === TURN ORDER ===

    fn roll_turn_order(&mut self) -> Result<()> {
        self.dice.start_roll(2)?;
        self.requests.push(PresentationRequest::SoundCue(SoundId::DiceRoll));
        Ok(())
    }

    fn settle_turn_order(&mut self, faces: &[DiceFace]) {
        let (Some(first), Some(second)) = (faces.first(), faces.get(1)) else {
            return;
        };

        let winner = match first.rank().cmp(&second.rank()) {
            std::cmp::Ordering::Greater => PlayerId::ONE,
            std::cmp::Ordering::Less => PlayerId::TWO,
            std::cmp::Ordering::Equal => {
                self.log.push(
                    GameEventKind::TurnOrderTied,
                    format!("Both players rolled {:?}; roll again", first),
                );
                self.requests
                    .push(PresentationRequest::message("Tie! Roll again."));
                return;
            }
        };

        self.log.push(
            GameEventKind::TurnOrderDecided { first: winner },
            format!(
                "Player 1 rolled {:?}, player 2 rolled {:?}: player {} goes first",
                first,
                second,
                winner.0 + 1
            ),
        );
        self.begin_turn(winner);
        self.enter_phase(GamePhase::Active);
    }

    // === ACTIVE PLAY ===

    fn click_squad(&mut self, id: SquadId) -> Result<()> {
        let squad = self.live_squad(id)?;
        if squad.owner() == self.active {
            self.select(id)?;
            return Ok(());
        }
        match squad.tile() {
            Some(pos) => self.click_tile(pos),
            None => Err(GameError::SquadNotFound(id)),
        }
    }

    fn click_tile(&mut self, pos: TilePos) -> Result<()> {
        if !self.board.contains(pos) {
            return Err(IllegalAction::OffBoard(pos).into());
        }
        if self.board.is_valid_move_target(pos) {
            return self.move_selected(pos);
        }
        if self.board.is_valid_attack_target(pos) {
            return self.attack(pos);
        }
        if let Some(occupant) = self.board.occupant(pos) {
            if self.roster.owner_of(occupant) == Some(self.active) {
                self.select(occupant)?;
                return Ok(());
            }
        }
        match self.selected {
            None => Err(IllegalAction::NoSquadSelected.into()),
            Some(_) => Err(IllegalAction::NotHighlighted(pos).into()),
        }
    }

    /// Select one of the active player's squads and light up its options
    fn select(&mut self, id: SquadId) -> Result<ActionTargets> {
        let owner = self.live_squad(id)?.owner();
        if owner != self.active {
            return Err(IllegalAction::NotYourSquad(id, owner).into());
        }

        self.clear_highlights();
        self.selected = Some(id);

        let roster = &self.roster;
        let squad = roster.require(id)?;
        let targets = enable_action_highlights(&mut self.board, squad, |s| roster.owner_of(s));

        if let Some(pos) = squad.tile() {
            self.requests
                .push(PresentationRequest::highlight(pos, HighlightKind::Selected));
        }
        for tile in &targets.moves {
            self.requests
                .push(PresentationRequest::highlight(*tile, HighlightKind::Move));
        }
        for tile in &targets.attacks {
            self.requests
                .push(PresentationRequest::highlight(*tile, HighlightKind::Attack));
        }
        Ok(targets)
    }

    /// A squad still standing on the board
    fn live_squad(&self, id: SquadId) -> Result<&SquadEntity> {
        let squad = self.roster.require(id)?;
        if squad.is_eliminated() {
            return Err(GameError::SquadNotFound(id));
        }
        Ok(squad)
    }

    fn selected_squad(&self) -> Result<SquadId> {
        self.selected
            .ok_or_else(|| IllegalAction::NoSquadSelected.into())
    }

    fn move_selected(&mut self, to: TilePos) -> Result<()> {
        let id = self.selected_squad()?;
        let squad = self.roster.require(id)?;
        let from = squad.tile().ok_or_else(|| {
            GameError::Invariant(format!("selected squad {:?} is off the board", id))
        })?;
        let cost = squad.properties().move_cost;
        self.players[self.active.index()].check_ap(cost)?;

        self.roster.relocate(&mut self.board, id, to)?;
        self.players[self.active.index()].spend_ap(cost)?;
        self.clear_highlights();
        self.action_in_progress = true;
        self.log.push(
            GameEventKind::SquadMoved { squad: id, from, to },
            format!("Squad {:?} marches from {} to {}", id, from, to),
        );
        Ok(())
    }

    fn rotate(&mut self, id: SquadId, facing: Orientation) -> Result<()> {
        let squad = self.live_squad(id)?;
        if squad.owner() != self.active {
            return Err(IllegalAction::NotYourSquad(id, squad.owner()).into());
        }
        let pos = squad
            .tile()
            .ok_or_else(|| GameError::Invariant(format!("squad {:?} is off the board", id)))?;
        // Rotation arrows belong to the selected squad
        if self.selected != Some(id) {
            return Err(IllegalAction::NotHighlighted(pos).into());
        }
        if squad.orientation() == facing {
            return Err(IllegalAction::AlreadyFacing.into());
        }
        let cost = squad.properties().rotate_cost;
        self.players[self.active.index()].spend_ap(cost)?;

        self.clear_highlights();
        self.roster.require_mut(id)?.enqueue_rotation(facing);
        self.action_in_progress = true;
        self.log.push(
            GameEventKind::SquadRotated {
                squad: id,
                orientation: facing,
            },
            format!("Squad {:?} turns {:?}", id, facing),
        );
        Ok(())
    }

    fn attack(&mut self, target: TilePos) -> Result<()> {
        let attacker_id = self.selected_squad()?;
        let defender_id = self
            .board
            .occupant(target)
            .ok_or(IllegalAction::NotHighlighted(target))?;

        let attacker = self.roster.require(attacker_id)?;
        let defender = self.roster.require(defender_id)?;
        let cost = attacker.properties().attack_cost;
        self.players[self.active.index()].check_ap(cost)?;

        let resolver = CombatResolver::initiate(attacker, defender, self.config.tile_size);
        let from = attacker.tile().unwrap_or(target);

        self.players[self.active.index()].spend_ap(cost)?;
        self.clear_highlights();
        self.log.push(
            GameEventKind::AttackDeclared {
                attacker: attacker_id,
                defender: defender_id,
            },
            format!(
                "Squad {:?} attacks squad {:?} with {} dice",
                attacker_id,
                defender_id,
                resolver.data().dice_available
            ),
        );
        self.combat = Some(resolver);
        self.request_camera(CameraPhase::Combat {
            attacker: from,
            defender: target,
        });
        self.enter_phase(GamePhase::Attacking);
        Ok(())
    }

    /// Hand the turn to the other player
    fn end_turn(&mut self) {
        let ending = self.active;
        self.players[ending.index()].forfeit_ap();
        self.clear_highlights();
        self.log.push(
            GameEventKind::TurnEnded { player: ending },
            format!("Player {} ends their turn", ending.0 + 1),
        );
        self.begin_turn(ending.opponent());
    }

    fn begin_turn(&mut self, player: PlayerId) {
        self.active = player;
        self.selected = None;
        self.players[player.index()].reset_ap(self.config.ap_per_turn);
        tracing::info!("player {} to move with {} AP", player.0 + 1, self.config.ap_per_turn);
        self.requests
            .push(PresentationRequest::SoundCue(SoundId::TurnStart));
        self.request_camera(CameraPhase::TurnStart(player));
    }

    // === SCHEDULER ===

    /// One frame: advance every queue, then whatever phase logic is waiting on them
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        self.tick += 1;
        self.log.set_tick(self.tick);

        self.roster.advance(dt, &mut self.requests);
        for group in &mut self.spectators {
            group.advance_if_idle(dt, &mut self.requests);
        }
        self.advance_camera(dt);

        match self.phase {
            GamePhase::TurnOrderRoll => {
                if let Some(outcome) = self.dice.tick() {
                    self.log.push(
                        GameEventKind::DiceRolled {
                            faces: outcome.faces.clone(),
                        },
                        format!("Turn order roll: {:?}", outcome.faces),
                    );
                    self.settle_turn_order(&outcome.faces);
                }
            }
            GamePhase::Attacking => self.advance_combat(dt)?,
            GamePhase::Active => {
                if self.action_in_progress && !self.roster.is_animating() {
                    self.finish_action();
                }
            }
            GamePhase::ArmyPlacement(_) | GamePhase::GameOver { .. } => {}
        }

        self.process_eliminations();
        for id in self.roster.sweep(dt) {
            tracing::debug!("squad {:?} removed after elimination", id);
        }

        let occupancy = self.board.verify_occupancy(self.roster.placements());
        debug_assert!(occupancy.is_ok(), "{:?}", occupancy);
        Ok(())
    }

    fn advance_camera(&mut self, dt: f32) {
        let Some(wait) = &mut self.camera else { return };
        wait.elapsed += dt;
        if wait.elapsed >= self.config.animation_timeout {
            tracing::warn!(
                "camera move to {:?} not reported after {:.1}s, continuing",
                wait.phase,
                wait.elapsed
            );
            self.camera = None;
        }
    }

    fn advance_combat(&mut self, dt: f32) -> Result<()> {
        // The fight starts once the camera has framed it
        if self.camera.is_some() {
            return Ok(());
        }
        let Some(combat) = &mut self.combat else {
            return Ok(());
        };

        let mut ctx = CombatContext {
            roster: &mut self.roster,
            board: &mut self.board,
            dice: &mut self.dice,
            config: &self.config,
            log: &mut self.log,
            out: &mut self.requests,
        };
        combat.step(dt, &mut ctx)?;

        if combat.is_resolved() && !combat.bonus_pending() && !self.roster.is_animating() {
            self.finish_combat();
        }
        Ok(())
    }

    fn finish_combat(&mut self) {
        self.process_eliminations();
        if let Some(combat) = self.combat.take() {
            self.last_combat = Some(combat.data().clone());
        }
        self.clear_highlights();
        self.selected = None;

        let attacker_side = self.active;
        let defender_side = attacker_side.opponent();
        let min = self.config.min_squads_remaining;
        if self.players[defender_side.index()].is_defeated(min) {
            self.game_over(attacker_side);
            return;
        }
        if self.players[attacker_side.index()].is_defeated(min) {
            self.game_over(defender_side);
            return;
        }

        self.enter_phase(GamePhase::Active);
        if self.players[attacker_side.index()].ap_remaining() == 0 {
            self.end_turn();
        }
    }

    fn finish_action(&mut self) {
        self.action_in_progress = false;
        self.clear_highlights();
        self.selected = None;
        if self.players[self.active.index()].ap_remaining() == 0 {
            self.end_turn();
        }
    }

    fn process_eliminations(&mut self) {
        for id in self.roster.take_eliminations() {
            let Some(owner) = self.roster.owner_of(id) else {
                continue;
            };
            self.players[owner.index()].lose_squad(id);
            self.spectators[owner.opponent().index()].cheer();
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.log.push(
                GameEventKind::SquadEliminated { squad: id, owner },
                format!(
                    "Player {} loses squad {:?} ({} left)",
                    owner.0 + 1,
                    id,
                    self.players[owner.index()].squads_remaining()
                ),
            );
        }
    }

    fn game_over(&mut self, winner: PlayerId) {
        tracing::info!("player {} wins", winner.0 + 1);
        self.log.push(
            GameEventKind::GameOver { winner },
            format!("Player {} wins the match", winner.0 + 1),
        );
        self.requests
            .push(PresentationRequest::SoundCue(SoundId::Victory));
        self.request_camera(CameraPhase::GameOver);
        self.enter_phase(GamePhase::GameOver { winner });
    }

    // === HELPERS ===

    fn enter_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        tracing::info!("phase: {}", phase);
        self.log.push(
            GameEventKind::PhaseChanged { phase },
            format!("Phase changed to {}", phase),
        );

        match phase {
            GamePhase::ArmyPlacement(player) => {
                self.active = player;
                self.request_camera(CameraPhase::Placement(player));
                self.highlight_deployment_zone(player);
            }
            GamePhase::TurnOrderRoll => {
                self.clear_highlights();
                self.request_camera(CameraPhase::Overview);
            }
            GamePhase::Active | GamePhase::Attacking | GamePhase::GameOver { .. } => {}
        }
    }

    fn request_camera(&mut self, phase: CameraPhase) {
        self.camera = Some(CameraWait {
            phase,
            elapsed: 0.0,
        });
        self.requests.push(PresentationRequest::CameraMove(phase));
    }

    fn clear_highlights(&mut self) {
        for tile in self.board.clear_all_highlights() {
            self.requests
                .push(PresentationRequest::highlight(tile, HighlightKind::Cleared));
        }
    }

    /// Light the empty tiles the deploying player may still use
    fn highlight_deployment_zone(&mut self, player: PlayerId) {
        self.clear_highlights();
        if self.placement[player.index()].remaining() == 0 {
            return;
        }
        for tile in deployment_tiles(player, &self.config) {
            if !self.board.is_occupied(tile) {
                self.board.mark(tile, HighlightKind::Move);
                self.requests
                    .push(PresentationRequest::highlight(tile, HighlightKind::Move));
            }
        }
    }
}
