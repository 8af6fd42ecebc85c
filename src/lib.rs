//! Squad Tactics - rules engine for a turn-based squad board game
//!
//! Two players deploy squads on a square grid, roll for turn order and then
//! spend action points to move, rotate and attack. Attacks are settled with
//! dice; panic can push squads into chained retreats. The engine drives its
//! presentation through queued animation tasks and completion reports, so it
//! runs the same with a renderer attached or headless.

pub mod anim;
pub mod board;
pub mod combat;
pub mod core;
pub mod dice;
pub mod game;
pub mod presentation;
pub mod squad;

pub use crate::core::{EntityId, GameConfig, GameError, IllegalAction, PlayerId, Result, SquadId};
pub use board::{BoardGrid, Orientation, TilePos};
pub use game::{GamePhase, PlayerIntent, TurnController};
pub use presentation::{HeadlessPresenter, PresentationRequest};
