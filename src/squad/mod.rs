//! Squads - groups of same-class units that act as one board piece
//!
//! A squad turns orders (move, rotate, attack, block, panic) into per-unit
//! animation tasks and answers reach queries against the board.

pub mod entity;
pub mod formation;
pub mod reach;
pub mod roster;
pub mod unit_class;

pub use entity::{DamageReport, SquadEntity};
pub use reach::{action_targets, enable_action_highlights, ActionTargets};
pub use roster::SquadRoster;
pub use unit_class::{ClassProperties, DamageType, PanicBehavior, UnitClass};
