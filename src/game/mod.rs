//! Match flow - placement, turn order, action points and victory
//!
//! The [`TurnController`] is the single owner of match state. Everything a
//! player does arrives as a [`PlayerIntent`]; everything that happened is
//! recorded in the [`EventLog`].

pub mod controller;
pub mod events;
pub mod intent;
pub mod phase;
pub mod placement;
pub mod player;

pub use controller::TurnController;
pub use events::{EventLog, GameEvent, GameEventKind};
pub use intent::PlayerIntent;
pub use phase::GamePhase;
pub use placement::{
    default_facing, deployment_rows, deployment_tiles, in_deployment_zone, quick_start_layout,
    PlacementQueue,
};
pub use player::Player;
