pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{GameError, IllegalAction, Result};
pub use types::{EntityId, IdAllocator, PlayerId, SquadId, Tick};
