//! Combat resolution
//!
//! Damage comes from counting die faces that match the attacker's damage
//! type. A small squad that rolls exactly one hit against a larger one
//! trades it for a doubled re-roll, and panic faces can send either side
//! into a chained retreat.

pub mod data;
pub mod panic;
pub mod resolver;
pub mod retreat;

pub use data::{CombatData, PanicResult};
pub use panic::{resolve_panic, retreat_direction, retreat_distance, PanicProfile};
pub use resolver::{CombatContext, CombatResolver, CombatState};
pub use retreat::PanicRetreat;
