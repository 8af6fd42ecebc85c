//! Cooperative animation scheduling
//!
//! Every animatable entity owns a FIFO of [`AnimationTask`]s. One scheduler
//! tick per frame calls `advance_if_idle` on each entity; a task stays in
//! flight until the presentation layer reports it finished, so logical
//! ordering never depends on how long an animation takes to play.

pub mod actor;
pub mod queue;
pub mod task;

pub use actor::{Animatable, AnimationState, SpectatorGroup, Unit};
pub use queue::AnimationQueue;
pub use task::{AnimationKind, AnimationTask};
