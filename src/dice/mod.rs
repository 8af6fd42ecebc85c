//! Dice subsystem - N independent throws reduced to face tallies

pub mod face;
pub mod roll;

pub use face::{DiceFace, DiceSource, RandomDice, ScriptedDice, Throw};
pub use roll::{DiceOutcome, DiceRollState, DiceSubsystem};
