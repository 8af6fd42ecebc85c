//! Dice rolls that settle over scheduler ticks
//!
//! A roll throws every die on the first tick. Dice that land cocked are
//! thrown again on the following tick until every die shows a face; only
//! then is the outcome reported.

use serde::{Deserialize, Serialize};

use crate::core::error::{IllegalAction, Result};
use crate::dice::face::{DiceFace, DiceSource, Throw};

/// Settled faces of one roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceOutcome {
    pub faces: Vec<DiceFace>,
    /// Count per face, indexed by `DiceFace::index`
    pub tallies: [u32; 3],
}

impl DiceOutcome {
    pub fn from_faces(faces: Vec<DiceFace>) -> Self {
        let mut tallies = [0; 3];
        for face in &faces {
            tallies[face.index()] += 1;
        }
        Self { faces, tallies }
    }

    pub fn count(&self, face: DiceFace) -> u32 {
        self.tallies[face.index()]
    }
}

/// In-progress roll
#[derive(Debug, Clone, Default)]
pub struct DiceRollState {
    requested: usize,
    /// `None` until the die settles on a face
    results: Vec<Option<DiceFace>>,
    tallies: [u32; 3],
}

impl DiceRollState {
    fn new(count: usize) -> Self {
        Self {
            requested: count,
            results: vec![None; count],
            tallies: [0; 3],
        }
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn settled(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    pub fn tallies(&self) -> [u32; 3] {
        self.tallies
    }

    fn is_complete(&self) -> bool {
        self.results.iter().all(Option::is_some)
    }
}

/// Rolls dice on request and reports the settled faces
#[derive(Debug)]
pub struct DiceSubsystem {
    source: Box<dyn DiceSource>,
    roll: Option<DiceRollState>,
    rolls_completed: u32,
}

impl DiceSubsystem {
    pub fn new(source: Box<dyn DiceSource>) -> Self {
        Self {
            source,
            roll: None,
            rolls_completed: 0,
        }
    }

    pub fn is_rolling(&self) -> bool {
        self.roll.is_some()
    }

    pub fn current(&self) -> Option<&DiceRollState> {
        self.roll.as_ref()
    }

    pub fn rolls_completed(&self) -> u32 {
        self.rolls_completed
    }

    /// Begin a roll of `count` dice
    pub fn start_roll(&mut self, count: usize) -> Result<()> {
        if self.roll.is_some() {
            return Err(IllegalAction::DiceBusy.into());
        }
        tracing::debug!("rolling {} dice", count);
        self.roll = Some(DiceRollState::new(count));
        Ok(())
    }

    /// Throw every unsettled die once; returns the outcome when all have settled
    pub fn tick(&mut self) -> Option<DiceOutcome> {
        let roll = self.roll.as_mut()?;

        for slot in roll.results.iter_mut().filter(|slot| slot.is_none()) {
            match self.source.throw() {
                Throw::Face(face) => {
                    roll.tallies[face.index()] += 1;
                    *slot = Some(face);
                }
                Throw::Cocked => tracing::debug!("die landed cocked, rethrowing"),
            }
        }

        if !roll.is_complete() {
            return None;
        }

        let faces: Vec<DiceFace> = roll.results.iter().flatten().copied().collect();
        self.roll = None;
        self.rolls_completed += 1;
        Some(DiceOutcome::from_faces(faces))
    }

    /// Drop an unfinished roll
    pub fn cancel(&mut self) {
        self.roll = None;
    }
}
