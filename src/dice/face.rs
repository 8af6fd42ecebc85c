//! Die faces and where throws come from

use std::collections::VecDeque;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::DiceConfig;
use crate::core::error::{GameError, Result};

/// A settled face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceFace {
    Axe,
    Arrow,
    Panic,
}

impl DiceFace {
    pub const ALL: [DiceFace; 3] = [DiceFace::Axe, DiceFace::Arrow, DiceFace::Panic];

    pub fn index(&self) -> usize {
        match self {
            DiceFace::Axe => 0,
            DiceFace::Arrow => 1,
            DiceFace::Panic => 2,
        }
    }

    /// Turn-order strength: Axe beats Arrow beats Panic
    pub fn rank(&self) -> u8 {
        match self {
            DiceFace::Axe => 2,
            DiceFace::Arrow => 1,
            DiceFace::Panic => 0,
        }
    }
}

/// Outcome of a single physical throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Throw {
    Face(DiceFace),
    /// Landed on an edge; has to be thrown again
    Cocked,
}

/// Source of die throws
pub trait DiceSource: std::fmt::Debug {
    fn throw(&mut self) -> Throw;
}

/// Weighted random die
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: ChaCha8Rng,
    faces: WeightedIndex<u32>,
    cocked_chance: f64,
}

impl RandomDice {
    pub fn new(config: &DiceConfig, seed: Option<u64>) -> Result<Self> {
        let weights = [config.axe_weight, config.arrow_weight, config.panic_weight];
        let faces = WeightedIndex::new(weights)
            .map_err(|e| GameError::Config(format!("invalid dice weights: {}", e)))?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            rng,
            faces,
            cocked_chance: config.cocked_chance,
        })
    }
}

impl DiceSource for RandomDice {
    fn throw(&mut self) -> Throw {
        if self.cocked_chance > 0.0 && self.rng.gen_bool(self.cocked_chance.min(1.0)) {
            return Throw::Cocked;
        }
        Throw::Face(DiceFace::ALL[self.faces.sample(&mut self.rng)])
    }
}

/// Plays back a fixed sequence of throws, then repeats a fallback face
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    throws: VecDeque<Throw>,
    fallback: DiceFace,
}

impl ScriptedDice {
    pub fn new<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = DiceFace>,
    {
        Self {
            throws: faces.into_iter().map(Throw::Face).collect(),
            fallback: DiceFace::Arrow,
        }
    }

    pub fn from_throws<I>(throws: I) -> Self
    where
        I: IntoIterator<Item = Throw>,
    {
        Self {
            throws: throws.into_iter().collect(),
            fallback: DiceFace::Arrow,
        }
    }

    pub fn with_fallback(mut self, face: DiceFace) -> Self {
        self.fallback = face;
        self
    }

    pub fn push(&mut self, face: DiceFace) {
        self.throws.push_back(Throw::Face(face));
    }

    pub fn remaining(&self) -> usize {
        self.throws.len()
    }
}

impl DiceSource for ScriptedDice {
    fn throw(&mut self) -> Throw {
        self.throws
            .pop_front()
            .unwrap_or(Throw::Face(self.fallback))
    }
}
