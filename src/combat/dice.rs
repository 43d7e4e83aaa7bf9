//! Dice sources for combat.
//!
//! Combat only needs one six-sided die per side per round. The source is a
//! trait so games can be replayed or tested with a scripted sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of faces on a combat die.
pub const DIE_FACES: u8 = 6;

/// A source of six-sided die rolls.
pub trait Dice {
    /// Rolls one die, returning a value in `1..=6`.
    fn roll(&mut self) -> u8;
}

/// Uniformly random dice backed by a small, fast RNG.
pub struct RandomDice {
    rng: SmallRng,
}

impl RandomDice {
    /// Seeds the dice from OS entropy.
    pub fn from_entropy() -> Self {
        RandomDice {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeds the dice deterministically. A seed of 0 means entropy.
    pub fn from_seed(seed: u64) -> Self {
        if seed == 0 {
            return Self::from_entropy();
        }
        RandomDice {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Gives callers (mission draw) access to the same RNG stream.
    pub fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Dice that replay a fixed script of faces.
///
/// Once the script runs out the last face repeats. An empty script always
/// rolls 1. Faces outside `1..=6` are clamped into range.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: Vec<u8>,
    next: usize,
}

impl LoadedDice {
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        LoadedDice {
            faces: faces.into(),
            next: 0,
        }
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        let face = match self.faces.get(self.next) {
            Some(&f) => {
                self.next += 1;
                f
            }
            None => self.faces.last().copied().unwrap_or(1),
        };
        face.clamp(1, DIE_FACES)
    }
}
