//! Dice capability injected into each round.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowest face of the die.
pub const MIN_FACE: u8 = 1;
/// Highest face of the die.
pub const MAX_FACE: u8 = 6;

/// Source of die rolls, one per round.
///
/// Implementations return a value in `1..=6`. Any closure `FnMut() -> u8`
/// qualifies, which keeps tests deterministic.
pub trait DiceRoller {
    /// Roll the die once.
    fn roll(&mut self) -> u8;
}

impl<F: FnMut() -> u8> DiceRoller for F {
    fn roll(&mut self) -> u8 {
        self()
    }
}

/// A fair six-sided die backed by an RNG.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// A reproducible die.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A die seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl DiceRoller for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(MIN_FACE..=MAX_FACE)
    }
}

/// Wraps another roller and keeps every value it produced.
#[derive(Debug)]
pub struct RecordingDice<'a, D: ?Sized> {
    inner: &'a mut D,
    rolls: Vec<u8>,
}

impl<'a, D: DiceRoller + ?Sized> RecordingDice<'a, D> {
    /// Start recording rolls from `inner`.
    pub fn new(inner: &'a mut D) -> Self {
        Self {
            inner,
            rolls: Vec::new(),
        }
    }

    /// Stop recording and hand back the rolls.
    #[must_use]
    pub fn into_rolls(self) -> Vec<u8> {
        self.rolls
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for RecordingDice<'_, D> {
    fn roll(&mut self) -> u8 {
        let value = self.inner.roll();
        self.rolls.push(value);
        value
    }
}
