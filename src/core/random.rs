//! Injected randomness
//!
//! Every roll in the simulation goes through [`RandomSource`] so a game can be
//! replayed from a seed and tests can script exact outcomes.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the two kinds of draws the simulation makes
pub trait RandomSource {
    /// Uniform integer in `0..sides` (`0` when `sides` is 0)
    fn roll(&mut self, sides: u32) -> u32;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// `true` with probability `1 / sides`
    fn one_in(&mut self, sides: u32) -> bool {
        self.roll(sides) == 0
    }
}

/// Production generator: ChaCha8 seeded once per game
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy; the chosen seed is kept so the game can be replayed
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(0..sides)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays queued draws in order
///
/// A queued roll is reduced modulo the requested sides. Once a queue runs
/// dry, rolls return `sides - 1` and units return just under 1.0, which keeps
/// every `one_in`, `roll(n) < k` and `unit() < chance` check from firing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    rolls: VecDeque<u32>,
    units: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self::new().then_rolls(rolls)
    }

    pub fn then_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn then_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    /// Draws still queued as (rolls, units)
    pub fn remaining(&self) -> (usize, usize) {
        (self.rolls.len(), self.units.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        match self.rolls.pop_front() {
            Some(value) => value % sides,
            None => sides - 1,
        }
    }

    fn unit(&mut self) -> f64 {
        self.units
            .pop_front()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .unwrap_or(1.0 - f64::EPSILON)
    }
}
