use crate::core_modules::color::SortColor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Decides, once per tick, whether a new object enters the belt and what color it is.
pub trait SpawnPolicy {
    fn next_spawn(&mut self) -> Option<SortColor>;
}

impl<F> SpawnPolicy for F
where
    F: FnMut() -> Option<SortColor>,
{
    fn next_spawn(&mut self) -> Option<SortColor> {
        self()
    }
}

/// Never places anything on the belt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSpawn;

impl SpawnPolicy for NeverSpawn {
    fn next_spawn(&mut self) -> Option<SortColor> {
        None
    }
}

/// An independent draw each tick with a fixed probability, color chosen uniformly.
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    probability: f64,
    rng: StdRng,
}

impl RandomSpawner {
    /// `probability` is clamped into [0, 1]; NaN means never spawn.
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, StdRng::from_os_rng())
    }

    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::with_rng(probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(probability: f64, rng: StdRng) -> Self {
        Self {
            probability: if probability.is_nan() {
                0.0
            } else {
                probability.clamp(0.0, 1.0)
            },
            rng,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl SpawnPolicy for RandomSpawner {
    fn next_spawn(&mut self) -> Option<SortColor> {
        if !self.rng.random_bool(self.probability) {
            return None;
        }
        Some(SortColor::ALL[self.rng.random_range(0..SortColor::ALL.len())])
    }
}

/// Replays a fixed list of per-tick decisions, then stops spawning.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawner {
    script: VecDeque<Option<SortColor>>,
}

impl ScriptedSpawner {
    pub fn new(script: impl IntoIterator<Item = Option<SortColor>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpawnPolicy for ScriptedSpawner {
    fn next_spawn(&mut self) -> Option<SortColor> {
        self.script.pop_front().flatten()
    }
}
