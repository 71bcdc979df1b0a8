//! Source of randomness for question generation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses which recipe the next question asks for
pub trait RecipePicker {
    /// Index in `0..len`; `len` is never zero
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Uniform choice backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomPicker<R = ChaCha8Rng> {
    rng: R,
}

impl RandomPicker<ChaCha8Rng> {
    /// Deterministic picker for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RecipePicker for RandomPicker<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    indices: Vec<usize>,
    cursor: usize,
}

impl ScriptedPicker {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }
}

impl RecipePicker for ScriptedPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index % len
    }
}
