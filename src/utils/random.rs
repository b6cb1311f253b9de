use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Randomness capability used by exam assembly. Production draws from the
/// thread RNG; tests inject a seeded generator for repeatable selection.
pub trait RandomSource: Send {
    /// Uniform index in `0..upper`. `upper` must be non-zero.
    fn pick_index(&mut self, upper: usize) -> usize;

    fn shuffle_indices(&mut self, items: &mut [usize]);
}

#[derive(Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick_index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }

    fn shuffle_indices(&mut self, items: &mut [usize]) {
        items.shuffle(&mut rand::thread_rng());
    }
}

#[derive(Debug)]
pub struct SeededRandomSource {
    rng: StdRng,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn shuffle_indices(&mut self, items: &mut [usize]) {
        items.shuffle(&mut self.rng);
    }
}
