//! Seeded randomness. Each transition that draws numbers gets its own
//! `ChaCha8Rng` stream, derived from one master seed the first time the stream
//! is asked for, so replays with the same seed and command order match exactly.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<&'static str, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &'static str) -> &mut ChaCha8Rng {
        let master = &mut self.master;
        self.streams
            .entry(name)
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(master.next_u64()))
    }
}
