//! Seeded random streams.
//!
//! One master generator derives a named stream per consumer, so adding a
//! new caller cannot perturb the draws an existing one sees for the same
//! scenario seed.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Borrow the stream registered under `name`, creating it on first use
    /// with a seed drawn from the master generator.
    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let Self { master, streams } = self;
        let entry = streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(master.next_u64()));
        SystemRng { inner: entry }
    }
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl RngCore for SystemRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
