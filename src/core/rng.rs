//! Randomness Sources
//!
//! Every value the automated opponent hides (coin bit, die choice, roll
//! secret) and every commitment key comes from an [`EntropySource`].
//! The production source is the operating system CSPRNG; tests inject a
//! scripted source so whole games can be replayed deterministically.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// A source of cryptographically secure randomness.
pub trait EntropySource {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);

    /// Draw a uniform integer in `[0, bound)`.
    ///
    /// Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32;

    /// Draw a fresh secret of `len` bytes.
    fn secret(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        self.fill_bytes(&mut bytes);
        bytes
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        (**self).fill_bytes(dest)
    }

    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }
}

/// Operating system CSPRNG (`getrandom` via [`OsRng`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // gen_range rejects out-of-zone samples, so there is no modulo bias.
        OsRng.gen_range(0..bound)
    }
}

/// Scripted entropy for deterministic tests.
///
/// `below` pops the next scripted draw; secrets are filled from a counter so
/// each one differs from the last.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedEntropy {
    draws: std::collections::VecDeque<u32>,
    counter: u8,
}

#[cfg(test)]
impl ScriptedEntropy {
    /// Create a source that yields `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            counter: 0,
        }
    }

    /// Draws not consumed yet.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.counter = self.counter.wrapping_add(1);
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = self.counter.wrapping_mul(31).wrapping_add(i as u8);
        }
    }

    fn below(&mut self, bound: u32) -> u32 {
        let value = self.draws.pop_front().expect("scripted entropy exhausted");
        assert!(value < bound, "scripted draw {} out of range [0, {})", value, bound);
        value
    }
}

// =============================================================================
// TESTS
// =============================================================================
