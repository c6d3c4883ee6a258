//! Automated Opponent
//!
//! The opponent is the committing party of every protocol step: it draws
//! hidden values, commits to them and later reveals them. The session only
//! ever sees the published digest until the reveal, and checks every reveal
//! against that digest, so a dishonest implementation is caught rather than
//! trusted.

use crate::core::rng::EntropySource;
use crate::proof::commitment::{Commitment, Reveal, DEFAULT_SECRET_LEN};

/// The committing side of the protocol.
pub trait Opponent {
    /// Draw a hidden value uniformly from `[0, bound)`.
    fn draw(&mut self, bound: u32) -> u32;

    /// Commit to `value` with a fresh secret.
    fn commit(&mut self, value: u32) -> Commitment;

    /// Disclose a commitment made earlier.
    fn reveal(&mut self, commitment: Commitment) -> Reveal {
        commitment.reveal()
    }
}

/// An opponent that draws from a CSPRNG and reveals truthfully.
///
/// Die choices are uniform over the permitted dice; it never looks at the
/// probability matrix.
#[derive(Debug)]
pub struct HonestOpponent<E> {
    entropy: E,
    secret_len: usize,
}

impl<E: EntropySource> HonestOpponent<E> {
    /// Create with the default secret length.
    pub fn new(entropy: E) -> Self {
        Self::with_secret_len(entropy, DEFAULT_SECRET_LEN)
    }

    /// Create with a specific secret length (floored at the protocol minimum).
    pub fn with_secret_len(entropy: E, secret_len: usize) -> Self {
        Self { entropy, secret_len }
    }

    /// Borrow the entropy source.
    pub fn entropy(&self) -> &E {
        &self.entropy
    }
}

impl<E: EntropySource> Opponent for HonestOpponent<E> {
    fn draw(&mut self, bound: u32) -> u32 {
        self.entropy.below(bound)
    }

    fn commit(&mut self, value: u32) -> Commitment {
        Commitment::commit(&mut self.entropy, value, self.secret_len)
    }
}

impl<O: Opponent + ?Sized> Opponent for &mut O {
    fn draw(&mut self, bound: u32) -> u32 {
        (**self).draw(bound)
    }

    fn commit(&mut self, value: u32) -> Commitment {
        (**self).commit(value)
    }

    fn reveal(&mut self, commitment: Commitment) -> Reveal {
        (**self).reveal(commitment)
    }
}
