//! Roll Combiner
//!
//! Two-party generation of an unbiased roll index:
//!
//! 1. The opponent draws a secret index `s` in `[0, n)` and publishes only
//!    its commitment digest.
//! 2. The user, not knowing `s`, chooses an open index `u` in `[0, n)`.
//! 3. The opponent reveals; the digest is checked.
//! 4. The roll index is `(s + u) mod n`.
//!
//! If either contribution is uniform and independent of the other, the sum
//! modulo `n` is uniform, whatever the other side does.

use crate::core::hash::Digest;
use crate::game::opponent::Opponent;
use crate::proof::commitment::{Commitment, CommitmentError, Reveal};

/// Combine a secret and an open contribution into an index in `[0, n)`.
#[inline]
pub fn combine(secret_index: usize, open_index: usize, n: usize) -> usize {
    (secret_index + open_index) % n
}

/// A roll whose secret index is committed but not yet revealed.
#[derive(Debug)]
pub struct PendingRoll {
    commitment: Commitment,
    published: Digest,
    faces: usize,
}

/// A completed, verified roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinedRoll {
    /// Opponent's revealed secret index.
    pub secret_index: usize,
    /// User's open index.
    pub open_index: usize,
    /// Combined index.
    pub index: usize,
    /// The verified reveal.
    pub reveal: Reveal,
}

impl PendingRoll {
    /// Opponent draws and commits to a secret index in `[0, faces)`.
    pub fn begin<O: Opponent + ?Sized>(opponent: &mut O, faces: usize) -> Self {
        let secret = opponent.draw(faces as u32);
        let commitment = opponent.commit(secret);
        let published = commitment.digest();
        Self {
            commitment,
            published,
            faces,
        }
    }

    /// Digest to publish before the user chooses.
    pub fn digest(&self) -> Digest {
        self.published
    }

    /// Reveal the secret index, verify it, and combine with `open_index`.
    pub fn settle<O: Opponent + ?Sized>(
        self,
        opponent: &mut O,
        open_index: usize,
    ) -> Result<CombinedRoll, CommitmentError> {
        debug_assert!(open_index < self.faces, "open index must be validated by the caller");

        let reveal = opponent.reveal(self.commitment);
        let secret_index = reveal.verify_below(&self.published, self.faces as u32)? as usize;

        Ok(CombinedRoll {
            secret_index,
            open_index,
            index: combine(secret_index, open_index, self.faces),
            reveal,
        })
    }
}
