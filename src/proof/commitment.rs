//! Commit-Reveal Protocol
//!
//! A party commits to a value by publishing `HMAC-SHA3-256(secret, value)`.
//! Later it discloses the secret and the value, and the observer recomputes
//! the digest and compares it against the one published earlier.
//!
//! A commitment is write-once: it is consumed by [`Commitment::reveal`], so
//! the same secret is never used for two different values.

use std::fmt;

use thiserror::Error;

use crate::core::hash::{value_digest, Digest};
use crate::core::rng::EntropySource;

/// Minimum secret length in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Maximum secret length in bytes.
pub const MAX_SECRET_LEN: usize = 1024;

/// Secret length used unless configured otherwise.
pub const DEFAULT_SECRET_LEN: usize = 32;

/// A hidden value bound to a published digest.
///
/// Only the digest may be shown before the reveal.
#[derive(Clone)]
pub struct Commitment {
    secret: Vec<u8>,
    value: u32,
    digest: Digest,
}

impl Commitment {
    /// Commit to `value` with a fresh random secret of `secret_len` bytes,
    /// clamped to [`MIN_SECRET_LEN`]..=[`MAX_SECRET_LEN`].
    pub fn commit<E: EntropySource + ?Sized>(rng: &mut E, value: u32, secret_len: usize) -> Self {
        let secret = rng.secret(secret_len.clamp(MIN_SECRET_LEN, MAX_SECRET_LEN));
        Self::from_parts(secret, value)
    }

    /// Build a commitment from an existing secret.
    pub fn from_parts(secret: Vec<u8>, value: u32) -> Self {
        let digest = value_digest(&secret, value);
        Self { secret, value, digest }
    }

    /// The digest to publish.
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// The committed value. Callers must not show it before revealing.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The secret key. Callers must not show it before revealing.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Disclose the secret and value.
    pub fn reveal(self) -> Reveal {
        Reveal::disclose(self.secret, self.value)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret and value stay hidden until revealed.
        f.debug_struct("Commitment")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Disclosure of a prior commitment, with the digest recomputed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    secret: Vec<u8>,
    value: u32,
    recomputed: Digest,
}

impl Reveal {
    /// Disclose `secret` and `value`, recomputing their digest.
    pub fn disclose(secret: Vec<u8>, value: u32) -> Self {
        let recomputed = value_digest(&secret, value);
        Self { secret, value, recomputed }
    }

    /// Disclosed secret.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Disclosed secret as hex.
    pub fn secret_hex(&self) -> String {
        hex::encode(&self.secret)
    }

    /// Disclosed value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Digest recomputed from the disclosure.
    pub fn recomputed(&self) -> Digest {
        self.recomputed
    }

    /// Whether the disclosure matches the digest published earlier.
    pub fn is_valid_for(&self, published: &Digest) -> bool {
        self.recomputed == *published
    }

    /// Check against the published digest and return the value.
    pub fn verify(&self, published: &Digest) -> Result<u32, CommitmentError> {
        if !self.is_valid_for(published) {
            return Err(CommitmentError::DigestMismatch {
                published: *published,
                recomputed: self.recomputed,
            });
        }
        Ok(self.value)
    }

    /// Like [`Reveal::verify`], and also require the value to lie in `[0, bound)`.
    pub fn verify_below(&self, published: &Digest, bound: u32) -> Result<u32, CommitmentError> {
        let value = self.verify(published)?;
        if value >= bound {
            return Err(CommitmentError::OutOfRange { value, bound });
        }
        Ok(value)
    }
}

/// Protocol integrity violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitmentError {
    /// Recomputed digest differs from the published one.
    #[error("integrity violation: published digest {published} does not match recomputed digest {recomputed}")]
    DigestMismatch {
        /// Digest published at commit time.
        published: Digest,
        /// Digest recomputed from the reveal.
        recomputed: Digest,
    },

    /// Revealed value lies outside the committed domain.
    #[error("integrity violation: revealed value {value} is outside [0, {bound})")]
    OutOfRange {
        /// Revealed value.
        value: u32,
        /// Exclusive upper bound.
        bound: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{OsEntropy, ScriptedEntropy};
    use proptest::prelude::*;

    #[test]
    fn test_commit_reveal_roundtrip() {
        let commitment = Commitment::commit(&mut OsEntropy, 4, DEFAULT_SECRET_LEN);
        let published = commitment.digest();

        let reveal = commitment.reveal();
        assert!(reveal.is_valid_for(&published));
        assert_eq!(reveal.verify(&published), Ok(4));
        assert_eq!(reveal.secret().len(), DEFAULT_SECRET_LEN);
    }

    #[test]
    fn test_secret_length_floor() {
        let commitment = Commitment::commit(&mut ScriptedEntropy::default(), 1, 4);
        assert_eq!(commitment.secret().len(), MIN_SECRET_LEN);
    }

    #[test]
    fn test_secret_length_ceiling() {
        let commitment = Commitment::commit(&mut ScriptedEntropy::default(), 1, usize::MAX);
        assert_eq!(commitment.secret().len(), MAX_SECRET_LEN);
        assert!(commitment.reveal().secret().len() <= MAX_SECRET_LEN);
    }

    #[test]
    fn test_fresh_secret_per_commitment() {
        let mut rng = OsEntropy;
        let a = Commitment::commit(&mut rng, 1, DEFAULT_SECRET_LEN);
        let b = Commitment::commit(&mut rng, 1, DEFAULT_SECRET_LEN);

        assert_ne!(a.secret(), b.secret());
        // Same value, different secret: digests must not link them.
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_wrong_value_fails() {
        let commitment = Commitment::from_parts(vec![5; 32], 2);
        let published = commitment.digest();

        let forged = Reveal::disclose(commitment.secret().to_vec(), 3);
        assert!(!forged.is_valid_for(&published));
        assert!(matches!(
            forged.verify(&published),
            Err(CommitmentError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_out_of_range_value_fails() {
        let commitment = Commitment::from_parts(vec![5; 32], 4);
        let published = commitment.digest();
        let reveal = commitment.reveal();

        assert_eq!(reveal.verify_below(&published, 6), Ok(4));
        assert_eq!(
            reveal.verify_below(&published, 2),
            Err(CommitmentError::OutOfRange { value: 4, bound: 2 })
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let commitment = Commitment::from_parts(vec![0xab; 32], 9);
        let shown = format!("{:?}", commitment);
        assert!(!shown.contains("abab"));
        assert!(shown.contains(&commitment.digest().to_hex()));
    }

    proptest! {
        #[test]
        fn prop_secret_bit_flip_breaks_binding(
            secret in proptest::collection::vec(any::<u8>(), MIN_SECRET_LEN..64),
            value in 0u32..1000,
            bit in 0usize..(MIN_SECRET_LEN * 8),
        ) {
            let commitment = Commitment::from_parts(secret.clone(), value);
            let published = commitment.digest();
            prop_assert!(commitment.reveal().is_valid_for(&published));

            let mut flipped = secret;
            flipped[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!Reveal::disclose(flipped, value).is_valid_for(&published));
        }

        #[test]
        fn prop_value_bit_flip_breaks_binding(
            secret in proptest::collection::vec(any::<u8>(), MIN_SECRET_LEN..64),
            value in any::<u32>(),
            bit in 0u32..32,
        ) {
            let published = Commitment::from_parts(secret.clone(), value).digest();
            let forged = Reveal::disclose(secret, value ^ (1 << bit));
            prop_assert!(!forged.is_valid_for(&published));
        }
    }
}
