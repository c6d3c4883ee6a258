//! Core protocol primitives.
//!
//! Keyed digests and randomness sources. Everything the fairness protocol
//! trusts lives here.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{keyed_digest, value_digest, Digest, DIGEST_LEN};
pub use rng::{EntropySource, OsEntropy};
