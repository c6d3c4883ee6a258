//! Keyed Digests for Commitments
//!
//! Provides the keyed hash that binds a committed value to a secret:
//! - HMAC over SHA3-256 (256-bit output)
//! - Hex encoding for publication
//!
//! The message is always the decimal string form of the committed value,
//! so anyone holding the secret can recompute a digest with stock tools.

use std::fmt;

use hmac::{Hmac, Mac};
use sha3::Sha3_256;

/// HMAC-SHA3-256.
type HmacSha3_256 = Hmac<Sha3_256>;

/// Digest output length in bytes (256 bits).
pub const DIGEST_LEN: usize = 32;

/// A published keyed digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Compute `HMAC-SHA3-256(key, message)`.
pub fn keyed_digest(key: &[u8], message: &[u8]) -> Digest {
    let mut mac = HmacSha3_256::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    mac.update(message);
    Digest(mac.finalize().into_bytes().into())
}

/// Digest of a committed integer under `key`.
///
/// The value is hashed as its decimal string, e.g. `4` hashes the byte `b"4"`.
pub fn value_digest(key: &[u8], value: u32) -> Digest {
    keyed_digest(key, value.to_string().as_bytes())
}

// =============================================================================
// TESTS
// =============================================================================
