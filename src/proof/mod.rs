//! Fairness Proofs
//!
//! Commit-reveal primitives and the per-game record built from them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs   - HMAC-SHA3-256 commit / reveal / verify   │
//! │  transcript.rs   - Per-game record, end-of-game audit       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod transcript;

// Re-export key types
pub use commitment::{
    Commitment, CommitmentError, Reveal, DEFAULT_SECRET_LEN, MAX_SECRET_LEN, MIN_SECRET_LEN,
};
pub use transcript::{GameTranscript, Purpose, TranscriptEntry};
