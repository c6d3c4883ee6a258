//! # Fair Dice
//!
//! Provably-fair non-transitive dice game between a console user and an
//! automated opponent.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FAIR DICE                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Protocol primitives                       │
//! │  ├── hash.rs     - HMAC-SHA3-256 keyed digests               │
//! │  └── rng.rs      - CSPRNG entropy sources                    │
//! │                                                              │
//! │  proof/          - Commit-reveal                             │
//! │  ├── commitment.rs - Commit, reveal, verify                  │
//! │  └── transcript.rs - Per-game record, end-of-game audit      │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── dice.rs     - Dice validation                           │
//! │  ├── probability.rs - Win probability matrix                 │
//! │  ├── coin.rs     - Fair coin toss                            │
//! │  ├── roll.rs     - Roll combiner                             │
//! │  ├── opponent.rs - Automated opponent                        │
//! │  ├── state.rs    - Turn and result state                     │
//! │  └── session.rs  - Game state machine                        │
//! │                                                              │
//! │  console/        - Interactive I/O                           │
//! │  ├── input.rs    - Prompt parsing                            │
//! │  └── render.rs   - Tables and menus                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! Every value the opponent contributes is drawn from the OS CSPRNG and
//! committed with `HMAC-SHA3-256(secret, value)` before the user answers.
//! Each reveal is checked against the published digest; a mismatch aborts
//! the game. Rolls are `(secret + open) mod 6`, uniform as long as either
//! side is uniform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod console;
pub mod core;
pub mod game;
pub mod proof;

// Re-export commonly used types
pub use crate::core::rng::{EntropySource, OsEntropy};
pub use game::dice::{DiceCatalog, Die};
pub use game::session::{GameConfig, GameError, GameSession};
pub use game::state::{GameResult, Outcome, Party};
pub use proof::commitment::{Commitment, Reveal};
pub use proof::transcript::GameTranscript;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
