//! Game Transcript
//!
//! In-memory record of every commitment published during a game together
//! with its reveal. The session audits the whole record before it announces
//! a result, so a reveal that slipped past its own check still stops the game.

use crate::core::hash::Digest;
use crate::game::state::{GameResult, Party};
use crate::proof::commitment::{CommitmentError, Reveal};

/// What a commitment was used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purpose {
    /// Opponent's hidden coin bit.
    CoinToss,
    /// Opponent's hidden die index.
    DieChoice,
    /// Opponent's secret roll index for the given party's roll.
    Roll(Party),
}

/// One commitment and its reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// What was committed.
    pub purpose: Purpose,
    /// Digest published before the reveal.
    pub published: Digest,
    /// What the opponent disclosed.
    pub reveal: Reveal,
}

impl TranscriptEntry {
    /// Recompute the digest from the revealed secret and value.
    pub fn verify(&self) -> Result<u32, CommitmentError> {
        self.reveal.verify(&self.published)
    }
}

/// Record of one game.
#[derive(Clone, Debug, Default)]
pub struct GameTranscript {
    /// Commitments in the order they were published.
    pub entries: Vec<TranscriptEntry>,
    /// Final result, if the game was played to the end.
    pub result: Option<GameResult>,
}

impl GameTranscript {
    /// Start an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reveal of the commitment published as `published`.
    pub fn record(&mut self, purpose: Purpose, published: &Digest, reveal: &Reveal) {
        self.entries.push(TranscriptEntry {
            purpose,
            published: *published,
            reveal: reveal.clone(),
        });
    }

    /// Record the final result.
    pub fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
    }

    /// Recompute every recorded digest, failing on the first mismatch.
    pub fn verify(&self) -> Result<(), (Purpose, CommitmentError)> {
        for entry in &self.entries {
            entry.verify().map_err(|e| (entry.purpose, e))?;
        }
        Ok(())
    }
}
