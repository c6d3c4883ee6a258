//! Fair Coin Toss
//!
//! Guess variant: the opponent commits to a random bit, the user guesses it,
//! then the opponent reveals. A correct guess means the user moves first.
//! The guess must be captured before [`CoinToss::settle`] is called.

use crate::core::hash::Digest;
use crate::game::opponent::Opponent;
use crate::game::state::Party;
use crate::proof::commitment::{Commitment, CommitmentError, Reveal};

/// Number of coin sides.
pub const COIN_SIDES: u32 = 2;

/// A coin toss whose bit is committed but not yet revealed.
#[derive(Debug)]
pub struct CoinToss {
    commitment: Commitment,
    published: Digest,
}

/// A settled coin toss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinOutcome {
    /// Opponent's revealed bit.
    pub bit: u8,
    /// User's guess.
    pub guess: u8,
    /// Who moves first.
    pub first: Party,
    /// The verified reveal.
    pub reveal: Reveal,
}

impl CoinToss {
    /// Opponent draws a bit and commits to it.
    pub fn begin<O: Opponent + ?Sized>(opponent: &mut O) -> Self {
        let bit = opponent.draw(COIN_SIDES);
        let commitment = opponent.commit(bit);
        let published = commitment.digest();
        Self { commitment, published }
    }

    /// Digest to publish before the user guesses.
    pub fn digest(&self) -> Digest {
        self.published
    }

    /// Reveal the bit, verify it, and decide the first mover.
    pub fn settle<O: Opponent + ?Sized>(
        self,
        opponent: &mut O,
        guess: u8,
    ) -> Result<CoinOutcome, CommitmentError> {
        let reveal = opponent.reveal(self.commitment);
        let bit = reveal.verify_below(&self.published, COIN_SIDES)? as u8;

        Ok(CoinOutcome {
            bit,
            guess,
            first: first_mover(guess, bit),
            reveal,
        })
    }
}

/// User moves first iff the guess matches the committed bit.
pub fn first_mover(guess: u8, bit: u8) -> Party {
    if guess == bit {
        Party::User
    } else {
        Party::Opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{OsEntropy, ScriptedEntropy};
    use crate::game::opponent::HonestOpponent;

    /// Reveals a flipped bit under the original secret.
    struct FlippingOpponent(HonestOpponent<ScriptedEntropy>);

    impl Opponent for FlippingOpponent {
        fn draw(&mut self, bound: u32) -> u32 {
            self.0.draw(bound)
        }

        fn commit(&mut self, value: u32) -> Commitment {
            self.0.commit(value)
        }

        fn reveal(&mut self, commitment: Commitment) -> Reveal {
            Reveal::disclose(commitment.secret().to_vec(), commitment.value() ^ 1)
        }
    }

    #[test]
    fn test_correct_guess_goes_first() {
        let mut opponent = HonestOpponent::new(ScriptedEntropy::new([1]));
        let toss = CoinToss::begin(&mut opponent);
        let outcome = toss.settle(&mut opponent, 1).unwrap();

        assert_eq!(outcome.bit, 1);
        assert_eq!(outcome.first, Party::User);
    }

    #[test]
    fn test_wrong_guess_goes_second() {
        let mut opponent = HonestOpponent::new(ScriptedEntropy::new([0]));
        let toss = CoinToss::begin(&mut opponent);
        let outcome = toss.settle(&mut opponent, 1).unwrap();

        assert_eq!(outcome.first, Party::Opponent);
    }

    #[test]
    fn test_published_digest_matches_reveal() {
        let mut opponent = HonestOpponent::new(OsEntropy);
        let toss = CoinToss::begin(&mut opponent);
        let published = toss.digest();
        let outcome = toss.settle(&mut opponent, 0).unwrap();

        assert_eq!(outcome.reveal.recomputed(), published);
    }

    #[test]
    fn test_flipped_bit_detected() {
        let mut opponent = FlippingOpponent(HonestOpponent::new(ScriptedEntropy::new([0])));
        let toss = CoinToss::begin(&mut opponent);

        assert!(matches!(
            toss.settle(&mut opponent, 0),
            Err(CommitmentError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_each_guess_wins_for_exactly_one_bit() {
        for guess in 0..2u8 {
            let user_first = (0..2u8)
                .filter(|&bit| first_mover(guess, bit) == Party::User)
                .count();
            assert_eq!(user_first, 1);
        }
    }
}
