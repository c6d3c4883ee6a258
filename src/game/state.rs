//! Game State Definitions
//!
//! The explicit state threaded through a session: who moves first, which
//! die each party holds, the rolls, and the final result.

use std::fmt;

// =============================================================================
// PARTIES
// =============================================================================

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Party {
    /// The interactive player at the console.
    User,
    /// The automated opponent.
    Opponent,
}

impl Party {
    /// The other party.
    pub fn other(self) -> Party {
        match self {
            Party::User => Party::Opponent,
            Party::Opponent => Party::User,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::User => f.write_str("You"),
            Party::Opponent => f.write_str("Computer"),
        }
    }
}

// =============================================================================
// PHASES
// =============================================================================

/// Session phases, visited strictly in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GamePhase {
    /// Deciding who goes first.
    CoinToss,
    /// First mover picks a die.
    FirstPick,
    /// Second mover picks a different die.
    SecondPick,
    /// First mover's roll.
    FirstRoll,
    /// Second mover's roll.
    SecondRoll,
    /// Faces compared, game over.
    Scored,
}

impl GamePhase {
    /// The following phase, or None after `Scored`.
    pub fn next(self) -> Option<GamePhase> {
        match self {
            GamePhase::CoinToss => Some(GamePhase::FirstPick),
            GamePhase::FirstPick => Some(GamePhase::SecondPick),
            GamePhase::SecondPick => Some(GamePhase::FirstRoll),
            GamePhase::FirstRoll => Some(GamePhase::SecondRoll),
            GamePhase::SecondRoll => Some(GamePhase::Scored),
            GamePhase::Scored => None,
        }
    }
}

// =============================================================================
// TURN ASSIGNMENT
// =============================================================================

/// Turn order and die ownership. The two dice are always different.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnAssignment {
    first: Party,
    user_die: usize,
    opponent_die: usize,
}

impl TurnAssignment {
    /// Returns None if both parties would hold the same die.
    pub fn new(first: Party, user_die: usize, opponent_die: usize) -> Option<Self> {
        (user_die != opponent_die).then_some(Self {
            first,
            user_die,
            opponent_die,
        })
    }

    /// Parties in turn order.
    pub fn order(&self) -> [Party; 2] {
        [self.first, self.first.other()]
    }

    /// Die index held by `party`.
    pub fn die_of(&self, party: Party) -> usize {
        match party {
            Party::User => self.user_die,
            Party::Opponent => self.opponent_die,
        }
    }
}

// =============================================================================
// ROLLS AND RESULT
// =============================================================================

/// A completed roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    /// Who rolled.
    pub party: Party,
    /// Index of the die rolled.
    pub die: usize,
    /// Opponent's committed secret index.
    pub secret_index: usize,
    /// User's openly chosen index.
    pub open_index: usize,
    /// `(secret_index + open_index) mod FACES`.
    pub index: usize,
    /// Face value at `index`.
    pub face: u8,
}

/// Who won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// User's face is higher.
    UserWins,
    /// Opponent's face is higher.
    OpponentWins,
    /// Equal faces.
    Tie,
}

impl Outcome {
    /// Compare the two final faces.
    pub fn from_faces(user_face: u8, opponent_face: u8) -> Self {
        match user_face.cmp(&opponent_face) {
            std::cmp::Ordering::Greater => Outcome::UserWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UserWins => f.write_str("You win!"),
            Outcome::OpponentWins => f.write_str("Computer wins!"),
            Outcome::Tie => f.write_str("It's a tie!"),
        }
    }
}

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// User's roll.
    pub user: RollOutcome,
    /// Opponent's roll.
    pub opponent: RollOutcome,
    /// Derived outcome.
    pub outcome: Outcome,
}

impl GameResult {
    /// Build from both rolls.
    pub fn new(user: RollOutcome, opponent: RollOutcome) -> Self {
        Self {
            user,
            opponent,
            outcome: Outcome::from_faces(user.face, opponent.face),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sequence() {
        let mut phase = GamePhase::CoinToss;
        let mut visited = vec![phase];
        while let Some(next) = phase.next() {
            assert!(next > phase);
            visited.push(next);
            phase = next;
        }
        assert_eq!(visited.len(), 6);
        assert_eq!(phase, GamePhase::Scored);
    }

    #[test]
    fn test_turn_assignment_rejects_same_die() {
        assert!(TurnAssignment::new(Party::User, 1, 1).is_none());

        let turns = TurnAssignment::new(Party::Opponent, 0, 2).unwrap();
        assert_eq!(turns.order(), [Party::Opponent, Party::User]);
        assert_eq!(turns.die_of(Party::User), 0);
        assert_eq!(turns.die_of(Party::Opponent), 2);
    }

    #[test]
    fn test_outcome_from_faces() {
        assert_eq!(Outcome::from_faces(5, 3), Outcome::UserWins);
        assert_eq!(Outcome::from_faces(3, 5), Outcome::OpponentWins);
        assert_eq!(Outcome::from_faces(4, 4), Outcome::Tie);
    }

    #[test]
    fn test_party_other() {
        assert_eq!(Party::User.other(), Party::Opponent);
        assert_eq!(Party::Opponent.other().other(), Party::Opponent);
    }
}
