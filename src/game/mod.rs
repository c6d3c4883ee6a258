//! Game Logic Module
//!
//! ## Module Structure
//!
//! - `dice`: Die and catalog validation
//! - `probability`: Head-to-head win probabilities, non-transitive cycles
//! - `coin`: Fair coin toss deciding the first mover
//! - `roll`: Two-party roll combiner
//! - `opponent`: The automated, committing party
//! - `state`: Parties, phases, turn assignment, results
//! - `session`: The state machine driving a full game

pub mod dice;
pub mod probability;
pub mod coin;
pub mod roll;
pub mod opponent;
pub mod state;
pub mod session;

// Re-export key types
pub use dice::{DiceCatalog, DiceError, Die, FACES, MAX_FACE, MIN_DICE};
pub use probability::{Matchup, ProbabilityMatrix};
pub use coin::{CoinOutcome, CoinToss};
pub use roll::{combine, CombinedRoll, PendingRoll};
pub use opponent::{HonestOpponent, Opponent};
pub use state::{GamePhase, GameResult, Outcome, Party, RollOutcome, TurnAssignment};
pub use session::{GameConfig, GameError, GameSession};
