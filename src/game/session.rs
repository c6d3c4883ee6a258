//! Game Session
//!
//! Drives one game through its phases:
//!
//! ```text
//! CoinToss -> FirstPick -> SecondPick -> FirstRoll -> SecondRoll -> Scored
//! ```
//!
//! Selection and rolling are one procedure each, called with the parties in
//! the order the coin toss decided. Every opponent commitment is published
//! before the user answers and verified before the game moves on; a failed
//! check aborts the game.

use std::io;

use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::console::{
    die_menu, parse_die_choice, parse_index, render_matrix, Command, Console, InputError,
};
use crate::core::hash::Digest;
use crate::game::coin::{CoinToss, COIN_SIDES};
use crate::game::dice::{DiceCatalog, DiceError, FACES};
use crate::game::opponent::Opponent;
use crate::game::probability::ProbabilityMatrix;
use crate::game::roll::PendingRoll;
use crate::game::state::{GamePhase, GameResult, Party, RollOutcome, TurnAssignment};
use crate::proof::commitment::{
    Commitment, CommitmentError, Reveal, DEFAULT_SECRET_LEN, MAX_SECRET_LEN, MIN_SECRET_LEN,
};
use crate::proof::transcript::{GameTranscript, Purpose};

/// Exit code for a finished game or a user quit.
pub const EXIT_OK: i32 = 0;
/// Exit code for malformed dice or arguments.
pub const EXIT_INVALID_INPUT: i32 = 1;
/// Exit code for a failed commitment check.
pub const EXIT_INTEGRITY: i32 = 3;
/// Exit code for console failures.
pub const EXIT_IO: i32 = 4;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Wait for Enter before each reveal.
    pub pause_before_reveal: bool,
    /// Commitment secret length in bytes, within
    /// [`MIN_SECRET_LEN`]..=[`MAX_SECRET_LEN`].
    pub secret_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pause_before_reveal: true,
            secret_len: DEFAULT_SECRET_LEN,
        }
    }
}

impl GameConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            pause_before_reveal: !lookup("FAIR_DICE_NO_PAUSE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            secret_len: lookup("FAIR_DICE_SECRET_BYTES")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .map(|n| n.clamp(MIN_SECRET_LEN, MAX_SECRET_LEN))
                .unwrap_or(defaults.secret_len),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Reasons a game ends without a result.
#[derive(Debug, Error)]
pub enum GameError {
    /// Dice arguments failed validation.
    #[error("invalid dice: {0}")]
    InvalidDice(#[from] DiceError),

    /// A reveal did not match its commitment.
    #[error(transparent)]
    Integrity(#[from] CommitmentError),

    /// The computer revealed a different die from the one it played.
    #[error("integrity violation: computer revealed die {revealed} but played die {played}")]
    ChoiceMismatch {
        /// Die index in the reveal.
        revealed: usize,
        /// Die index used during selection.
        played: usize,
    },

    /// Both parties ended up with the same die.
    #[error("integrity violation: both parties hold die {0}")]
    DuplicateDie(usize),

    /// Console read or write failed.
    #[error("console error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before the game finished.
    #[error("input closed before the game finished")]
    InputClosed,

    /// The user asked to leave.
    #[error("game quit by user")]
    Quit,
}

impl GameError {
    /// Whether this is a failure rather than a user choice.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::Quit)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GameError::Quit => EXIT_OK,
            GameError::InvalidDice(_) => EXIT_INVALID_INPUT,
            GameError::Integrity(_) | GameError::ChoiceMismatch { .. } | GameError::DuplicateDie(_) => {
                EXIT_INTEGRITY
            }
            GameError::Io(_) | GameError::InputClosed => EXIT_IO,
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// An opponent die choice committed but not yet revealed.
struct CommittedChoice {
    commitment: Commitment,
    published: Digest,
    played: usize,
}

/// One game between the console user and an automated opponent.
pub struct GameSession<O, C> {
    game_id: Uuid,
    config: GameConfig,
    catalog: DiceCatalog,
    matrix: ProbabilityMatrix,
    opponent: O,
    console: C,
    phase: GamePhase,
    transcript: GameTranscript,
}

impl<O: Opponent, C: Console> GameSession<O, C> {
    /// Create a session over a validated catalog.
    pub fn new(config: GameConfig, catalog: DiceCatalog, opponent: O, console: C) -> Self {
        let matrix = ProbabilityMatrix::compute(&catalog);
        Self {
            game_id: Uuid::new_v4(),
            config,
            catalog,
            matrix,
            opponent,
            console,
            phase: GamePhase::CoinToss,
            transcript: GameTranscript::new(),
        }
    }

    /// Validate raw dice arguments and create a session.
    ///
    /// Nothing is written to the console if validation fails.
    pub fn from_args<S: AsRef<str>>(
        config: GameConfig,
        args: &[S],
        opponent: O,
        console: C,
    ) -> Result<Self, GameError> {
        let catalog = DiceCatalog::parse(args)?;
        Ok(Self::new(config, catalog, opponent, console))
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Commitments and reveals so far.
    pub fn transcript(&self) -> &GameTranscript {
        &self.transcript
    }

    /// Play the game to the end.
    pub fn play(&mut self) -> Result<GameResult, GameError> {
        info!(
            game_id = %self.game_id,
            dice = self.catalog.len(),
            "game started"
        );

        let first = self.coin_toss()?;
        let turns = self.select_dice(first)?;

        let mut user_roll = None;
        let mut opponent_roll = None;
        for (phase, party) in [GamePhase::FirstRoll, GamePhase::SecondRoll]
            .into_iter()
            .zip(turns.order())
        {
            self.advance(phase);
            let roll = self.roll(party, turns.die_of(party))?;
            match party {
                Party::User => user_roll = Some(roll),
                Party::Opponent => opponent_roll = Some(roll),
            }
        }

        self.advance(GamePhase::Scored);
        let (Some(user), Some(opponent)) = (user_roll, opponent_roll) else {
            unreachable!("turn order always contains both parties");
        };
        let result = GameResult::new(user, opponent);
        self.audit()?;
        self.transcript.finish(result);
        self.announce(&result)?;

        info!(
            game_id = %self.game_id,
            user_face = result.user.face,
            opponent_face = result.opponent.face,
            outcome = ?result.outcome,
            "game finished"
        );
        Ok(result)
    }

    /// Re-verify every commitment of the game before a result is announced.
    fn audit(&mut self) -> Result<(), GameError> {
        if let Err((purpose, err)) = self.transcript.verify() {
            return Err(self.integrity_failure(purpose, err));
        }
        let count = self.transcript.entries.len();
        debug!(commitments = count, "transcript audited");
        self.say(&format!("All {} commitments verified.\n", count))
    }

    fn advance(&mut self, to: GamePhase) {
        debug_assert_eq!(self.phase.next(), Some(to), "phases are strictly sequential");
        debug!(from = ?self.phase, to = ?to, "phase transition");
        self.phase = to;
    }

    // -------------------------------------------------------------------------
    // Coin toss
    // -------------------------------------------------------------------------

    fn coin_toss(&mut self) -> Result<Party, GameError> {
        self.say("=== COIN TOSS ===")?;
        let toss = CoinToss::begin(&mut self.opponent);
        let published = toss.digest();
        debug!(digest = %published, "coin bit committed");
        self.say(&format!("Computer has picked a bit (0 or 1). HMAC: {}", published))?;

        let guess = self.ask("Your guess (0 or 1): ", |line| {
            parse_index(line, COIN_SIDES as usize)
        })? as u8;
        self.pause("Press Enter to reveal the computer's bit...")?;

        let outcome = toss
            .settle(&mut self.opponent, guess)
            .map_err(|e| self.integrity_failure(Purpose::CoinToss, e))?;
        self.transcript.record(Purpose::CoinToss, &published, &outcome.reveal);
        self.show_reveal(&outcome.reveal)?;

        match outcome.first {
            Party::User => self.say("You guessed right. You go first.\n")?,
            Party::Opponent => self.say("Wrong guess. The computer goes first.\n")?,
        }
        Ok(outcome.first)
    }

    // -------------------------------------------------------------------------
    // Dice selection
    // -------------------------------------------------------------------------

    fn select_dice(&mut self, first: Party) -> Result<TurnAssignment, GameError> {
        let mut committed = None;

        self.advance(GamePhase::FirstPick);
        let first_die = self.pick(first, None, &mut committed)?;

        self.advance(GamePhase::SecondPick);
        let second_die = self.pick(first.other(), Some(first_die), &mut committed)?;

        let (user_die, mut opponent_die) = match first {
            Party::User => (first_die, second_die),
            Party::Opponent => (second_die, first_die),
        };

        if let Some(choice) = committed {
            opponent_die = self.reveal_choice(choice)?;
        }

        TurnAssignment::new(first, user_die, opponent_die).ok_or(GameError::DuplicateDie(user_die))
    }

    fn pick(
        &mut self,
        party: Party,
        forbidden: Option<usize>,
        committed: &mut Option<CommittedChoice>,
    ) -> Result<usize, GameError> {
        match party {
            Party::User => self.user_pick(forbidden),
            Party::Opponent => {
                let choice = self.opponent_pick(forbidden)?;
                let played = choice.played;
                *committed = Some(choice);
                Ok(played)
            }
        }
    }

    fn user_pick(&mut self, forbidden: Option<usize>) -> Result<usize, GameError> {
        self.say("Pick your die:")?;
        for line in die_menu(&self.catalog, forbidden) {
            self.say(&line)?;
        }

        let count = self.catalog.len();
        let index = self.ask("Your choice: ", |line| parse_die_choice(line, count, forbidden))?;
        if let Some(die) = self.catalog.get(index) {
            self.say(&format!("You chose die #{} {}", index, die))?;
        }
        Ok(index)
    }

    fn opponent_pick(&mut self, forbidden: Option<usize>) -> Result<CommittedChoice, GameError> {
        let options = self.catalog.available(forbidden);
        let bound = options.len() as u32;
        let drawn = self.opponent.draw(bound);
        let played = *options
            .get(drawn as usize)
            .ok_or(CommitmentError::OutOfRange { value: drawn, bound })?;

        let commitment = self.opponent.commit(played as u32);
        let published = commitment.digest();
        debug!(digest = %published, "die choice committed");
        self.say(&format!("Computer has chosen its die. HMAC: {}", published))?;

        Ok(CommittedChoice {
            commitment,
            published,
            played,
        })
    }

    fn reveal_choice(&mut self, choice: CommittedChoice) -> Result<usize, GameError> {
        self.pause("Press Enter to reveal the computer's die choice...")?;

        let reveal = self.opponent.reveal(choice.commitment);
        let revealed = reveal
            .verify_below(&choice.published, self.catalog.len() as u32)
            .map_err(|e| self.integrity_failure(Purpose::DieChoice, e))? as usize;
        self.transcript.record(Purpose::DieChoice, &choice.published, &reveal);
        self.show_reveal(&reveal)?;

        if revealed != choice.played {
            error!(revealed, played = choice.played, "die choice mismatch");
            return Err(GameError::ChoiceMismatch {
                revealed,
                played: choice.played,
            });
        }

        if let Some(die) = self.catalog.get(revealed) {
            self.say(&format!("Computer plays die #{} {}\n", revealed, die))?;
        }
        Ok(revealed)
    }

    // -------------------------------------------------------------------------
    // Rolls
    // -------------------------------------------------------------------------

    fn roll(&mut self, party: Party, die_index: usize) -> Result<RollOutcome, GameError> {
        let die = *self
            .catalog
            .get(die_index)
            .ok_or(CommitmentError::OutOfRange {
                value: die_index as u32,
                bound: self.catalog.len() as u32,
            })?;

        let title = match party {
            Party::User => "=== YOUR ROLL ===",
            Party::Opponent => "=== COMPUTER'S ROLL ===",
        };
        self.say(title)?;

        let pending = PendingRoll::begin(&mut self.opponent, FACES);
        let published = pending.digest();
        debug!(?party, digest = %published, "roll secret committed");
        self.say(&format!(
            "Computer has picked a secret number in [0, {}]. HMAC: {}",
            FACES - 1,
            published
        ))?;

        let prompt = format!("Add your number (0-{}): ", FACES - 1);
        let open_index = self.ask(&prompt, |line| parse_index(line, FACES))?;
        self.pause("Press Enter to reveal the computer's number...")?;

        let combined = pending
            .settle(&mut self.opponent, open_index)
            .map_err(|e| self.integrity_failure(Purpose::Roll(party), e))?;
        self.transcript.record(Purpose::Roll(party), &published, &combined.reveal);
        self.show_reveal(&combined.reveal)?;

        let face = die.face(combined.index);
        self.say(&format!(
            "Roll index: ({} + {}) mod {} = {}",
            combined.secret_index, combined.open_index, FACES, combined.index
        ))?;
        self.say(&format!("{} rolled {} on die {}\n", party, face, die))?;

        Ok(RollOutcome {
            party,
            die: die_index,
            secret_index: combined.secret_index,
            open_index: combined.open_index,
            index: combined.index,
            face,
        })
    }

    // -------------------------------------------------------------------------
    // Console helpers
    // -------------------------------------------------------------------------

    fn announce(&mut self, result: &GameResult) -> Result<(), GameError> {
        self.say("=== RESULT ===")?;
        self.say(&format!("Your value: {}", result.user.face))?;
        self.say(&format!("Computer value: {}", result.opponent.face))?;
        self.say(&result.outcome.to_string())
    }

    fn show_reveal(&mut self, reveal: &Reveal) -> Result<(), GameError> {
        debug!(value = reveal.value(), secret = %reveal.secret_hex(), "reveal verified");
        self.say(&format!(
            "Computer reveals: value = {}, secret = {}",
            reveal.value(),
            reveal.secret_hex()
        ))?;
        self.say(&format!("Recomputed HMAC: {} (matches)", reveal.recomputed()))
    }

    fn show_matrix(&mut self) -> Result<(), GameError> {
        let table = render_matrix(&self.catalog, &self.matrix);
        self.say(&table)
    }

    fn integrity_failure(&self, purpose: Purpose, err: CommitmentError) -> GameError {
        error!(?purpose, %err, "commitment verification failed");
        GameError::Integrity(err)
    }

    /// Ask until the answer parses. `?` shows the matrix and asks again.
    fn ask<F>(&mut self, prompt: &str, parse: F) -> Result<usize, GameError>
    where
        F: Fn(&str) -> Result<Command<usize>, InputError>,
    {
        loop {
            let line = self.console.read_line(prompt)?.ok_or(GameError::InputClosed)?;
            match parse(&line) {
                Ok(Command::Value(value)) => return Ok(value),
                Ok(Command::ShowMatrix) => self.show_matrix()?,
                Ok(Command::Quit) => {
                    info!(phase = ?self.phase, "user quit");
                    return Err(GameError::Quit);
                }
                Err(e) => {
                    debug!(%e, "input rejected");
                    self.say(&format!("Invalid input: {}", e))?;
                }
            }
        }
    }

    fn pause(&mut self, prompt: &str) -> Result<(), GameError> {
        if self.config.pause_before_reveal {
            self.console.read_line(prompt)?.ok_or(GameError::InputClosed)?;
        }
        Ok(())
    }

    fn say(&mut self, line: &str) -> Result<(), GameError> {
        self.console.write_line(line)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
