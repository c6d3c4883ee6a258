//! Dice Catalog
//!
//! Validation of the dice supplied on the command line. The catalog is built
//! once and is read-only for the rest of the game.

use std::fmt;

use thiserror::Error;

/// Faces per die. The roll combiner relies on this being fixed.
pub const FACES: usize = 6;

/// Largest allowed face value.
pub const MAX_FACE: u8 = 9;

/// Minimum number of dice in a catalog.
pub const MIN_DICE: usize = 3;

/// Dice input validation errors.
///
/// Die numbers are 1-based, matching the order of the arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// Fewer than [`MIN_DICE`] dice.
    #[error("at least {} dice are required, got {count} (example: 1,2,3,4,5,6 2,2,2,5,5,5 6,6,6,1,1,1)", MIN_DICE)]
    TooFewDice {
        /// Number of dice supplied.
        count: usize,
    },

    /// A die does not have exactly [`FACES`] faces.
    #[error("die {die} must have exactly {} faces, got {count}", FACES)]
    WrongFaceCount {
        /// Die number.
        die: usize,
        /// Faces supplied.
        count: usize,
    },

    /// A face is not an integer in `[0, MAX_FACE]`.
    #[error("die {die} has invalid face {face:?}: only integers from 0 to {} are allowed", MAX_FACE)]
    InvalidFace {
        /// Die number.
        die: usize,
        /// Offending text.
        face: String,
    },
}

/// A six-sided die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Die([u8; FACES]);

impl Die {
    /// Create from face values. Returns None if any face exceeds [`MAX_FACE`].
    pub fn from_faces(faces: [u8; FACES]) -> Option<Self> {
        faces.iter().all(|&f| f <= MAX_FACE).then_some(Self(faces))
    }

    /// Parse a comma-separated face list such as `2,2,4,4,9,9`.
    ///
    /// `number` is the 1-based die number used in error messages.
    /// Empty items between commas are ignored.
    pub fn parse(number: usize, text: &str) -> Result<Self, DiceError> {
        let parts: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != FACES {
            return Err(DiceError::WrongFaceCount {
                die: number,
                count: parts.len(),
            });
        }

        let mut faces = [0u8; FACES];
        for (slot, part) in faces.iter_mut().zip(&parts) {
            *slot = parse_face(part).ok_or_else(|| DiceError::InvalidFace {
                die: number,
                face: part.to_string(),
            })?;
        }

        Ok(Self(faces))
    }

    /// All face values.
    pub fn faces(&self) -> &[u8; FACES] {
        &self.0
    }

    /// Face at `index`. Panics if `index >= FACES`.
    #[inline]
    pub fn face(&self, index: usize) -> u8 {
        self.0[index]
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(u8::to_string).collect();
        write!(f, "[{}]", faces.join(","))
    }
}

fn parse_face(text: &str) -> Option<u8> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u8>().ok().filter(|&f| f <= MAX_FACE)
}

/// The validated set of dice in play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceCatalog {
    dice: Vec<Die>,
}

impl DiceCatalog {
    /// Build from already-validated dice.
    pub fn new(dice: Vec<Die>) -> Result<Self, DiceError> {
        if dice.len() < MIN_DICE {
            return Err(DiceError::TooFewDice { count: dice.len() });
        }
        Ok(Self { dice })
    }

    /// Parse one die per argument.
    ///
    /// Every die is checked before the count, so a lone malformed die
    /// reports its face problem.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, DiceError> {
        let dice = args
            .iter()
            .enumerate()
            .map(|(i, arg)| Die::parse(i + 1, arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    /// Number of dice.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Always false for a valid catalog.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Die at `index`.
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Iterate dice in order.
    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Indices of the dice other than `forbidden`.
    pub fn available(&self, forbidden: Option<usize>) -> Vec<usize> {
        (0..self.dice.len())
            .filter(|&i| Some(i) != forbidden)
            .collect()
    }
}
