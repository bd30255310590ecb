//! Error types for the turn engine and save files

use thiserror::Error;

use crate::cards::Card;

/// Why a play, attack or turn change was refused. The state is untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    #[error("the game is over")]
    GameOver,

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("not enough mana: need {needed}, have {available}")]
    InsufficientMana { needed: i32, available: i32 },

    #[error("slot {0} is occupied")]
    SlotOccupied(usize),

    #[error("slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("no card at hand index {0}")]
    NoCardInHand(usize),

    #[error("no creature in the attacking slot")]
    NoCreature,

    #[error("creature cannot attack this turn")]
    CreatureExhausted,
}

/// A refused `play_card`: the reason plus the card, handed back unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct Rejected {
    pub error: PlayError,
    pub card: Card,
}

impl Rejected {
    #[must_use]
    pub fn new(error: PlayError, card: Card) -> Self {
        Self { error, card }
    }

    /// Split into the reason and the returned card.
    #[must_use]
    pub fn into_parts(self) -> (PlayError, Card) {
        (self.error, self.card)
    }
}

/// Save/load failures. A failed load never touches the board.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown card type code {0}")]
    UnknownCardType(i64),

    #[error("invalid save data: {0}")]
    Invalid(String),

    #[error("cannot encode: {0}")]
    Unencodable(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

pub type PersistResult<T> = std::result::Result<T, PersistError>;
