//! # cafe-wars
//!
//! Turn engine for the CafeWars card game: two seats, a four-slot board per
//! seat, creatures, spells and buildings, a timed action queue and a greedy
//! AI opponent.
//!
//! ## Design Principles
//!
//! 1. **Rules in one place**: `rules::Board` is the only thing that changes
//!    the game. Illegal requests return an error and leave the state as it was.
//!
//! 2. **Cards are values**: a card moves deck → hand → slot by ownership
//!    transfer. Dropping it is destroying it.
//!
//! 3. **Deferred attacks**: attacks go through `stack::ActionQueue` so a
//!    front end can present them; `Board::update` applies them over time.
//!
//! 4. **Deterministic**: shuffles come from a seeded ChaCha8 RNG, so a seed
//!    reproduces a whole game.
//!
//! ## Modules
//!
//! - `core`: seats, state, actions, RNG, configuration
//! - `cards`: card values and the standard catalog
//! - `zones`: deck and hand
//! - `effects`: applying actions and spells
//! - `stack`: the timed action queue
//! - `rules`: the board, observers, click interaction
//! - `ai`: turn policies
//! - `persist`: text saves, deck files, binary snapshots
//!
//! ## Example
//!
//! ```
//! use cafe_wars::{Board, BoardConfig, PlayerId};
//!
//! let mut board = Board::new(BoardConfig::default().with_ai());
//! board.end_turn().unwrap();
//!
//! // The AI played its turn and handed control back
//! assert_eq!(board.current_player(), PlayerId::FIRST);
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod stack;
pub mod rules;
pub mod ai;
pub mod persist;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, BoardConfig, DrawOutcome, GameRng, GameRngState, GameState, Player, PlayerId,
    PlayerMap, SlotRef, NUM_PLAYERS,
};

pub use crate::cards::{Building, Card, CardBody, CardCatalog, CardKind, Creature, Spell};

pub use crate::zones::{Deck, Hand};

pub use crate::effects::{EffectOutcome, EffectResolver};

pub use crate::stack::{ActionQueue, InFlight, QueueStatus};

pub use crate::rules::{Board, BoardEvent, BoardObserver, ClickOutcome, EventLog, Interaction, Selection};

pub use crate::ai::{GreedyPolicy, TurnPolicy};

pub use crate::error::{PersistError, PlayError, Rejected};
