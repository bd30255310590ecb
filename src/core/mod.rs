//! Core engine types: seats, state, actions, RNG, configuration.
//!
//! Everything here is plain data. Rules that change it live in
//! `effects`, `stack` and `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, NUM_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use config::BoardConfig;
pub use action::{Action, ActionKind, SlotRef};
pub use state::{DrawOutcome, GameState, Player};
