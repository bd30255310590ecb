//! Game rules.
//!
//! ## Key Types
//!
//! - `Board`: owns the state and enforces play, turn and attack rules
//! - `BoardObserver`: notifications for renderers and recorders
//! - `Interaction`: click-driven selection on top of a `Board`

mod board;
mod interaction;
mod observer;

pub use board::Board;
pub use interaction::{ClickOutcome, Interaction, Selection};
pub use observer::{BoardEvent, BoardObserver, EventLog};
