//! Card containers.
//!
//! ## Key Types
//!
//! - `Deck`: ordered draw pile, FIFO draw, seeded shuffle
//! - `Hand`: bounded ordered hand, refuses cards when full

pub mod deck;
pub mod hand;

pub use deck::Deck;
pub use hand::{Hand, DEFAULT_HAND_CAPACITY};
