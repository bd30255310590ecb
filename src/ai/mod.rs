//! Turn policies for computer-controlled seats.
//!
//! A policy plays one seat's turn by calling the same board entry points a
//! human would. It must not end the turn; whoever invoked it does that.

mod greedy;

pub use greedy::GreedyPolicy;

use crate::core::PlayerId;
use crate::rules::Board;

/// Plays a seat's turn.
pub trait TurnPolicy: Send + Sync {
    /// Make every play and attack `player` wants this turn.
    fn take_turn(&self, board: &mut Board, player: PlayerId);
}
