//! Selection state for a point-and-click front end.
//!
//! The front end maps pixels to a hand index or a slot and feeds them here.
//! Selecting a hand card and then a slot plays the card; selecting a slot
//! and then another slot declares an attack.

use crate::core::{PlayerId, SlotRef};
use crate::error::PlayError;

use super::board::Board;

/// What is currently selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    HandCard { player: PlayerId, index: usize },
    Slot(SlotRef),
}

/// Result of a slot click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing was selected; the slot is now.
    Selected(SlotRef),
    CardPlayed { player: PlayerId, slot: usize },
    PlayRejected(PlayError),
    AttackDeclared { attacker: SlotRef, target: SlotRef },
    AttackRejected(PlayError),
    /// The game is over.
    Ignored,
}

/// Click-driven selection state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    selection: Option<Selection>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Select a card in `player`'s hand. Returns whether it was selected.
    ///
    /// Only the current player's existing cards can be selected, and nothing
    /// can once the game is over.
    pub fn select_hand_card(&mut self, board: &Board, player: PlayerId, index: usize) -> bool {
        if board.is_game_over() || player != board.current_player() {
            return false;
        }
        if board.state().player(player).hand.get(index).is_none() {
            return false;
        }
        self.selection = Some(Selection::HandCard { player, index });
        true
    }

    /// Handle a click on the slot `at`.
    ///
    /// A selected hand card is played by its owner into `at.slot`
    /// (whichever side was clicked), provided it is still the owner's turn. A selected slot attacks `at`.
    /// Either way the selection is cleared. With nothing selected, `at`
    /// becomes the selection.
    pub fn click_slot(&mut self, board: &mut Board, at: SlotRef) -> ClickOutcome {
        if board.is_game_over() {
            return ClickOutcome::Ignored;
        }

        match self.selection.take() {
            Some(Selection::HandCard { player, index }) => {
                // Stale selection from an earlier turn
                if player != board.current_player() {
                    return ClickOutcome::PlayRejected(PlayError::NotYourTurn);
                }
                match board.play_from_hand(player, index, at.slot) {
                    Ok(()) => ClickOutcome::CardPlayed { player, slot: at.slot },
                    Err(err) => ClickOutcome::PlayRejected(err),
                }
            }
            Some(Selection::Slot(attacker)) => match board.declare_attack(attacker, at) {
                Ok(()) => ClickOutcome::AttackDeclared { attacker, target: at },
                Err(err) => ClickOutcome::AttackRejected(err),
            },
            None => {
                self.selection = Some(Selection::Slot(at));
                ClickOutcome::Selected(at)
            }
        }
    }
}
