//! Bounded hand of cards.
//!
//! Cards are kept in the order they arrived. A full hand refuses new cards
//! and gives them back to the caller, who decides whether to discard.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// Default hand capacity.
pub const DEFAULT_HAND_CAPACITY: usize = 5;

/// A player's hand.
///
/// ## Example
///
/// ```
/// use cafe_wars::cards::Card;
/// use cafe_wars::zones::Hand;
///
/// let mut hand = Hand::with_capacity(1);
/// assert!(hand.add_card(Card::spell("Happy Hour", "Special discount time", 4, 5)).is_ok());
///
/// // Full: the card comes straight back
/// let refused = hand.add_card(Card::spell("Free Wifi", "Attracts customers", 3, 4));
/// assert_eq!(refused.unwrap_err().name, "Free Wifi");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; DEFAULT_HAND_CAPACITY]>,
    capacity: usize,
}

impl Default for Hand {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HAND_CAPACITY)
    }
}

impl Hand {
    /// Create an empty hand with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty hand holding at most `capacity` cards.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cards: SmallVec::new(),
            capacity,
        }
    }

    /// Append a card. Returns it as `Err` when the hand is full.
    pub fn add_card(&mut self, card: Card) -> Result<(), Card> {
        if self.is_full() {
            return Err(card);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Put a card back at `index` (clamped to the end).
    ///
    /// Used to undo a removal, so the hand ends up exactly as before.
    /// Returns the card as `Err` when the hand is full.
    pub fn insert_card(&mut self, index: usize, card: Card) -> Result<(), Card> {
        if self.is_full() {
            return Err(card);
        }
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
        Ok(())
    }

    /// Remove and return the card at `index`. `None` when out of range.
    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        Some(self.cards.remove(index))
    }

    /// Look at the card at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
