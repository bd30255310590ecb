//! Draw pile.
//!
//! Cards are drawn from the front and appended at the back. Backed by an
//! `im::Vector`, so both ends are cheap and cloning a deck for a snapshot
//! shares structure instead of copying every card.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCatalog};
use crate::core::GameRng;

/// An ordered draw pile.
///
/// ## Example
///
/// ```
/// use cafe_wars::cards::Card;
/// use cafe_wars::zones::Deck;
///
/// let mut deck = Deck::new();
/// deck.add_card(Card::spell("Espresso Shot", "Boosts energy temporarily", 1, 2));
/// deck.add_card(Card::spell("Coffee Spill", "Creates a mess", 2, 3));
///
/// assert_eq!(deck.draw().unwrap().name, "Espresso Shot");
/// assert_eq!(deck.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from cards in draw order.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Append a card at the bottom.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove and return the top card. `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Uniformly permute the whole deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        if self.cards.len() < 2 {
            return;
        }
        let mut cards: Vec<Card> = std::mem::take(&mut self.cards).into_iter().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Replace the contents with the standard 20-card set, shuffled.
    pub fn create_standard(&mut self, rng: &mut GameRng) {
        self.cards = CardCatalog::standard().instantiate_all().into_iter().collect();
        self.shuffle(rng);
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Iterate in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
