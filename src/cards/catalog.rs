//! Card catalog: the fixed cafe roster.
//!
//! `CardCatalog` stores card templates by name, remembers registration
//! order, and hands out fresh copies. `CardCatalog::standard()` is the
//! 20-card set every standard deck is built from.

use rustc_hash::FxHashMap;

use super::card::{Card, CardKind};

/// Registry of card templates, looked up by name.
///
/// ## Example
///
/// ```
/// use cafe_wars::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
/// let manager = catalog.instantiate("Cafe Manager").unwrap();
/// assert_eq!(manager.mana_cost, 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Card>,
    order: Vec<String>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard cafe set: 8 creatures, 6 spells, 6 buildings.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.register(Card::creature("Barista", "A skilled coffee maker", 2, 2, 3));
        catalog.register(Card::creature("Cafe Manager", "Oversees cafe operations", 4, 3, 5));
        catalog.register(Card::creature("Regular Customer", "Loyal cafe patron", 1, 1, 2));
        catalog.register(Card::creature("Food Critic", "Reviews cafe quality", 3, 4, 2));
        catalog.register(Card::creature("Pastry Chef", "Creates delicious treats", 3, 2, 4));
        catalog.register(Card::creature("Waiter", "Serves customers efficiently", 2, 2, 2));
        catalog.register(Card::creature("Busboy", "Cleans tables quickly", 1, 1, 1));
        catalog.register(Card::creature("Dishwasher", "Keeps utensils clean", 2, 1, 3));

        catalog.register(Card::spell("Espresso Shot", "Boosts energy temporarily", 1, 2));
        catalog.register(Card::spell("Coffee Spill", "Creates a mess", 2, 3));
        catalog.register(Card::spell("Free Wifi", "Attracts customers", 3, 4));
        catalog.register(Card::spell("Happy Hour", "Special discount time", 4, 5));
        catalog.register(Card::spell("Special Blend", "Limited edition coffee", 2, 3));
        catalog.register(Card::spell("Health Inspection", "Official cafe review", 3, 4));

        catalog.register(Card::building("Coffee Machine", "Produces various coffees", 3, 4, 1));
        catalog.register(Card::building("Display Case", "Shows off pastries", 2, 3, 1));
        catalog.register(Card::building("Outdoor Seating", "Additional customer space", 4, 5, 2));
        catalog.register(Card::building("Drive-Through", "Quick service option", 5, 5, 2));
        catalog.register(Card::building("WiFi Router", "Provides internet access", 1, 2, 1));
        catalog.register(Card::building("Cash Register", "Processes payments", 2, 3, 1));

        catalog
    }

    /// Register a card template.
    ///
    /// A template with the same name replaces the old one but keeps its
    /// position in the listing order.
    pub fn register(&mut self, card: Card) {
        if !self.cards.contains_key(&card.name) {
            self.order.push(card.name.clone());
        }
        self.cards.insert(card.name.clone(), card);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.get(name)
    }

    /// Fresh copy of a template, ready to go into a deck.
    #[must_use]
    pub fn instantiate(&self, name: &str) -> Option<Card> {
        self.get(name).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|name| self.cards.get(name))
    }

    /// Find templates of one kind, in registration order.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.iter().filter(move |c| c.kind() == kind)
    }

    /// Fresh copies of every template, in registration order.
    #[must_use]
    pub fn instantiate_all(&self) -> Vec<Card> {
        self.iter().cloned().collect()
    }
}
