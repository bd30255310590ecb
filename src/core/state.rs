//! Game state: players and the slot grid.
//!
//! ## Player
//!
//! Health, mana economy, deck and hand of one seat.
//!
//! ## GameState
//!
//! The authoritative table:
//! - Both players
//! - The slot grid (`board_width` slots per seat)
//! - Whose turn it is and whether the game has ended
//!
//! `GameState` is plain data. Turn rules live in `rules::Board`, effect
//! application in `effects::EffectResolver`.

use serde::{Deserialize, Serialize};

use super::action::SlotRef;
use super::config::BoardConfig;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, Creature};
use crate::zones::{Deck, Hand};

/// Result of drawing a card into a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card landed in the hand.
    Drawn,
    /// The hand was full; the card was discarded.
    Discarded(Card),
    /// The deck was empty.
    DeckEmpty,
}

/// One seat's player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub mana_regeneration: i32,
    pub deck: Deck,
    pub hand: Hand,
}

impl Player {
    /// A fresh player with empty deck and hand, using the config's numbers.
    #[must_use]
    pub fn new(name: impl Into<String>, config: &BoardConfig) -> Self {
        Self {
            name: name.into(),
            health: config.max_health,
            max_health: config.max_health,
            mana: config.starting_mana.clamp(0, config.max_mana),
            max_mana: config.max_mana,
            mana_regeneration: config.base_mana_regeneration,
            deck: Deck::new(),
            hand: Hand::with_capacity(config.hand_capacity),
        }
    }

    /// Add this turn's regeneration, keeping mana within `[0, max_mana]`.
    pub fn regenerate_mana(&mut self) {
        self.mana = self.mana.saturating_add(self.mana_regeneration).min(self.max_mana).max(0);
    }

    /// Pay `cost` mana. Returns false (and pays nothing) if short.
    pub fn spend_mana(&mut self, cost: i32) -> bool {
        if cost > self.mana {
            return false;
        }
        self.mana = self.mana.saturating_sub(cost).min(self.max_mana).max(0);
        true
    }

    /// Lose `amount` health, staying within `[0, max_health]`.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount).min(self.max_health).max(0);
    }

    /// Regain `amount` health, staying within `[0, max_health]`.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount).min(self.max_health).max(0);
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Draw one card from the deck into the hand, discarding it if the hand is full.
    pub fn draw_card(&mut self) -> DrawOutcome {
        match self.deck.draw() {
            None => DrawOutcome::DeckEmpty,
            Some(card) => match self.hand.add_card(card) {
                Ok(()) => DrawOutcome::Drawn,
                Err(card) => DrawOutcome::Discarded(card),
            },
        }
    }
}

/// The table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<Player>,

    /// Slot grid, `board_width` entries per seat.
    pub slots: PlayerMap<Vec<Option<Card>>>,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    pub game_ended: bool,

    /// Set together with `game_ended`.
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// An empty table: fresh players, empty decks and hands, empty slots.
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            players: PlayerMap::from_fn(|p| Player::new(config.player_names[p.index()].clone(), config)),
            slots: PlayerMap::from_fn(|_| vec![None; config.board_width]),
            current_player: PlayerId::FIRST,
            game_ended: false,
            winner: None,
        }
    }

    #[must_use]
    pub fn board_width(&self) -> usize {
        self.slots[PlayerId::FIRST].len()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Whether `at` names a slot that exists.
    #[must_use]
    pub fn in_range(&self, at: SlotRef) -> bool {
        at.slot < self.slots[at.player].len()
    }

    /// The card in a slot. `None` for empty or out-of-range slots.
    #[must_use]
    pub fn slot(&self, at: SlotRef) -> Option<&Card> {
        self.slots[at.player].get(at.slot).and_then(Option::as_ref)
    }

    pub fn slot_mut(&mut self, at: SlotRef) -> Option<&mut Card> {
        self.slots[at.player].get_mut(at.slot).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn is_empty_slot(&self, at: SlotRef) -> bool {
        self.in_range(at) && self.slot(at).is_none()
    }

    /// Put a card in a slot, returning whatever was there before.
    ///
    /// Out-of-range slots hand the card straight back.
    pub fn set_slot(&mut self, at: SlotRef, card: Card) -> Option<Card> {
        match self.slots[at.player].get_mut(at.slot) {
            Some(cell) => cell.replace(card),
            None => Some(card),
        }
    }

    /// Empty a slot, returning its card.
    pub fn take_slot(&mut self, at: SlotRef) -> Option<Card> {
        self.slots[at.player].get_mut(at.slot).and_then(Option::take)
    }

    #[must_use]
    pub fn creature(&self, at: SlotRef) -> Option<&Creature> {
        self.slot(at).and_then(Card::as_creature)
    }

    pub fn creature_mut(&mut self, at: SlotRef) -> Option<&mut Creature> {
        self.slot_mut(at).and_then(Card::as_creature_mut)
    }

    /// First empty slot on `player`'s side.
    #[must_use]
    pub fn first_empty_slot(&self, player: PlayerId) -> Option<SlotRef> {
        self.slots[player]
            .iter()
            .position(Option::is_none)
            .map(|slot| SlotRef::new(player, slot))
    }

    /// First slot on `player`'s side holding a creature.
    #[must_use]
    pub fn first_creature_slot(&self, player: PlayerId) -> Option<SlotRef> {
        self.creature_slots(player).next()
    }

    /// Every slot on `player`'s side holding a creature, left to right.
    pub fn creature_slots(&self, player: PlayerId) -> impl Iterator<Item = SlotRef> + '_ {
        self.slots[player]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_ref().and_then(Card::as_creature).is_some())
            .map(move |(slot, _)| SlotRef::new(player, slot))
    }

    /// Every occupied slot on `player`'s side, left to right.
    pub fn occupied_slots(&self, player: PlayerId) -> impl Iterator<Item = (SlotRef, &Card)> + '_ {
        self.slots[player]
            .iter()
            .enumerate()
            .filter_map(move |(slot, cell)| cell.as_ref().map(|c| (SlotRef::new(player, slot), c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BoardConfig {
        BoardConfig::default()
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&config());

        assert_eq!(state.board_width(), 4);
        assert_eq!(state.current_player, PlayerId::FIRST);
        assert!(!state.game_ended);
        assert_eq!(state.player(PlayerId::FIRST).name, "Player 1");
        assert_eq!(state.player(PlayerId::SECOND).health, 20);
        assert_eq!(state.player(PlayerId::SECOND).mana, 1);
    }

    #[test]
    fn test_mana_regeneration_clamps() {
        let mut player = Player::new("p", &config());
        player.mana = 9;
        player.regenerate_mana();
        assert_eq!(player.mana, 10);

        player.mana = 1;
        player.mana_regeneration = -5;
        player.regenerate_mana();
        assert_eq!(player.mana, 0);
    }

    #[test]
    fn test_spend_mana() {
        let mut player = Player::new("p", &config());
        player.mana = 3;

        assert!(!player.spend_mana(4));
        assert_eq!(player.mana, 3);
        assert!(player.spend_mana(3));
        assert_eq!(player.mana, 0);
    }

    #[test]
    fn test_player_health_clamps() {
        let mut player = Player::new("p", &config());
        player.take_damage(25);
        assert_eq!(player.health, 0);
        assert!(player.is_defeated());

        player.heal(50);
        assert_eq!(player.health, 20);
    }

    #[test]
    fn test_draw_outcomes() {
        let mut player = Player::new("p", &config());
        assert_eq!(player.draw_card(), DrawOutcome::DeckEmpty);

        for i in 0..6 {
            player.deck.add_card(Card::spell(format!("s{i}"), "", 1, 1));
        }
        for _ in 0..5 {
            assert_eq!(player.draw_card(), DrawOutcome::Drawn);
        }
        match player.draw_card() {
            DrawOutcome::Discarded(card) => assert_eq!(card.name, "s5"),
            other => panic!("expected discard, got {other:?}"),
        }
        assert_eq!(player.hand.len(), 5);
        assert!(player.deck.is_empty());
    }

    #[test]
    fn test_slot_access() {
        let mut state = GameState::new(&config());
        let at = SlotRef::new(PlayerId::SECOND, 2);

        assert!(state.is_empty_slot(at));
        assert!(state.set_slot(at, Card::creature("Busboy", "", 1, 1, 1)).is_none());
        assert_eq!(state.creature(at).unwrap().attack, 1);
        assert_eq!(state.first_creature_slot(PlayerId::SECOND), Some(at));
        assert_eq!(state.first_empty_slot(PlayerId::SECOND), Some(SlotRef::new(PlayerId::SECOND, 0)));

        let replaced = state.set_slot(at, Card::building("Cash Register", "", 2, 3, 1));
        assert_eq!(replaced.unwrap().name, "Busboy");
        assert!(state.creature(at).is_none());

        assert_eq!(state.take_slot(at).unwrap().name, "Cash Register");
        assert!(state.is_empty_slot(at));
    }

    #[test]
    fn test_out_of_range_slots() {
        let mut state = GameState::new(&config());
        let bad = SlotRef::new(PlayerId::FIRST, 9);

        assert!(!state.in_range(bad));
        assert!(!state.is_empty_slot(bad));
        assert!(state.slot(bad).is_none());
        let back = state.set_slot(bad, Card::spell("x", "", 1, 1));
        assert_eq!(back.unwrap().name, "x");
        assert!(state.take_slot(bad).is_none());
    }

    #[test]
    fn test_full_board_has_no_empty_slot() {
        let mut state = GameState::new(&config());
        for slot in 0..4 {
            state.set_slot(SlotRef::new(PlayerId::FIRST, slot), Card::building("b", "", 1, 1, 0));
        }
        assert_eq!(state.first_empty_slot(PlayerId::FIRST), None);
        assert_eq!(state.first_creature_slot(PlayerId::FIRST), None);
        assert_eq!(state.occupied_slots(PlayerId::FIRST).count(), 4);
    }
}
