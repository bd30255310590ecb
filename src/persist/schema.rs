//! Codec-independent save data.
//!
//! Every codec decodes into a `SaveFile`, which is validated against the
//! board config before it becomes a `GameState`. Nothing reaches the live
//! board until the whole file has been checked.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardBody};
use crate::core::{BoardConfig, GameState, Player, PlayerId, PlayerMap, NUM_PLAYERS};
use crate::error::{PersistError, PersistResult};
use crate::zones::{Deck, Hand};

/// One seat as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub mana_regeneration: i32,
    pub hand: Vec<Card>,
    /// One entry per board slot.
    pub slots: Vec<Option<Card>>,
    /// Draw order, top first.
    pub deck: Vec<Card>,
}

/// A whole game as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Raw seat index; validated on conversion.
    pub current_player: usize,
    pub players: Vec<PlayerRecord>,
}

impl SaveFile {
    /// Capture a game state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let players = state
            .players
            .iter()
            .map(|(seat, player)| PlayerRecord {
                name: player.name.clone(),
                health: player.health,
                max_health: player.max_health,
                mana: player.mana,
                max_mana: player.max_mana,
                mana_regeneration: player.mana_regeneration,
                hand: player.hand.iter().cloned().collect(),
                slots: state.slots[seat].clone(),
                deck: player.deck.iter().cloned().collect(),
            })
            .collect();

        Self {
            current_player: state.current_player.index(),
            players,
        }
    }

    /// Check the file describes a legal table for `config`.
    pub fn validate(&self, config: &BoardConfig) -> PersistResult<()> {
        if PlayerId::from_index(self.current_player).is_none() {
            return Err(invalid(format!("current player index {} out of range", self.current_player)));
        }
        if self.players.len() != NUM_PLAYERS {
            return Err(invalid(format!("expected {NUM_PLAYERS} players, found {}", self.players.len())));
        }
        for (index, record) in self.players.iter().enumerate() {
            validate_player(index, record, config)?;
        }
        Ok(())
    }

    /// Validate, then build the game state. The game is never marked ended.
    pub fn into_state(self, config: &BoardConfig) -> PersistResult<GameState> {
        self.validate(config)?;

        let current_player = PlayerId::from_index(self.current_player)
            .ok_or_else(|| invalid(format!("current player index {} out of range", self.current_player)))?;
        let [first, second]: [PlayerRecord; NUM_PLAYERS] = self
            .players
            .try_into()
            .map_err(|_| invalid(format!("expected {NUM_PLAYERS} players")))?;

        let (first, first_slots) = into_player(first, config)?;
        let (second, second_slots) = into_player(second, config)?;

        Ok(GameState {
            players: PlayerMap::pair(first, second),
            slots: PlayerMap::pair(first_slots, second_slots),
            current_player,
            game_ended: false,
            winner: None,
        })
    }
}

/// Largest magnitude accepted for any stat in a loaded game.
pub const MAX_STAT: i32 = 9_999;

fn invalid(message: String) -> PersistError {
    PersistError::Invalid(message)
}

fn within(value: i32, low: i32) -> bool {
    (low..=MAX_STAT).contains(&value)
}

fn validate_player(index: usize, record: &PlayerRecord, config: &BoardConfig) -> PersistResult<()> {
    let who = format!("player {index}");
    if !within(record.max_health, 1) || !(0..=record.max_health).contains(&record.health) {
        return Err(invalid(format!(
            "{who}: health {}/{} out of range",
            record.health, record.max_health
        )));
    }
    if !within(record.max_mana, 0) || !(0..=record.max_mana).contains(&record.mana) {
        return Err(invalid(format!("{who}: mana {}/{} out of range", record.mana, record.max_mana)));
    }
    if !within(record.mana_regeneration, -MAX_STAT) {
        return Err(invalid(format!(
            "{who}: mana regeneration {} out of range",
            record.mana_regeneration
        )));
    }
    if record.hand.len() > config.hand_capacity {
        return Err(invalid(format!(
            "{who}: {} cards in hand, capacity is {}",
            record.hand.len(),
            config.hand_capacity
        )));
    }
    if record.slots.len() != config.board_width {
        return Err(invalid(format!(
            "{who}: {} slots, board width is {}",
            record.slots.len(),
            config.board_width
        )));
    }

    for card in record.hand.iter().chain(record.deck.iter()) {
        validate_card(&who, card)?;
    }
    for (slot, card) in record.slots.iter().enumerate() {
        let Some(card) = card else { continue };
        if !card.kind().occupies_slot() {
            return Err(invalid(format!("{who}: spell {} on the board at slot {slot}", card.name)));
        }
        validate_card(&who, card)?;
    }
    Ok(())
}

fn validate_card(who: &str, card: &Card) -> PersistResult<()> {
    if !within(card.mana_cost, 0) {
        return Err(invalid(format!("{who}: {} costs {} mana", card.name, card.mana_cost)));
    }
    let sane = match &card.body {
        CardBody::Creature(c) => {
            within(c.attack, 0) && within(c.max_health, 0) && (0..=c.max_health).contains(&c.health)
        }
        CardBody::Spell(s) => within(s.effect_value, -MAX_STAT),
        CardBody::Building(b) => within(b.durability, 0) && within(b.boost, -MAX_STAT),
    };
    if !sane {
        return Err(invalid(format!("{who}: {card} has impossible stats")));
    }
    Ok(())
}

fn into_player(record: PlayerRecord, config: &BoardConfig) -> PersistResult<(Player, Vec<Option<Card>>)> {
    let mut hand = Hand::with_capacity(config.hand_capacity);
    for card in record.hand {
        hand.add_card(card)
            .map_err(|card| invalid(format!("hand overflow at {}", card.name)))?;
    }

    let player = Player {
        name: record.name,
        health: record.health,
        max_health: record.max_health,
        mana: record.mana,
        max_mana: record.max_mana,
        mana_regeneration: record.mana_regeneration,
        deck: Deck::from_cards(record.deck),
        hand,
    };
    Ok((player, record.slots))
}
