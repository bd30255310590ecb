//! Board configuration.
//!
//! Every constant the rules depend on lives here so tests and tools can
//! build small or unusual tables without touching the engine.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Board configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Slots per seat on the board.
    pub board_width: usize,

    /// Starting and maximum health of each player.
    pub max_health: i32,

    /// Mana each player holds before their first regeneration.
    pub starting_mana: i32,

    /// Mana cap.
    pub max_mana: i32,

    /// Mana regained at the start of each own turn, before building boosts.
    pub base_mana_regeneration: i32,

    /// Maximum cards in hand. Draws into a full hand are discarded.
    pub hand_capacity: usize,

    /// Cards dealt to each player before the first turn.
    pub starting_hand_size: usize,

    /// Presentation delay of a queued action, in seconds.
    pub action_duration: f32,

    /// Seat driven by the built-in AI policy, if any.
    pub ai_player: Option<PlayerId>,

    /// Seed for deck shuffles. Same seed produces the same decks.
    pub seed: u64,

    /// Display names of both seats.
    pub player_names: [String; 2],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_width: 4,
            max_health: 20,
            starting_mana: 1,
            max_mana: 10,
            base_mana_regeneration: 3,
            hand_capacity: 5,
            starting_hand_size: 5,
            action_duration: 0.5,
            ai_player: None,
            seed: 42,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

impl BoardConfig {
    /// Set the number of slots per seat.
    pub fn with_board_width(mut self, width: usize) -> Self {
        self.board_width = width;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Let the built-in AI drive the second seat.
    pub fn with_ai(mut self) -> Self {
        self.ai_player = Some(PlayerId::SECOND);
        self
    }

    /// Set the AI seat explicitly (`None` for two humans).
    pub fn with_ai_player(mut self, player: Option<PlayerId>) -> Self {
        self.ai_player = player;
        self
    }

    /// Set the starting hand size.
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the action presentation delay.
    pub fn with_action_duration(mut self, seconds: f32) -> Self {
        self.action_duration = seconds;
        self
    }

    /// Set both seat names.
    pub fn with_player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }
}
