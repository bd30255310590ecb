//! The authoritative board: play legality, turn flow, attacks and game over.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::ai::{GreedyPolicy, TurnPolicy};
use crate::cards::{Card, CardKind};
use crate::core::{Action, BoardConfig, GameRng, GameState, PlayerId, SlotRef};
use crate::effects::{EffectOutcome, EffectResolver};
use crate::error::{PersistResult, PlayError, Rejected};
use crate::persist;
use crate::stack::{ActionQueue, QueueStatus};

use super::observer::BoardObserver;

/// Owns the game state, the action queue and the shuffle RNG.
///
/// All mutation goes through the methods here, which enforce the rules:
/// only the current player acts, cards cost mana, slots hold one card,
/// creatures attack once per turn.
///
/// ## Example
///
/// ```
/// use cafe_wars::core::{BoardConfig, PlayerId};
/// use cafe_wars::rules::Board;
///
/// let mut board = Board::new(BoardConfig::default());
/// assert_eq!(board.current_player(), PlayerId::FIRST);
///
/// // First turn: 1 starting mana + 3 regeneration
/// assert_eq!(board.state().player(PlayerId::FIRST).mana, 4);
///
/// board.end_turn().unwrap();
/// assert_eq!(board.current_player(), PlayerId::SECOND);
/// ```
pub struct Board {
    config: BoardConfig,
    state: GameState,
    queue: ActionQueue,
    rng: GameRng,
    policy: Arc<dyn TurnPolicy>,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Start a new game driven by the greedy AI (if `config.ai_player` is set).
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_policy(config, Arc::new(GreedyPolicy))
    }

    /// Start a new game whose AI seat is driven by `policy`.
    #[must_use]
    pub fn with_policy(config: BoardConfig, policy: Arc<dyn TurnPolicy>) -> Self {
        let mut board = Self {
            state: GameState::new(&config),
            queue: ActionQueue::with_duration(config.action_duration),
            rng: GameRng::new(config.seed),
            config,
            policy,
            observers: Vec::new(),
        };
        board.initialize();
        board
    }

    /// Reset to a fresh game with the same config and start the first turn.
    ///
    /// Decks are rebuilt from the standard set and shuffled with a generator
    /// reseeded from `config.seed`, so every reset deals the same cards.
    pub fn initialize(&mut self) {
        self.state = GameState::new(&self.config);
        self.queue = ActionQueue::with_duration(self.config.action_duration);
        self.rng = GameRng::new(self.config.seed);

        for player in PlayerId::all() {
            let rng = &mut self.rng;
            let seat = self.state.player_mut(player);
            seat.deck.create_standard(rng);
            for _ in 0..self.config.starting_hand_size {
                seat.draw_card();
            }
        }

        info!("new game (seed {})", self.config.seed);
        self.start_turn();
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access, bypassing every rule. For scenario setup and tools.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_ended
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    // === Playing cards ===

    /// Whether `player` may pay for `card` right now.
    ///
    /// Slot availability is not considered; `play_card` checks it.
    #[must_use]
    pub fn can_play_card(&self, card: &Card, player: PlayerId) -> bool {
        self.check_affordable(card, player).is_ok()
    }

    fn check_affordable(&self, card: &Card, player: PlayerId) -> Result<(), PlayError> {
        if self.state.game_ended {
            return Err(PlayError::GameOver);
        }
        if player != self.state.current_player {
            return Err(PlayError::NotYourTurn);
        }
        let available = self.state.player(player).mana;
        if available < card.mana_cost {
            return Err(PlayError::InsufficientMana {
                needed: card.mana_cost,
                available,
            });
        }
        Ok(())
    }

    fn check_play(&self, card: &Card, player: PlayerId, slot: usize) -> Result<(), PlayError> {
        self.check_affordable(card, player)?;
        let at = SlotRef::new(player, slot);
        if !self.state.in_range(at) {
            return Err(PlayError::SlotOutOfRange(slot));
        }
        if card.kind().occupies_slot() && self.state.slot(at).is_some() {
            return Err(PlayError::SlotOccupied(slot));
        }
        Ok(())
    }

    /// Play `card` for `player` into `slot`.
    ///
    /// Creatures and buildings occupy `slot` on the player's own side.
    /// Spells resolve against the opponent's slot with the same index and
    /// are consumed. On refusal the card comes back inside [`Rejected`] and
    /// nothing has changed.
    pub fn play_card(&mut self, mut card: Card, player: PlayerId, slot: usize) -> Result<(), Rejected> {
        if let Err(error) = self.check_play(&card, player, slot) {
            return Err(Rejected::new(error, card));
        }

        self.state.player_mut(player).spend_mana(card.mana_cost);
        debug!("{player} plays {card} at slot {slot}");

        match card.kind() {
            CardKind::Spell => {
                let value = card.as_spell().map_or(0, |spell| spell.effect_value);
                EffectResolver::resolve_spell(&mut self.state, player, slot, value);
                for observer in &mut self.observers {
                    observer.card_played(player, &card, slot);
                }
            }
            CardKind::Creature => {
                if let Some(creature) = card.as_creature_mut() {
                    creature.can_attack = false;
                }
                self.place(card, player, slot);
            }
            CardKind::Building => {
                let boost = card.as_building().map_or(0, |building| building.boost);
                let seat = self.state.player_mut(player);
                seat.mana_regeneration = seat.mana_regeneration.saturating_add(boost);
                self.place(card, player, slot);
            }
        }
        Ok(())
    }

    fn place(&mut self, card: Card, player: PlayerId, slot: usize) {
        for observer in &mut self.observers {
            observer.card_played(player, &card, slot);
        }
        self.state.set_slot(SlotRef::new(player, slot), card);
    }

    /// Play the card at `hand_index` of `player`'s hand into `slot`.
    ///
    /// A refused play puts the card back at the same index.
    pub fn play_from_hand(&mut self, player: PlayerId, hand_index: usize, slot: usize) -> Result<(), PlayError> {
        if self.state.game_ended {
            return Err(PlayError::GameOver);
        }
        if player != self.state.current_player {
            return Err(PlayError::NotYourTurn);
        }
        let card = self
            .state
            .player_mut(player)
            .hand
            .remove_card(hand_index)
            .ok_or(PlayError::NoCardInHand(hand_index))?;

        match self.play_card(card, player, slot) {
            Ok(()) => Ok(()),
            Err(rejected) => {
                let (error, card) = rejected.into_parts();
                if let Err(card) = self.state.player_mut(player).hand.insert_card(hand_index, card) {
                    warn!("hand of {player} refused its own card {}", card.name);
                }
                Err(error)
            }
        }
    }

    // === Turn flow ===

    /// Begin the current player's turn.
    ///
    /// Regenerates mana, draws a card (discarded when the hand is full) and
    /// readies the player's creatures. When the seat is AI-controlled the
    /// policy plays it out and the turn is ended right away.
    pub fn start_turn(&mut self) {
        if self.state.game_ended {
            return;
        }
        let player = self.state.current_player;

        self.state.player_mut(player).regenerate_mana();
        match EffectResolver::draw(&mut self.state, player) {
            EffectOutcome::CardDiscarded { card, .. } => debug!("{player} discards {} (hand full)", card.name),
            EffectOutcome::DeckEmpty { .. } => debug!("{player} has no cards left to draw"),
            _ => {}
        }
        for card in self.state.slots[player].iter_mut().flatten() {
            if let Some(creature) = card.as_creature_mut() {
                creature.can_attack = true;
            }
        }

        let seat = self.state.player(player);
        info!("{} ({player}) starts turn: {} hp, {} mana", seat.name, seat.health, seat.mana);
        for observer in &mut self.observers {
            observer.turn_started(player);
        }

        if self.config.ai_player == Some(player) {
            let policy = Arc::clone(&self.policy);
            policy.take_turn(self, player);
            if let Err(err) = self.end_turn() {
                debug!("AI turn for {player} could not end: {err}");
            }
        }
    }

    /// End the current player's turn and start the opponent's.
    ///
    /// The ending player's buildings lose one durability; crumbled ones leave
    /// the board and take their mana boost with them.
    pub fn end_turn(&mut self) -> Result<(), PlayError> {
        if self.state.game_ended {
            return Err(PlayError::GameOver);
        }
        let player = self.state.current_player;
        self.decay_buildings(player);

        self.state.current_player = player.opponent();
        self.start_turn();
        Ok(())
    }

    fn decay_buildings(&mut self, player: PlayerId) {
        for slot in 0..self.state.board_width() {
            let at = SlotRef::new(player, slot);
            let crumbled = self
                .state
                .slot_mut(at)
                .and_then(Card::as_building_mut)
                .is_some_and(|building| building.decay());
            if !crumbled {
                continue;
            }
            if let Some(card) = self.state.take_slot(at) {
                let boost = card.as_building().map_or(0, |b| b.boost);
                let seat = self.state.player_mut(player);
                seat.mana_regeneration = seat.mana_regeneration.saturating_sub(boost);
                debug!("{} crumbles at {at}", card.name);
            }
        }
    }

    // === Attacks ===

    fn ready_attacker(&self, attacker: SlotRef) -> Result<i32, PlayError> {
        if self.state.game_ended {
            return Err(PlayError::GameOver);
        }
        if attacker.player != self.state.current_player {
            return Err(PlayError::NotYourTurn);
        }
        if !self.state.in_range(attacker) {
            return Err(PlayError::SlotOutOfRange(attacker.slot));
        }
        let creature = self.state.creature(attacker).ok_or(PlayError::NoCreature)?;
        if !creature.can_attack {
            return Err(PlayError::CreatureExhausted);
        }
        Ok(creature.attack)
    }

    fn exhaust(&mut self, attacker: SlotRef) {
        if let Some(creature) = self.state.creature_mut(attacker) {
            creature.can_attack = false;
        }
    }

    /// Queue an attack from the creature at `attacker` on `target`.
    ///
    /// The damage is the attacker's current attack and lands when the queue
    /// applies the action. The attacker is exhausted immediately.
    pub fn declare_attack(&mut self, attacker: SlotRef, target: SlotRef) -> Result<(), PlayError> {
        if !self.state.in_range(target) {
            return Err(PlayError::SlotOutOfRange(target.slot));
        }
        let damage = self.ready_attacker(attacker)?;
        self.exhaust(attacker);
        self.queue.enqueue(Action::attack(attacker, target, damage));
        debug!("{attacker} attacks {target} for {damage}");
        Ok(())
    }

    /// Hit the opponent player with the creature at `attacker`, immediately.
    ///
    /// Returns the damage dealt. Used when the opponent has no creature to
    /// block with.
    pub fn direct_attack(&mut self, attacker: SlotRef) -> Result<i32, PlayError> {
        let damage = self.ready_attacker(attacker)?;
        self.exhaust(attacker);
        let foe = attacker.player.opponent();
        self.state.player_mut(foe).take_damage(damage);
        debug!("{attacker} hits {foe} directly for {damage}");
        Ok(damage)
    }

    // === Tick ===

    /// Advance the action queue by `dt` seconds, then check for a loser.
    pub fn update(&mut self, dt: f32) -> QueueStatus {
        let status = self.queue.advance(dt, &mut self.state);
        match &status {
            QueueStatus::Started(action) => {
                for observer in &mut self.observers {
                    observer.action_started(action);
                }
            }
            QueueStatus::Applied { action, outcome } => {
                for observer in &mut self.observers {
                    observer.action_applied(action, outcome);
                }
            }
            QueueStatus::Idle | QueueStatus::InFlight { .. } => {}
        }
        self.check_game_over();
        status
    }

    fn check_game_over(&mut self) {
        if self.state.game_ended {
            return;
        }
        // Seat order decides simultaneous deaths
        let Some(loser) = PlayerId::all().find(|&p| self.state.player(p).is_defeated()) else {
            return;
        };
        let winner = loser.opponent();
        self.state.game_ended = true;
        self.state.winner = Some(winner);
        info!("game over: {} wins", self.state.player(winner).name);
        for observer in &mut self.observers {
            observer.game_over(winner);
        }
    }

    // === Persistence ===

    /// Write the game in the line-oriented text layout plus one deck file per seat.
    pub fn save_game(&self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        persist::text::save(path, &self.state)?;
        info!("saved game to {}", path.display());
        Ok(())
    }

    /// Replace the game with one saved by [`Board::save_game`].
    ///
    /// The file is parsed and validated completely before anything changes;
    /// on error the board is exactly as it was.
    pub fn load_game(&mut self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        match persist::text::load(path, &self.config) {
            Ok(state) => {
                self.replace_state(state);
                info!("loaded game from {}", path.display());
                Ok(())
            }
            Err(err) => {
                warn!("rejected save {}: {err}", path.display());
                Err(err)
            }
        }
    }

    /// Write a versioned binary snapshot, including the RNG position.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        persist::snapshot::save(path, &self.state, &self.rng)?;
        info!("saved snapshot to {}", path.display());
        Ok(())
    }

    /// Replace the game with a snapshot from [`Board::save_snapshot`].
    ///
    /// Unlike a text save, a snapshot keeps the game-over flag and winner.
    pub fn load_snapshot(&mut self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        match persist::snapshot::load(path, &self.config) {
            Ok((state, rng)) => {
                self.replace_state(state);
                self.rng = rng;
                info!("loaded snapshot from {}", path.display());
                Ok(())
            }
            Err(err) => {
                warn!("rejected snapshot {}: {err}", path.display());
                Err(err)
            }
        }
    }

    /// Swap in a loaded state. Pending actions belonged to the old game.
    fn replace_state(&mut self, state: GameState) {
        self.state = state;
        self.queue.clear();
    }
}
