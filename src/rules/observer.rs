//! Board change notifications.
//!
//! A renderer, recorder or test probe implements `BoardObserver` and
//! registers it with `Board::add_observer`. Every method has a no-op default
//! so observers only override what they care about.

use crate::cards::Card;
use crate::core::{Action, PlayerId};
use crate::effects::EffectOutcome;

/// Receives notifications as the board changes.
pub trait BoardObserver {
    /// `player`'s turn began (after mana regeneration and the draw).
    fn turn_started(&mut self, _player: PlayerId) {}

    /// `card` was played by `player` into (or, for spells, aimed at) `slot`.
    fn card_played(&mut self, _player: PlayerId, _card: &Card, _slot: usize) {}

    /// A queued action started its presentation.
    fn action_started(&mut self, _action: &Action) {}

    /// A queued action finished and was applied.
    fn action_applied(&mut self, _action: &Action, _outcome: &EffectOutcome) {}

    /// The game ended.
    fn game_over(&mut self, _winner: PlayerId) {}
}

/// Everything a board reported, in order. Handy for tests and replays.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    TurnStarted(PlayerId),
    CardPlayed { player: PlayerId, card: Card, slot: usize },
    ActionStarted(Action),
    ActionApplied { action: Action, outcome: EffectOutcome },
    GameOver(PlayerId),
}

/// Observer that appends every notification to a shared log.
///
/// ```
/// use cafe_wars::rules::{Board, EventLog};
/// use cafe_wars::core::BoardConfig;
///
/// let log = EventLog::default();
/// let mut board = Board::new(BoardConfig::default());
/// board.add_observer(Box::new(log.clone()));
/// board.end_turn().unwrap();
/// assert!(!log.events().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<BoardEvent>>>,
}

impl EventLog {
    /// A copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: BoardEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl BoardObserver for EventLog {
    fn turn_started(&mut self, player: PlayerId) {
        self.push(BoardEvent::TurnStarted(player));
    }

    fn card_played(&mut self, player: PlayerId, card: &Card, slot: usize) {
        self.push(BoardEvent::CardPlayed {
            player,
            card: card.clone(),
            slot,
        });
    }

    fn action_started(&mut self, action: &Action) {
        self.push(BoardEvent::ActionStarted(action.clone()));
    }

    fn action_applied(&mut self, action: &Action, outcome: &EffectOutcome) {
        self.push(BoardEvent::ActionApplied {
            action: action.clone(),
            outcome: outcome.clone(),
        });
    }

    fn game_over(&mut self, winner: PlayerId) {
        self.push(BoardEvent::GameOver(winner));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SlotRef;

    struct Silent;
    impl BoardObserver for Silent {}

    #[test]
    fn test_clones_share_one_log() {
        let log = EventLog::default();
        let mut probe = log.clone();

        probe.turn_started(PlayerId::SECOND);
        probe.game_over(PlayerId::FIRST);

        assert_eq!(
            log.events(),
            vec![BoardEvent::TurnStarted(PlayerId::SECOND), BoardEvent::GameOver(PlayerId::FIRST)]
        );
    }

    #[test]
    fn test_records_actions_in_order() {
        let mut log = EventLog::default();
        let attack = Action::attack(SlotRef::new(PlayerId::FIRST, 0), SlotRef::new(PlayerId::SECOND, 2), 3);

        log.action_started(&attack);
        log.card_played(PlayerId::FIRST, &Card::spell("Espresso Shot", "", 1, 2), 1);

        let events = log.events();
        assert_eq!(events[0], BoardEvent::ActionStarted(attack));
        assert!(matches!(&events[1], BoardEvent::CardPlayed { slot: 1, card, .. } if card.name == "Espresso Shot"));

        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_default_methods_are_no_ops() {
        let mut silent = Silent;
        silent.turn_started(PlayerId::FIRST);
        silent.game_over(PlayerId::SECOND);
    }
}
