//! Turn flow integration tests.
//!
//! Full scenarios through the public `Board` surface: attacks landing via
//! the queue, creature death, building decay, draws into a full hand and
//! the AI seat.

use cafe_wars::core::{BoardConfig, PlayerId, SlotRef};
use cafe_wars::rules::{Board, BoardEvent, EventLog};
use cafe_wars::stack::QueueStatus;
use cafe_wars::{Card, EffectOutcome, PlayError};

const P0: PlayerId = PlayerId::FIRST;
const P1: PlayerId = PlayerId::SECOND;

/// Player 0 to act, both hands and decks empty.
fn blank_board() -> Board {
    let mut board = Board::new(BoardConfig::default());
    for (_, player) in board.state_mut().players.iter_mut() {
        player.hand.clear();
        player.deck.clear();
    }
    board
}

fn ready_creature(board: &mut Board, at: SlotRef, attack: i32, health: i32) {
    board.state_mut().set_slot(at, Card::creature("Test Creature", "", 1, attack, health));
    board.state_mut().creature_mut(at).unwrap().can_attack = true;
}

/// Tick until the queue is idle, returning every applied outcome.
fn drain(board: &mut Board) -> Vec<EffectOutcome> {
    let mut applied = Vec::new();
    for _ in 0..1000 {
        if let QueueStatus::Applied { outcome, .. } = board.update(0.1) {
            applied.push(outcome);
        }
        if board.queue().is_idle() {
            return applied;
        }
    }
    panic!("queue never drained");
}

// =============================================================================
// Attacks
// =============================================================================

/// An attack on an empty slot hits the player once the delay has passed.
#[test]
fn test_attack_on_empty_slot_hits_player() {
    let mut board = blank_board();
    let attacker = SlotRef::new(P0, 0);
    ready_creature(&mut board, attacker, 4, 3);

    board.declare_attack(attacker, SlotRef::new(P1, 1)).unwrap();
    assert_eq!(board.state().player(P1).health, 20);

    let applied = drain(&mut board);

    assert_eq!(applied.len(), 1);
    assert_eq!(board.state().player(P1).health, 16);
    assert!(!board.state().creature(attacker).unwrap().can_attack);
}

/// Lethal damage to a creature removes it; the player is untouched.
#[test]
fn test_creature_death_clears_slot() {
    let mut board = blank_board();
    let attacker = SlotRef::new(P0, 2);
    let defender = SlotRef::new(P1, 2);
    ready_creature(&mut board, attacker, 3, 3);
    board.state_mut().set_slot(defender, Card::creature("Food Critic", "", 3, 4, 2));

    board.declare_attack(attacker, defender).unwrap();
    let applied = drain(&mut board);

    assert!(matches!(applied[0], EffectOutcome::CreatureDestroyed { at, .. } if at == defender));
    assert!(board.state().slot(defender).is_none());
    assert_eq!(board.state().player(P1).health, 20);
}

/// Queued attacks land one at a time, in declaration order.
#[test]
fn test_attacks_resolve_in_order() {
    let mut board = blank_board();
    ready_creature(&mut board, SlotRef::new(P0, 0), 2, 1);
    ready_creature(&mut board, SlotRef::new(P0, 1), 5, 1);
    board.declare_attack(SlotRef::new(P0, 0), SlotRef::new(P1, 0)).unwrap();
    board.declare_attack(SlotRef::new(P0, 1), SlotRef::new(P1, 0)).unwrap();

    let mut in_flight_seen = 0;
    let mut healths = Vec::new();
    for _ in 0..100 {
        match board.update(0.2) {
            QueueStatus::Applied { .. } => healths.push(board.state().player(P1).health),
            QueueStatus::InFlight { .. } => in_flight_seen += 1,
            _ => {}
        }
        if board.queue().is_idle() {
            break;
        }
    }

    assert_eq!(healths, vec![18, 13]);
    assert!(in_flight_seen >= 2);
}

/// Reducing a player to zero ends the game on that tick.
#[test]
fn test_lethal_attack_ends_game() {
    let mut board = blank_board();
    let log = EventLog::default();
    board.add_observer(Box::new(log.clone()));
    board.state_mut().player_mut(P1).health = 3;
    ready_creature(&mut board, SlotRef::new(P0, 0), 4, 4);

    board.declare_attack(SlotRef::new(P0, 0), SlotRef::new(P1, 0)).unwrap();
    drain(&mut board);

    assert!(board.is_game_over());
    assert_eq!(board.winner(), Some(P0));
    assert_eq!(board.state().player(P1).health, 0);
    assert_eq!(log.events().last(), Some(&BoardEvent::GameOver(P0)));

    // Nothing else is accepted
    assert_eq!(board.end_turn(), Err(PlayError::GameOver));
    assert_eq!(
        board.play_from_hand(P0, 0, 0),
        Err(PlayError::GameOver)
    );
}

/// Attacks may target the attacker's own side.
#[test]
fn test_attack_on_own_side() {
    let mut board = blank_board();
    ready_creature(&mut board, SlotRef::new(P0, 0), 2, 2);

    board.declare_attack(SlotRef::new(P0, 0), SlotRef::new(P0, 3)).unwrap();
    drain(&mut board);

    assert_eq!(board.state().player(P0).health, 18);
}

// =============================================================================
// Turn transitions
// =============================================================================

/// A building crumbles at the end of its owner's turn and takes its boost along.
#[test]
fn test_building_decay_removes_boost() {
    let mut board = blank_board();
    board
        .play_card(Card::building("Outdoor Seating", "", 4, 2, 2), P0, 1)
        .unwrap();
    assert_eq!(board.state().player(P0).mana_regeneration, 5);

    // First owner turn end: durability 2 -> 1
    board.end_turn().unwrap();
    assert!(board.state().slot(SlotRef::new(P0, 1)).is_some());
    // Opponent turn end does not decay it
    board.end_turn().unwrap();
    assert_eq!(board.state().slot(SlotRef::new(P0, 1)).unwrap().as_building().unwrap().durability, 1);

    // Second owner turn end: gone
    board.end_turn().unwrap();
    assert!(board.state().slot(SlotRef::new(P0, 1)).is_none());
    assert_eq!(board.state().player(P0).mana_regeneration, 3);
}

/// Drawing into a full hand discards the drawn card.
#[test]
fn test_draw_into_full_hand_discards() {
    let mut board = blank_board();
    for i in 0..5 {
        board
            .state_mut()
            .player_mut(P1)
            .hand
            .add_card(Card::spell(format!("Held {i}"), "", 9, 1))
            .unwrap();
    }
    board.state_mut().player_mut(P1).deck.add_card(Card::spell("Drawn", "", 1, 1));

    board.end_turn().unwrap();

    let seat = board.state().player(P1);
    assert_eq!(seat.hand.len(), 5);
    assert!(seat.deck.is_empty());
    assert!(seat.hand.iter().all(|c| c.name != "Drawn"));
}

/// Drawing from an empty deck is not an error.
#[test]
fn test_draw_from_empty_deck() {
    let mut board = blank_board();
    board.end_turn().unwrap();
    assert!(board.state().player(P1).hand.is_empty());
}

/// Mana never exceeds the cap, and a negative net regeneration bottoms out at zero.
#[test]
fn test_mana_stays_in_bounds() {
    let mut board = blank_board();
    board.state_mut().player_mut(P1).mana_regeneration = -4;

    for _ in 0..12 {
        board.end_turn().unwrap();
        for player in PlayerId::all() {
            let mana = board.state().player(player).mana;
            assert!((0..=10).contains(&mana), "{player} has {mana} mana");
        }
    }
    assert_eq!(board.state().player(P0).mana, 10);
    assert_eq!(board.state().player(P1).mana, 0);
}

/// Extreme regeneration and building boosts saturate instead of overflowing.
#[test]
fn test_extreme_regeneration_saturates() {
    let mut board = blank_board();
    board.state_mut().player_mut(P0).mana_regeneration = i32::MAX;
    board
        .play_card(Card::building("Outdoor Seating", "", 0, 1, i32::MAX), P0, 0)
        .unwrap();
    assert_eq!(board.state().player(P0).mana_regeneration, i32::MAX);

    // The building crumbles and takes its boost back without wrapping
    board.end_turn().unwrap();
    assert_eq!(board.state().player(P0).mana_regeneration, 0);
    board.end_turn().unwrap();
    assert_eq!(board.state().player(P0).mana, 4);
}

/// A creature played this turn cannot attack until its owner's next turn.
#[test]
fn test_summoning_sickness() {
    let mut board = blank_board();
    board.play_card(Card::creature("Waiter", "", 2, 2, 2), P0, 0).unwrap();

    assert_eq!(
        board.declare_attack(SlotRef::new(P0, 0), SlotRef::new(P1, 0)),
        Err(PlayError::CreatureExhausted)
    );

    board.end_turn().unwrap();
    board.end_turn().unwrap();
    board.declare_attack(SlotRef::new(P0, 0), SlotRef::new(P1, 0)).unwrap();
}

// =============================================================================
// AI seat
// =============================================================================

/// With the AI on seat 1, ending our turn plays the AI's turn and returns control.
#[test]
fn test_ai_turn_runs_inline() {
    let mut board = Board::new(BoardConfig::default().with_ai().with_seed(3));
    let log = EventLog::default();
    board.add_observer(Box::new(log.clone()));

    board.end_turn().unwrap();

    assert_eq!(board.current_player(), P0);
    let events = log.events();
    assert_eq!(events.first(), Some(&BoardEvent::TurnStarted(P1)));
    assert_eq!(events.last(), Some(&BoardEvent::TurnStarted(P0)));
    // 4 mana on its first turn always buys something from a five-card hand
    assert!(events
        .iter()
        .any(|e| matches!(e, BoardEvent::CardPlayed { player, .. } if *player == P1)));
}

/// Two greedy seats eventually finish a game.
#[test]
fn test_greedy_match_finishes() {
    use cafe_wars::ai::TurnPolicy;
    use cafe_wars::GreedyPolicy;

    let mut board = Board::new(BoardConfig::default().with_ai().with_seed(9));
    for _ in 0..200 {
        if board.is_game_over() {
            break;
        }
        GreedyPolicy.take_turn(&mut board, P0);
        drain(&mut board);
        if board.end_turn().is_err() {
            break;
        }
        drain(&mut board);
        board.update(0.1);
    }

    let state = board.state();
    assert!(
        board.is_game_over() || state.players.iter().all(|(_, p)| p.deck.is_empty()),
        "game stalled with cards left to draw"
    );
}
