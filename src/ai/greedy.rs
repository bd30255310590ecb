//! Greedy heuristic: play whatever is affordable, then attack with everything.

use log::debug;

use crate::cards::CardKind;
use crate::core::{PlayerId, SlotRef};
use crate::rules::Board;

use super::TurnPolicy;

/// Greedy single-pass policy.
///
/// 1. Walk the hand left to right and play every affordable card.
///    Creatures and buildings go to the first empty own slot (skipped when
///    the board is full). Spells aim at the first enemy creature, or at
///    slot 0 when the enemy has none.
/// 2. Every own creature that can attack hits the first enemy creature
///    through the action queue. With no enemy creature it hits the enemy
///    player directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    fn play_cards(board: &mut Board, player: PlayerId) {
        let mut index = 0;
        loop {
            let (affordable, kind) = match board.state().player(player).hand.get(index) {
                Some(card) => (board.can_play_card(card, player), card.kind()),
                None => break,
            };
            if !affordable {
                index += 1;
                continue;
            }

            let slot = match kind {
                CardKind::Spell => board
                    .state()
                    .first_creature_slot(player.opponent())
                    .map_or(0, |at| at.slot),
                CardKind::Creature | CardKind::Building => match board.state().first_empty_slot(player) {
                    Some(at) => at.slot,
                    None => {
                        index += 1;
                        continue;
                    }
                },
            };

            // A successful play shifts the next card into `index`
            if let Err(err) = board.play_from_hand(player, index, slot) {
                debug!("greedy play of hand[{index}] into slot {slot} refused: {err}");
                index += 1;
            }
        }
    }

    fn attack(board: &mut Board, player: PlayerId) {
        let attackers: Vec<SlotRef> = board
            .state()
            .creature_slots(player)
            .filter(|&at| board.state().creature(at).is_some_and(|c| c.can_attack))
            .collect();

        for attacker in attackers {
            let result = match board.state().first_creature_slot(player.opponent()) {
                Some(target) => board.declare_attack(attacker, target),
                None => board.direct_attack(attacker).map(|_| ()),
            };
            if let Err(err) = result {
                debug!("greedy attack from {attacker} refused: {err}");
            }
        }
    }
}

impl TurnPolicy for GreedyPolicy {
    fn take_turn(&self, board: &mut Board, player: PlayerId) {
        if board.is_game_over() || board.current_player() != player {
            return;
        }
        Self::play_cards(board, player);
        Self::attack(board, player);
    }
}
