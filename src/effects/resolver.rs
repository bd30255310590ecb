//! Effect resolution - applying actions and spells to game state.
//!
//! The resolver is stateless. Every application reports what it did as an
//! `EffectOutcome`, which observers and tests inspect instead of diffing
//! the whole state.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{Action, ActionKind, DrawOutcome, GameState, PlayerId, SlotRef};

/// What an applied effect did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// A creature took damage and survived.
    CreatureDamaged { at: SlotRef, damage: i32, health: i32 },
    /// A creature took lethal damage and left the board.
    CreatureDestroyed { at: SlotRef, card: Card },
    /// A player took damage (no creature in the target slot).
    PlayerDamaged { player: PlayerId, damage: i32, health: i32 },
    CreatureHealed { at: SlotRef, health: i32 },
    PlayerHealed { player: PlayerId, health: i32 },
    /// A creature's attack changed (buff or debuff).
    AttackChanged { at: SlotRef, attack: i32 },
    /// A buff or debuff found no creature.
    NoTarget { at: SlotRef },
    CardDrawn { player: PlayerId },
    /// The drawn card did not fit in the hand and was dropped.
    CardDiscarded { player: PlayerId, card: Card },
    DeckEmpty { player: PlayerId },
}

/// Applies effects to game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply one queued action.
    pub fn apply(state: &mut GameState, action: &Action) -> EffectOutcome {
        let outcome = match action.kind {
            ActionKind::Attack => Self::damage_slot(state, action.target, action.value),
            ActionKind::Heal => Self::heal_slot(state, action.target, action.value),
            ActionKind::Buff => match state.creature_mut(action.target) {
                Some(creature) => {
                    creature.buff(action.value);
                    EffectOutcome::AttackChanged {
                        at: action.target,
                        attack: creature.attack,
                    }
                }
                None => EffectOutcome::NoTarget { at: action.target },
            },
            ActionKind::Debuff => match state.creature_mut(action.target) {
                Some(creature) => {
                    creature.debuff(action.value);
                    EffectOutcome::AttackChanged {
                        at: action.target,
                        attack: creature.attack,
                    }
                }
                None => EffectOutcome::NoTarget { at: action.target },
            },
            ActionKind::DrawCard => Self::draw(state, action.target.player),
        };

        debug!("{:?} {} -> {}: {:?}", action.kind, action.source, action.target, outcome);
        outcome
    }

    /// Resolve a spell cast by `caster` aimed at `slot`.
    ///
    /// The spell lands on the opponent's slot at the same index: a creature
    /// there takes the damage, otherwise the opponent does.
    pub fn resolve_spell(state: &mut GameState, caster: PlayerId, slot: usize, value: i32) -> EffectOutcome {
        let target = SlotRef::new(caster.opponent(), slot);
        let outcome = Self::damage_slot(state, target, value);
        debug!("spell by {caster} at {target}: {outcome:?}");
        outcome
    }

    /// Damage the creature at `at`, or its owner when the slot holds no creature.
    pub fn damage_slot(state: &mut GameState, at: SlotRef, damage: i32) -> EffectOutcome {
        if let Some(creature) = state.creature_mut(at) {
            creature.take_damage(damage);
            if !creature.is_dead() {
                return EffectOutcome::CreatureDamaged {
                    at,
                    damage,
                    health: creature.health,
                };
            }
            return match state.take_slot(at) {
                Some(card) => EffectOutcome::CreatureDestroyed { at, card },
                None => EffectOutcome::NoTarget { at },
            };
        }

        let player = state.player_mut(at.player);
        player.take_damage(damage);
        EffectOutcome::PlayerDamaged {
            player: at.player,
            damage,
            health: player.health,
        }
    }

    /// Heal the creature at `at`, or its owner when the slot holds no creature.
    pub fn heal_slot(state: &mut GameState, at: SlotRef, amount: i32) -> EffectOutcome {
        if let Some(creature) = state.creature_mut(at) {
            creature.heal(amount);
            return EffectOutcome::CreatureHealed {
                at,
                health: creature.health,
            };
        }

        let player = state.player_mut(at.player);
        player.heal(amount);
        EffectOutcome::PlayerHealed {
            player: at.player,
            health: player.health,
        }
    }

    /// `player` draws one card.
    pub fn draw(state: &mut GameState, player: PlayerId) -> EffectOutcome {
        match state.player_mut(player).draw_card() {
            DrawOutcome::Drawn => EffectOutcome::CardDrawn { player },
            DrawOutcome::Discarded(card) => EffectOutcome::CardDiscarded { player, card },
            DrawOutcome::DeckEmpty => EffectOutcome::DeckEmpty { player },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BoardConfig;

    fn setup() -> GameState {
        GameState::new(&BoardConfig::default())
    }

    fn enemy(slot: usize) -> SlotRef {
        SlotRef::new(PlayerId::SECOND, slot)
    }

    fn ours(slot: usize) -> SlotRef {
        SlotRef::new(PlayerId::FIRST, slot)
    }

    #[test]
    fn test_attack_empty_slot_hits_player() {
        let mut state = setup();
        let outcome = EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(1), 4));

        assert_eq!(
            outcome,
            EffectOutcome::PlayerDamaged {
                player: PlayerId::SECOND,
                damage: 4,
                health: 16
            }
        );
        assert_eq!(state.player(PlayerId::SECOND).health, 16);
    }

    #[test]
    fn test_attack_damages_creature() {
        let mut state = setup();
        state.set_slot(enemy(2), Card::creature("Coffee Bean", "Tiny but energetic", 1, 1, 2));

        let outcome = EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(2), 1));

        assert_eq!(
            outcome,
            EffectOutcome::CreatureDamaged {
                at: enemy(2),
                damage: 1,
                health: 1
            }
        );
        assert_eq!(state.player(PlayerId::SECOND).health, 20);
    }

    #[test]
    fn test_lethal_attack_removes_creature() {
        let mut state = setup();
        state.set_slot(enemy(2), Card::creature("Waiter", "", 2, 2, 2));

        let outcome = EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(2), 3));

        match outcome {
            EffectOutcome::CreatureDestroyed { at, card } => {
                assert_eq!(at, enemy(2));
                assert_eq!(card.name, "Waiter");
            }
            other => panic!("expected destruction, got {other:?}"),
        }
        assert!(state.slot(enemy(2)).is_none());
        assert_eq!(state.player(PlayerId::SECOND).health, 20);
    }

    #[test]
    fn test_attack_on_building_hits_player() {
        let mut state = setup();
        state.set_slot(enemy(0), Card::building("Tip Jar", "", 1, 2, 1));

        EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(0), 5));

        assert_eq!(state.player(PlayerId::SECOND).health, 15);
        assert!(state.slot(enemy(0)).is_some());
    }

    #[test]
    fn test_player_damage_clamps() {
        let mut state = setup();
        EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(0), 50));
        assert_eq!(state.player(PlayerId::SECOND).health, 0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut state = setup();
        state.player_mut(PlayerId::FIRST).take_damage(3);
        EffectResolver::apply(&mut state, &Action::heal(ours(1), ours(1), 10));
        assert_eq!(state.player(PlayerId::FIRST).health, 20);

        state.set_slot(ours(2), Card::creature("Chef", "", 4, 3, 4));
        state.creature_mut(ours(2)).unwrap().take_damage(3);
        let outcome = EffectResolver::apply(&mut state, &Action::heal(ours(1), ours(2), 2));
        assert_eq!(outcome, EffectOutcome::CreatureHealed { at: ours(2), health: 3 });
    }

    #[test]
    fn test_buff_and_debuff() {
        let mut state = setup();
        state.set_slot(ours(0), Card::creature("Busboy", "", 1, 1, 1));

        EffectResolver::apply(&mut state, &Action::buff(ours(1), ours(0), 2));
        assert_eq!(state.creature(ours(0)).unwrap().attack, 3);

        let outcome = EffectResolver::apply(&mut state, &Action::debuff(ours(1), ours(0), 10));
        assert_eq!(outcome, EffectOutcome::AttackChanged { at: ours(0), attack: 0 });

        let missing = EffectResolver::apply(&mut state, &Action::buff(ours(1), ours(3), 2));
        assert_eq!(missing, EffectOutcome::NoTarget { at: ours(3) });
    }

    #[test]
    fn test_draw_card_action() {
        let mut state = setup();
        let outcome = EffectResolver::apply(&mut state, &Action::draw_card(PlayerId::FIRST));
        assert_eq!(outcome, EffectOutcome::DeckEmpty { player: PlayerId::FIRST });

        state.player_mut(PlayerId::FIRST).deck.add_card(Card::spell("Free Wifi", "", 3, 4));
        let outcome = EffectResolver::apply(&mut state, &Action::draw_card(PlayerId::FIRST));
        assert_eq!(outcome, EffectOutcome::CardDrawn { player: PlayerId::FIRST });
        assert_eq!(state.player(PlayerId::FIRST).hand.len(), 1);
    }

    #[test]
    fn test_spell_targets_mirrored_slot() {
        let mut state = setup();
        state.set_slot(enemy(3), Card::creature("Manager", "", 3, 2, 5));

        EffectResolver::resolve_spell(&mut state, PlayerId::FIRST, 3, 2);
        assert_eq!(state.creature(enemy(3)).unwrap().health, 3);

        EffectResolver::resolve_spell(&mut state, PlayerId::FIRST, 1, 3);
        assert_eq!(state.player(PlayerId::SECOND).health, 17);

        EffectResolver::resolve_spell(&mut state, PlayerId::SECOND, 1, 3);
        assert_eq!(state.player(PlayerId::FIRST).health, 17);
    }

    #[test]
    fn test_negative_attack_never_overheals() {
        let mut state = setup();
        state.set_slot(enemy(0), Card::creature("Coffee Bean", "", 1, 1, 3));
        state.creature_mut(enemy(0)).unwrap().take_damage(1);

        EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(0), -4));
        EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(1), -5));

        let bean = state.creature(enemy(0)).unwrap();
        assert_eq!((bean.health, bean.max_health), (3, 3));
        assert_eq!(state.player(PlayerId::SECOND).health, 20);

        EffectResolver::apply(&mut state, &Action::attack(ours(0), enemy(1), i32::MIN));
        assert_eq!(state.player(PlayerId::SECOND).health, 20);
    }

    #[test]
    fn test_draw_into_full_hand_discards() {
        let mut state = setup();
        let seat = state.player_mut(PlayerId::FIRST);
        for i in 0..5 {
            seat.hand.add_card(Card::spell(format!("Held {i}"), "", 1, 1)).unwrap();
        }
        seat.deck.add_card(Card::spell("Happy Hour", "", 4, 5));

        let outcome = EffectResolver::apply(&mut state, &Action::draw_card(PlayerId::FIRST));

        match outcome {
            EffectOutcome::CardDiscarded { player, card } => {
                assert_eq!(player, PlayerId::FIRST);
                assert_eq!(card.name, "Happy Hour");
            }
            other => panic!("expected a discard, got {other:?}"),
        }
        let seat = state.player(PlayerId::FIRST);
        assert_eq!(seat.hand.len(), 5);
        assert!(seat.deck.is_empty());
    }
}
