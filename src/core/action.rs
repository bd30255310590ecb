//! Queued game effects.
//!
//! An `Action` is a deferred effect: the board enqueues it, the action queue
//! presents it for a fixed delay, and only then is it applied. Source and
//! target are board coordinates so a renderer can animate between them.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A board coordinate: one slot on one seat's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub player: PlayerId,
    pub slot: usize,
}

impl SlotRef {
    #[must_use]
    pub const fn new(player: PlayerId, slot: usize) -> Self {
        Self { player, slot }
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot {}", self.player, self.slot)
    }
}

/// What a queued action does when it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Damage the target creature, or the target player if the slot is empty.
    Attack,
    /// Heal the target creature, or the target player if the slot is empty.
    Heal,
    /// Raise the target creature's attack.
    Buff,
    /// Lower the target creature's attack (never below zero).
    Debuff,
    /// The target player draws a card.
    DrawCard,
}

/// A queued effect with its coordinates and magnitude.
///
/// ## Example
///
/// ```
/// use cafe_wars::core::{Action, ActionKind, PlayerId, SlotRef};
///
/// let attack = Action::attack(
///     SlotRef::new(PlayerId::FIRST, 0),
///     SlotRef::new(PlayerId::SECOND, 2),
///     4,
/// );
/// assert_eq!(attack.kind, ActionKind::Attack);
/// assert_eq!(attack.target.slot, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub source: SlotRef,
    pub target: SlotRef,
    pub value: i32,
}

impl Action {
    /// Create an action of any kind.
    #[must_use]
    pub fn new(kind: ActionKind, source: SlotRef, target: SlotRef, value: i32) -> Self {
        Self {
            kind,
            source,
            target,
            value,
        }
    }

    #[must_use]
    pub fn attack(source: SlotRef, target: SlotRef, damage: i32) -> Self {
        Self::new(ActionKind::Attack, source, target, damage)
    }

    #[must_use]
    pub fn heal(source: SlotRef, target: SlotRef, amount: i32) -> Self {
        Self::new(ActionKind::Heal, source, target, amount)
    }

    #[must_use]
    pub fn buff(source: SlotRef, target: SlotRef, amount: i32) -> Self {
        Self::new(ActionKind::Buff, source, target, amount)
    }

    #[must_use]
    pub fn debuff(source: SlotRef, target: SlotRef, amount: i32) -> Self {
        Self::new(ActionKind::Debuff, source, target, amount)
    }

    /// A draw for `player`. The slot coordinates only matter for presentation.
    #[must_use]
    pub fn draw_card(player: PlayerId) -> Self {
        let at = SlotRef::new(player, 0);
        Self::new(ActionKind::DrawCard, at, at, 1)
    }
}
