//! Card values.
//!
//! A `Card` is shared data (name, description, cost) plus a `CardBody`
//! carrying the variant-specific stats. The variant set is closed: every
//! place that resolves a card matches on the body, so adding a kind is a
//! compile error until every rule handles it.

use serde::{Deserialize, Serialize};

/// Card kind tag.
///
/// The integer codes are part of the save-file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Creature,
    Spell,
    Building,
}

impl CardKind {
    /// Persisted integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            CardKind::Creature => 0,
            CardKind::Spell => 1,
            CardKind::Building => 2,
        }
    }

    /// Parse a persisted integer code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CardKind::Creature),
            1 => Some(CardKind::Spell),
            2 => Some(CardKind::Building),
            _ => None,
        }
    }

    /// Whether cards of this kind stay on the board after being played.
    #[must_use]
    pub const fn occupies_slot(self) -> bool {
        !matches!(self, CardKind::Spell)
    }
}

/// Creature stats.
///
/// Invariant: `0 <= health <= max_health` and `attack >= 0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Creature {
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    /// Cleared on play (summoning sickness) and after attacking.
    pub can_attack: bool,
}

impl Creature {
    /// A fresh, unhurt creature that cannot attack yet.
    #[must_use]
    pub fn new(attack: i32, health: i32) -> Self {
        let health = health.max(0);
        Self {
            attack: attack.max(0),
            health,
            max_health: health,
            can_attack: false,
        }
    }

    /// Lose `amount` health, staying within `[0, max_health]`.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount).min(self.max_health).max(0);
    }

    /// Regain `amount` health, never exceeding `max_health`.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount).min(self.max_health).max(0);
    }

    /// Raise attack by `amount`.
    pub fn buff(&mut self, amount: i32) {
        self.attack = self.attack.saturating_add(amount).max(0);
    }

    /// Lower attack by `amount`, never going below zero.
    pub fn debuff(&mut self, amount: i32) {
        self.attack = self.attack.saturating_sub(amount).max(0);
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Spell stats. A spell is consumed by resolving it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spell {
    pub effect_value: i32,
}

/// Building stats.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    /// Owner turn-ends left before the building crumbles.
    pub durability: i32,
    /// Mana regeneration granted to the owner while standing.
    pub boost: i32,
}

impl Building {
    /// Spend one turn of durability. Returns true once it has crumbled.
    pub fn decay(&mut self) -> bool {
        self.durability = self.durability.saturating_sub(1);
        self.durability <= 0
    }
}

/// Variant-specific card data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardBody {
    Creature(Creature),
    Spell(Spell),
    Building(Building),
}

/// A card.
///
/// ## Example
///
/// ```
/// use cafe_wars::cards::{Card, CardKind};
///
/// let barista = Card::creature("Barista", "A skilled coffee maker", 2, 2, 3);
/// assert_eq!(barista.kind(), CardKind::Creature);
/// assert_eq!(barista.as_creature().unwrap().max_health, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub description: String,
    pub mana_cost: i32,
    pub body: CardBody,
}

impl Card {
    #[must_use]
    pub fn creature(
        name: impl Into<String>,
        description: impl Into<String>,
        mana_cost: i32,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            mana_cost,
            body: CardBody::Creature(Creature::new(attack, health)),
        }
    }

    #[must_use]
    pub fn spell(
        name: impl Into<String>,
        description: impl Into<String>,
        mana_cost: i32,
        effect_value: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            mana_cost,
            body: CardBody::Spell(Spell { effect_value }),
        }
    }

    #[must_use]
    pub fn building(
        name: impl Into<String>,
        description: impl Into<String>,
        mana_cost: i32,
        durability: i32,
        boost: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            mana_cost,
            body: CardBody::Building(Building { durability, boost }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self.body {
            CardBody::Creature(_) => CardKind::Creature,
            CardBody::Spell(_) => CardKind::Spell,
            CardBody::Building(_) => CardKind::Building,
        }
    }

    #[must_use]
    pub fn as_creature(&self) -> Option<&Creature> {
        match &self.body {
            CardBody::Creature(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_creature_mut(&mut self) -> Option<&mut Creature> {
        match &mut self.body {
            CardBody::Creature(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_building(&self) -> Option<&Building> {
        match &self.body {
            CardBody::Building(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_building_mut(&mut self) -> Option<&mut Building> {
        match &mut self.body {
            CardBody::Building(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_spell(&self) -> Option<&Spell> {
        match &self.body {
            CardBody::Spell(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            CardBody::Creature(c) => write!(
                f,
                "{} ({}) {}/{}",
                self.name, self.mana_cost, c.attack, c.health
            ),
            CardBody::Spell(s) => write!(f, "{} ({}) effect {}", self.name, self.mana_cost, s.effect_value),
            CardBody::Building(b) => write!(
                f,
                "{} ({}) dur {} +{}",
                self.name, self.mana_cost, b.durability, b.boost
            ),
        }
    }
}
