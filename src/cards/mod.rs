//! Card system: card values and the standard catalog.
//!
//! ## Key Types
//!
//! - `Card`: name, description, cost and a `CardBody`
//! - `CardBody`: closed variant {Creature, Spell, Building}
//! - `CardKind`: kind tag with its persisted integer code
//! - `CardCatalog`: templates by name, including the standard 20-card set

pub mod card;
pub mod catalog;

pub use card::{Building, Card, CardBody, CardKind, Creature, Spell};
pub use catalog::CardCatalog;
