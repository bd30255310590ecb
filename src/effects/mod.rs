//! Effect application.
//!
//! `EffectResolver` turns a queued `Action` (or a resolving spell) into
//! state changes and reports each one as an `EffectOutcome`.

mod resolver;

pub use resolver::{EffectOutcome, EffectResolver};
