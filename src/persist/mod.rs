//! Save and load.
//!
//! Two formats share one validated schema:
//!
//! - `text`: the line-oriented layout with comma-separated deck files
//!   beside it (`<path>.deck0`, `<path>.deck1`)
//! - `snapshot`: a versioned bincode image that also keeps the RNG position
//!
//! Loading always decodes and validates into a fresh `GameState` first, so
//! a bad file never leaves a board half-replaced.

pub mod deck_file;
pub mod schema;
pub mod snapshot;
pub mod text;

pub use schema::{PlayerRecord, SaveFile, MAX_STAT};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
