//! Versioned binary snapshots.
//!
//! A snapshot is the complete `GameState` plus the RNG position, encoded
//! with bincode. The version is the first field and is checked before the
//! rest is decoded.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{BoardConfig, GameRng, GameRngState, GameState};
use crate::error::{PersistError, PersistResult};

use super::schema::SaveFile;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub board_width: usize,
    pub rng: GameRngState,
    pub state: GameState,
}

impl Snapshot {
    #[must_use]
    pub fn capture(state: &GameState, rng: &GameRng) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            board_width: state.board_width(),
            rng: rng.state(),
            state: state.clone(),
        }
    }
}

pub fn encode(state: &GameState, rng: &GameRng) -> PersistResult<Vec<u8>> {
    Ok(bincode::serialize(&Snapshot::capture(state, rng))?)
}

/// Decode and validate a snapshot for a board using `config`.
pub fn decode(bytes: &[u8], config: &BoardConfig) -> PersistResult<(GameState, GameRng)> {
    let version: u32 = bincode::deserialize(bytes)?;
    if version != SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let snapshot: Snapshot = bincode::deserialize(bytes)?;
    if snapshot.board_width != config.board_width {
        return Err(PersistError::Invalid(format!(
            "snapshot board width {} does not match {}",
            snapshot.board_width, config.board_width
        )));
    }

    let Snapshot { rng, state: saved, .. } = snapshot;
    if saved.game_ended != saved.winner.is_some() {
        return Err(PersistError::Invalid(
            "snapshot game-over flag disagrees with its winner".to_string(),
        ));
    }

    // Same checks as a text save, then rebuild so hands get this config's capacity
    let mut state = SaveFile::from_state(&saved).into_state(config)?;
    state.game_ended = saved.game_ended;
    state.winner = saved.winner;
    Ok((state, GameRng::from_state(&rng)))
}

pub fn save(path: &Path, state: &GameState, rng: &GameRng) -> PersistResult<()> {
    fs::write(path, encode(state, rng)?)?;
    Ok(())
}

pub fn load(path: &Path, config: &BoardConfig) -> PersistResult<(GameState, GameRng)> {
    decode(&fs::read(path)?, config)
}
