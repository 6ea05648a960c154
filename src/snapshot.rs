//! Session Snapshots
//!
//! JSON form of a `GameState` for resuming a session later.
//! The state hash travels with the state so a tampered or truncated
//! snapshot is refused on restore.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHash;
use crate::error::EngineError;
use crate::game::state::GameState;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot errors.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Not valid snapshot JSON.
    #[error("Snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Written by an incompatible version.
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    /// Hash field is not 64 hex characters.
    #[error("Malformed state hash")]
    MalformedHash,

    /// Stored hash does not match the restored state.
    #[error("State hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// Hash stored in the snapshot.
        expected: String,
        /// Hash of the decoded state.
        computed: String,
    },

    /// Decoded state violates an engine invariant.
    #[error("Invalid snapshot state: {0}")]
    InvalidState(#[from] EngineError),
}

/// Serialized game state plus integrity hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version
    pub version: u32,

    /// Hex-encoded SHA-256 state hash
    pub state_hash: String,

    /// Captured state
    pub state: GameState,
}

impl Snapshot {
    /// Capture a state.
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state_hash: hex::encode(state.compute_hash()),
            state: state.clone(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode JSON and verify version, hash, and invariants.
    pub fn restore(json: &str) -> Result<GameState, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        let expected = decode_hash(&snapshot.state_hash)?;
        let computed = snapshot.state.compute_hash();
        if expected != computed {
            return Err(SnapshotError::HashMismatch {
                expected: snapshot.state_hash,
                computed: hex::encode(computed),
            });
        }

        check_invariants(&snapshot.state)?;
        Ok(snapshot.state)
    }
}

fn decode_hash(encoded: &str) -> Result<StateHash, SnapshotError> {
    let bytes = hex::decode(encoded).map_err(|_| SnapshotError::MalformedHash)?;
    bytes.try_into().map_err(|_| SnapshotError::MalformedHash)
}

/// Structural checks a hand-edited snapshot could break even with a fresh hash.
fn check_invariants(state: &GameState) -> Result<(), EngineError> {
    use crate::game::state::Phase;

    let invalid = |msg: &str| Err(EngineError::Configuration(msg.to_string()));

    if state.chain_history().is_empty() {
        return invalid("chain is empty");
    }
    if state.round() == 0 {
        return invalid("round must start at 1");
    }
    if state.players().len() != state.config().player_count {
        return invalid("roster size differs from configured player count");
    }
    state.config().validate()?;

    match (state.phase(), state.current_player_index()) {
        (Phase::Setup, None) => Ok(()),
        (Phase::Answering, Some(i)) if i < state.players().len() => Ok(()),
        _ => invalid("current player does not match phase"),
    }
}
