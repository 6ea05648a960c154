//! Engine Errors
//!
//! Contract violations by the caller surface as `EngineError`.
//! Rejected words are ordinary values carried by `SubmitError::Rejected`.

use serde::{Serialize, Deserialize};

use crate::game::state::Phase;

/// Result of running both validators on a submitted word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Word is hiragana after stripping long-vowel marks.
    pub is_hiragana: bool,
    /// Word continues the last chain entry.
    pub is_chained: bool,
}

impl ValidationOutcome {
    /// Outcome recorded before any word has been judged.
    pub const PASSED: Self = Self { is_hiragana: true, is_chained: true };

    /// Did both checks pass?
    pub fn is_accepted(&self) -> bool {
        self.is_hiragana && self.is_chained
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::PASSED
    }
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.is_hiragana, self.is_chained) {
            (true, true) => write!(f, "accepted"),
            (false, true) => write!(f, "not hiragana"),
            (true, false) => write!(f, "does not continue the chain"),
            (false, false) => write!(f, "not hiragana and does not continue the chain"),
        }
    }
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Unrecognized key, selector, or out-of-range setting.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation called in a phase that does not accept it.
    #[error("Operation `{operation}` is not valid during {phase}")]
    InvalidPhase {
        /// Operation that was attempted.
        operation: &'static str,
        /// Phase the game was in.
        phase: Phase,
    },

    /// Roster length differs from the configured player count.
    #[error("Roster has {got} names, expected {expected}")]
    RosterSize {
        /// Configured player count.
        expected: usize,
        /// Names supplied.
        got: usize,
    },

    /// A roster name was empty or blank.
    #[error("Player name at position {position} is empty")]
    EmptyPlayerName {
        /// Zero-based roster position.
        position: usize,
    },

    /// No player with this name.
    #[error("Player not found: {0}")]
    NotFound(String),
}

impl EngineError {
    /// Is this a programmer/integration error rather than a data problem?
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::Configuration(_)
                | EngineError::InvalidPhase { .. }
                | EngineError::RosterSize { .. }
        )
    }
}

/// Errors from `GameState::submit_word`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Word failed validation. The same player should try again.
    #[error("Word rejected: {0}")]
    Rejected(ValidationOutcome),

    /// Contract violation by the caller.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SubmitError {
    /// Validation outcome, if this was a rejection.
    pub fn outcome(&self) -> Option<ValidationOutcome> {
        match self {
            SubmitError::Rejected(outcome) => Some(*outcome),
            SubmitError::Engine(_) => None,
        }
    }
}
