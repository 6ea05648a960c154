//! Game State Definitions
//!
//! All state types for a shiritori game.
//! State is an immutable-update value: transitions clone and return a new `GameState`.

use serde::{Serialize, Deserialize};

use crate::config::EngineConfig;
use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::error::ValidationOutcome;
use crate::game::color::ColorToken;
use crate::SYSTEM_AUTHOR;

// =============================================================================
// WORD ENTRY
// =============================================================================

/// Who added a chain entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The seed word.
    System,
    /// A named player.
    Player(String),
}

impl Author {
    /// Display name (`"System"` for the seed).
    pub fn name(&self) -> &str {
        match self {
            Author::System => SYSTEM_AUTHOR,
            Author::Player(name) => name,
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One accepted word in the chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word as submitted
    pub word: String,

    /// Who submitted it
    pub submitted_by: Author,
}

impl WordEntry {
    /// Create a new entry.
    pub fn new(word: impl Into<String>, submitted_by: Author) -> Self {
        Self { word: word.into(), submitted_by }
    }

    /// Create the system-authored seed entry.
    pub fn seed(word: impl Into<String>) -> Self {
        Self::new(word, Author::System)
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_str(&self.word);
        match &self.submitted_by {
            Author::System => hasher.update_u8(0),
            Author::Player(name) => {
                hasher.update_u8(1);
                hasher.update_str(name);
            }
        }
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// A seat in the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Name, filled in when the roster is submitted
    pub name: Option<String>,

    /// Color derived from roster position
    pub color: ColorToken,

    /// Words this player added, in order
    pub submitted_words: Vec<WordEntry>,
}

impl Player {
    /// Create an unnamed player.
    pub fn new(color: ColorToken) -> Self {
        Self {
            name: None,
            color,
            submitted_words: Vec::new(),
        }
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_opt_str(self.name.as_deref());
        hasher.update_str(self.color.as_str());
        hasher.update_u32(self.submitted_words.len() as u32);
        for entry in &self.submitted_words {
            entry.hash_into(hasher);
        }
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting the roster
    #[default]
    Setup,
    /// Players take turns answering
    Answering,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Answering => write!(f, "answering"),
        }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub(crate) phase: Phase,

    /// Roster in turn order
    pub(crate) players: Vec<Player>,

    /// Shared chain, never empty
    pub(crate) chain: Vec<WordEntry>,

    /// Round counter, starts at 1
    pub(crate) round: u32,

    /// Player whose turn it is (`None` during setup)
    pub(crate) current_player_index: Option<usize>,

    /// Text currently typed into the answer form
    pub(crate) pending_input: Option<String>,

    /// Result of the last judged submission
    pub(crate) last_outcome: ValidationOutcome,

    /// Configuration the game was created with
    pub(crate) config: EngineConfig,
}

impl GameState {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Roster in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Shared chain history, oldest first.
    pub fn chain_history(&self) -> &[WordEntry] {
        &self.chain
    }

    /// Most recent chain entry.
    ///
    /// `None` only for a state decoded without the seed entry.
    pub fn last_entry(&self) -> Option<&WordEntry> {
        self.chain.last()
    }

    /// Current round (1-based).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> Option<usize> {
        self.current_player_index
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_index.and_then(|i| self.players.get(i))
    }

    /// Is it this roster position's turn?
    pub fn is_current_turn(&self, index: usize) -> bool {
        self.current_player_index == Some(index)
    }

    /// Text in the answer form, if any.
    pub fn pending_input(&self) -> Option<&str> {
        self.pending_input.as_deref()
    }

    /// Result of the last judged submission.
    pub fn last_outcome(&self) -> ValidationOutcome {
        self.last_outcome
    }

    /// Configuration this game runs under.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of this state with a recorded validation outcome.
    ///
    /// Used to surface a rejection to the UI without touching anything else.
    #[must_use]
    pub fn with_outcome(&self, outcome: ValidationOutcome) -> Self {
        let mut next = self.clone();
        next.last_outcome = outcome;
        next
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.round, |hasher| {
            hasher.update_u8(match self.phase {
                Phase::Setup => 0,
                Phase::Answering => 1,
            });
            hasher.update_u8(self.config.rule_set.tag());
            hasher.update_u8(self.config.color_profile.tag());
            hasher.update_u32(self.config.player_count as u32);
            hasher.update_bool(self.config.strict_color_lookup);
            hasher.update_str(&self.config.seed_word);

            match self.current_player_index {
                Some(i) => {
                    hasher.update_bool(true);
                    hasher.update_u32(i as u32);
                }
                None => hasher.update_bool(false),
            }

            hasher.update_u32(self.players.len() as u32);
            for player in &self.players {
                player.hash_into(hasher);
            }

            hasher.update_u32(self.chain.len() as u32);
            for entry in &self.chain {
                entry.hash_into(hasher);
            }

            hasher.update_opt_str(self.pending_input.as_deref());
            hasher.update_bool(self.last_outcome.is_hiragana);
            hasher.update_bool(self.last_outcome.is_chained);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
