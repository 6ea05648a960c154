//! # Shiritori Engine
//!
//! Rule engine and turn coordinator for multiplayer shiritori, the Japanese
//! word-chaining game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SHIRITORI ENGINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Character and hashing primitives          │
//! │  ├── kana.rs     - Hiragana check, small-kana tables         │
//! │  └── hash.rs     - State hashing for snapshots               │
//! │                                                              │
//! │  game/           - Game logic (synchronous, pure)            │
//! │  ├── rules.rs    - Chain validation, rule-set versions       │
//! │  ├── state.rs    - Game, player, and chain state             │
//! │  ├── turn.rs     - Roster setup and turn order               │
//! │  ├── color.rs    - Player colors and highlighting            │
//! │  └── events.rs   - Event log entries                         │
//! │                                                              │
//! │  config.rs       - Engine configuration                      │
//! │  error.rs        - Error taxonomy                            │
//! │  snapshot.rs     - JSON snapshots for resumption             │
//! │  session.rs      - Isolated per-game sessions                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutable Updates
//!
//! Every transition on [`GameState`] borrows the current state and returns
//! a new one. A rejected word or a misused operation leaves the caller's
//! state exactly as it was.
//!
//! ```
//! use shiritori::{EngineConfig, GameState};
//!
//! let game = GameState::new_game(EngineConfig::with_players(2))?
//!     .submit_roster(&["A", "B"])?;
//! let game = game.submit_word("りんご").unwrap();
//! assert_eq!(game.current_player().unwrap().name.as_deref(), Some("B"));
//! # Ok::<(), shiritori::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod session;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{EngineError, SubmitError, ValidationOutcome};
pub use game::rules::{RuleSet, is_chained};
pub use game::state::{GameState, Player, WordEntry, Author, Phase};
pub use game::color::{ColorToken, ColorProfile, ColorSelector};
pub use crate::core::kana::is_hiragana;
pub use session::{GameSession, SessionManager, SessionId};
pub use snapshot::Snapshot;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Word every chain starts from.
pub const SEED_WORD: &str = "しりとり";

/// Author name shown for the seed entry.
pub const SYSTEM_AUTHOR: &str = "System";

/// Smallest selectable roster.
pub const MIN_PLAYERS: usize = 1;

/// Largest selectable roster.
pub const MAX_PLAYERS: usize = 7;
