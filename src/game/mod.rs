//! Game Logic Module
//!
//! All game rules and state transitions. Synchronous and deterministic.
//!
//! ## Module Structure
//!
//! - `rules`: Chain validation and rule-set versions
//! - `state`: Game, player, and chain entry state
//! - `turn`: Roster setup and turn coordination
//! - `color`: Player colors and history highlighting
//! - `events`: Game events for rendering and replay

pub mod rules;
pub mod state;
pub mod turn;
pub mod color;
pub mod events;

// Re-export key types
pub use rules::{RuleSet, is_chained};
pub use state::{GameState, Player, WordEntry, Author, Phase};
pub use turn::{FormKey, TurnAdvance};
pub use color::{ColorToken, ColorProfile, ColorSelector, BoardCell};
pub use events::{GameEvent, GameEventData};
