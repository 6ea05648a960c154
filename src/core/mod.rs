//! Core primitives.
//!
//! Character-level kana handling and deterministic state hashing.
//! Nothing here knows about players or turns.

pub mod kana;
pub mod hash;

// Re-export core types
pub use kana::{is_hiragana, LONG_VOWEL_MARK, TERMINAL_N};
pub use hash::{StateHash, compute_state_hash};
