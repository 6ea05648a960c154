//! Engine Configuration
//!
//! Selects the rule-set version and color profile for a game,
//! plus the roster size and lookup strictness.

use serde::{Serialize, Deserialize};

use crate::error::EngineError;
use crate::game::color::ColorProfile;
use crate::game::rules::RuleSet;
use crate::{MAX_PLAYERS, MIN_PLAYERS, SEED_WORD};

/// Configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of players (1-7).
    pub player_count: usize,
    /// Chaining rule-set version.
    pub rule_set: RuleSet,
    /// How player colors are derived from roster position.
    pub color_profile: ColorProfile,
    /// Fail name-based color lookups for unknown players instead of returning nothing.
    pub strict_color_lookup: bool,
    /// First chain entry, authored by the system.
    pub seed_word: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 1,
            rule_set: RuleSet::default(),
            color_profile: ColorProfile::default(),
            strict_color_lookup: false,
            seed_word: SEED_WORD.to_string(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with a given player count.
    pub fn with_players(player_count: usize) -> Self {
        Self { player_count, ..Default::default() }
    }

    /// Parse from JSON and validate. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and profile compatibility.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_player_count(self.player_count)?;

        if let Some(limit) = self.color_profile.max_players() {
            if self.player_count > limit {
                return Err(EngineError::Configuration(format!(
                    "{} players exceed the {}-color palette",
                    self.player_count, limit
                )));
            }
        }

        if self.seed_word.is_empty() {
            return Err(EngineError::Configuration("seed word is empty".into()));
        }

        Ok(())
    }
}

/// Check that a player count lies in the selectable range.
pub fn validate_player_count(count: usize) -> Result<(), EngineError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(EngineError::Configuration(format!(
            "player count {count} outside {MIN_PLAYERS}..={MAX_PLAYERS}"
        )))
    }
}
