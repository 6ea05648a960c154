//! Player Colors
//!
//! Color tokens identify a player in the rendered chain.
//!
//! ## Profiles
//!
//! - `Hue`: `hsl(index * 100 mod 360, 50%, 50%)` for 1-based roster position
//! - `Palette`: fixed list of seven preset colors
//!
//! ## Highlighting
//!
//! Each syllable in the chain is colored by the player who first used it.

use serde::{Serialize, Deserialize};

use crate::core::kana::syllables;
use crate::error::EngineError;
use crate::game::state::{Author, GameState};

/// Preset colors for the `Palette` profile, by 1-based roster position.
pub const PALETTE: [&str; 7] = [
    "#e74c3c",
    "#3498db",
    "#2ecc71",
    "#f1c40f",
    "#9b59b6",
    "#e67e22",
    "#1abc9c",
];

/// Hue step between consecutive roster positions (degrees).
pub const HUE_STEP: usize = 100;

/// Opaque CSS color string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(pub String);

impl ColorToken {
    /// Borrow the CSS value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How colors are derived from roster position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorProfile {
    /// Procedural hue per position.
    #[default]
    Hue,
    /// Fixed preset palette.
    Palette,
}

impl ColorProfile {
    /// Stable tag for hashing.
    pub fn tag(self) -> u8 {
        match self {
            ColorProfile::Hue => 0,
            ColorProfile::Palette => 1,
        }
    }

    /// Largest roster this profile can color, if bounded.
    pub fn max_players(self) -> Option<usize> {
        match self {
            ColorProfile::Hue => None,
            ColorProfile::Palette => Some(PALETTE.len()),
        }
    }

    /// Color for a 1-based roster position.
    pub fn color_for_index(self, index: usize) -> Result<ColorToken, EngineError> {
        if index == 0 {
            return Err(EngineError::Configuration(
                "color index is 1-based, got 0".into(),
            ));
        }

        match self {
            ColorProfile::Hue => {
                // Reduce first so huge positions cannot overflow
                let hue = (index % 360) * HUE_STEP % 360;
                Ok(ColorToken(format!("hsl({hue}, 50%, 50%)")))
            }
            ColorProfile::Palette => PALETTE
                .get(index - 1)
                .map(|c| ColorToken((*c).to_string()))
                .ok_or_else(|| {
                    EngineError::Configuration(format!(
                        "palette has {} colors, index {index} requested",
                        PALETTE.len()
                    ))
                }),
        }
    }
}

/// Which player's color to look up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorSelector {
    /// 1-based roster position.
    ByIndex(usize),
    /// Player name.
    ByName(String),
}

impl ColorSelector {
    /// Build a selector from a string discriminant (`"index"` or `"name"`).
    pub fn from_key(key: &str, value: &str) -> Result<Self, EngineError> {
        match key {
            "index" => value.parse().map(ColorSelector::ByIndex).map_err(|_| {
                EngineError::Configuration(format!("color index `{value}` is not a number"))
            }),
            "name" => Ok(ColorSelector::ByName(value.to_string())),
            other => Err(EngineError::Configuration(format!(
                "the key `{other}` is not under consideration"
            ))),
        }
    }
}

/// One cell of the syllabary board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    /// Board syllable.
    pub syllable: char,
    /// Color of the player who first used it, if anyone has.
    pub color: Option<ColorToken>,
}

impl GameState {
    /// Look up a color by roster position or player name.
    ///
    /// Unknown names return `Ok(None)` unless the game was configured
    /// with strict lookups, in which case they fail with `NotFound`.
    pub fn color_for(&self, selector: &ColorSelector) -> Result<Option<ColorToken>, EngineError> {
        match selector {
            ColorSelector::ByIndex(index) => {
                self.config.color_profile.color_for_index(*index).map(Some)
            }
            ColorSelector::ByName(name) => {
                match self.players.iter().find(|p| p.name.as_deref() == Some(name.as_str())) {
                    Some(player) => Ok(Some(player.color.clone())),
                    None if self.config.strict_color_lookup => {
                        Err(EngineError::NotFound(name.clone()))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    /// Color of the player whose word first contains `character`.
    ///
    /// System-seeded entries never claim a syllable.
    pub fn color_for_first_occurrence(&self, character: &str) -> Option<ColorToken> {
        let entry = self.chain.iter().find(|entry| {
            !matches!(entry.submitted_by, Author::System) && entry.word.contains(character)
        })?;

        match &entry.submitted_by {
            Author::Player(name) => self.players.iter()
                .find(|p| p.name.as_deref() == Some(name.as_str()))
                .map(|p| p.color.clone()),
            Author::System => None,
        }
    }

    /// Color every board syllable by first occurrence.
    pub fn syllabary_board(&self) -> Vec<BoardCell> {
        let mut buf = [0u8; 4];
        syllables()
            .map(|syllable| BoardCell {
                syllable,
                color: self.color_for_first_occurrence(syllable.encode_utf8(&mut buf)),
            })
            .collect()
    }
}
