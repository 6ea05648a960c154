//! Game Events
//!
//! Events recorded by a session for the rendering collaborator and for replay.

use serde::{Serialize, Deserialize};

use crate::error::ValidationOutcome;
use crate::game::state::GameState;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// Roster size changed during setup
    RosterResized {
        /// New roster size
        player_count: usize,
    },

    /// Names submitted, answering begins
    RosterSubmitted {
        /// Names in turn order
        names: Vec<String>,
    },

    /// Word joined the chain
    WordAccepted {
        /// Roster position of the author
        player_index: usize,
        /// Accepted word
        word: String,
    },

    /// Word refused; same player answers again
    WordRejected {
        /// Roster position of the answering player
        player_index: usize,
        /// Refused word
        word: String,
        /// Which checks failed
        outcome: ValidationOutcome,
    },

    /// Turn wrapped to the first player
    RoundAdvanced {
        /// Round just started
        round: u32,
    },
}

/// A game event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Monotonic position in the session's log
    pub sequence: u64,

    /// Round the event belongs to; a round wrap carries the round it starts
    pub round: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(sequence: u64, round: u32, data: GameEventData) -> Self {
        Self { sequence, round, data }
    }

    /// Player involved, if any.
    pub fn player_index(&self) -> Option<usize> {
        match &self.data {
            GameEventData::WordAccepted { player_index, .. }
            | GameEventData::WordRejected { player_index, .. } => Some(*player_index),
            _ => None,
        }
    }
}

/// Events implied by an accepted word moving `before` to `after`.
pub fn word_accepted_events(before: &GameState, after: &GameState, word: &str) -> Vec<GameEventData> {
    let mut events = Vec::with_capacity(2);

    if let Some(player_index) = before.current_player_index() {
        events.push(GameEventData::WordAccepted {
            player_index,
            word: word.to_string(),
        });
    }

    if after.round() > before.round() {
        events.push(GameEventData::RoundAdvanced { round: after.round() });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_player_index() {
        let accepted = GameEvent::new(0, 1, GameEventData::WordAccepted {
            player_index: 2,
            word: "りす".into(),
        });
        assert_eq!(accepted.player_index(), Some(2));

        let round = GameEvent::new(1, 2, GameEventData::RoundAdvanced { round: 2 });
        assert_eq!(round.player_index(), None);
    }

    #[test]
    fn test_word_accepted_events_include_round_wrap() {
        let state = GameState::new_game(EngineConfig::with_players(1))
            .unwrap()
            .submit_roster(&["A"])
            .unwrap();
        let next = state.submit_word("りす").unwrap();

        let events = word_accepted_events(&state, &next, "りす");
        assert_eq!(events, vec![
            GameEventData::WordAccepted { player_index: 0, word: "りす".into() },
            GameEventData::RoundAdvanced { round: 2 },
        ]);
    }

    #[test]
    fn test_event_json_tagging() {
        let event = GameEventData::RoundAdvanced { round: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"round_advanced","round":3}"#);
    }
}
