//! Game Session Management
//!
//! Hosts many independent games in one process. Each session owns its own
//! `GameState` behind a write lock, so at most one mutation per session is
//! in flight and sessions never share state.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::hash::short_hex;
use crate::error::{EngineError, SubmitError};
use crate::game::events::{word_accepted_events, GameEvent, GameEventData};
use crate::game::state::GameState;
use crate::game::turn::FormKey;
use crate::snapshot::{Snapshot, SnapshotError};

/// Unique session identifier.
pub type SessionId = [u8; 16];

/// Session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session with this ID.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Engine rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Snapshot could not be restored.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// A single game and its event log.
#[derive(Debug)]
pub struct GameSession {
    /// Unique session identifier.
    pub id: SessionId,
    /// Current game state.
    state: GameState,
    /// Events recorded so far.
    events: Vec<GameEvent>,
    /// Next event sequence number.
    next_sequence: u64,
    /// When session was created.
    created_at: DateTime<Utc>,
    /// When the state last changed.
    last_activity: DateTime<Utc>,
}

impl GameSession {
    /// Create a session around a fresh game.
    pub fn new(id: SessionId, config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::from_state(id, GameState::new_game(config)?))
    }

    /// Wrap an existing state (e.g. one restored from a snapshot).
    pub fn from_state(id: SessionId, state: GameState) -> Self {
        let now = Utc::now();
        Self {
            id,
            state,
            events: Vec::new(),
            next_sequence: 0,
            created_at: now,
            last_activity: now,
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// When this session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the state last changed.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    fn record(&mut self, data: GameEventData) {
        let round = self.state.round();
        self.record_in(round, data);
    }

    fn record_in(&mut self, round: u32, data: GameEventData) {
        let event = GameEvent::new(self.next_sequence, round, data);
        self.next_sequence += 1;
        self.events.push(event);
    }

    fn commit(&mut self, next: GameState) {
        self.state = next;
        self.last_activity = Utc::now();
    }

    /// Change the roster size during setup.
    pub fn resize_roster(&mut self, player_count: usize) -> Result<(), EngineError> {
        let next = self.state.resize_roster(player_count)?;
        self.commit(next);
        self.record(GameEventData::RosterResized { player_count });
        Ok(())
    }

    /// Name the roster and start answering.
    pub fn submit_roster<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EngineError> {
        let next = self.state.submit_roster(names)?;
        self.commit(next);
        self.record(GameEventData::RosterSubmitted {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        });
        Ok(())
    }

    /// Update the answer form text.
    pub fn set_pending_input(&mut self, text: impl Into<String>) -> Result<(), EngineError> {
        let next = self.state.set_pending_input(text)?;
        self.commit(next);
        Ok(())
    }

    /// Submit a word for the current player.
    ///
    /// A rejection stores the outcome on the state for UI feedback and
    /// otherwise leaves the game unchanged.
    pub fn submit_word(&mut self, word: &str) -> Result<(), SubmitError> {
        match self.state.submit_word(word) {
            Ok(next) => {
                let played_in = self.state.round();
                let events = word_accepted_events(&self.state, &next, word);
                self.commit(next);
                for data in events {
                    // A wrap belongs to the round it starts
                    let round = match &data {
                        GameEventData::RoundAdvanced { round } => *round,
                        _ => played_in,
                    };
                    self.record_in(round, data);
                }
                Ok(())
            }
            Err(SubmitError::Rejected(outcome)) => {
                let player_index = self.state.current_player_index().unwrap_or_default();
                let next = self.state.with_outcome(outcome);
                self.commit(next);
                self.record(GameEventData::WordRejected {
                    player_index,
                    word: word.to_string(),
                    outcome,
                });
                Err(SubmitError::Rejected(outcome))
            }
            Err(err) => Err(err),
        }
    }

    /// Dispatch a form submission by its string key.
    pub fn submit_form(&mut self, key: &str, fields: &[String]) -> Result<(), SubmitError> {
        match FormKey::from_key(key)? {
            FormKey::UserSetting => Ok(self.submit_roster(fields)?),
            FormKey::Answer => {
                let word = match fields.first() {
                    Some(word) => word.clone(),
                    None => self.state.pending_input().unwrap_or_default().to_string(),
                };
                self.submit_word(&word)
            }
        }
    }

    /// Capture the current state for later resumption.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

/// Manages all active sessions.
pub struct SessionManager {
    /// Active sessions.
    sessions: RwLock<BTreeMap<SessionId, Arc<RwLock<GameSession>>>>,
}

impl SessionManager {
    /// Create new session manager.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    async fn insert(&self, session: GameSession) -> SessionId {
        let id = session.id;
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Arc::new(RwLock::new(session)));
        id
    }

    /// Create a new session.
    pub async fn create_session(&self, config: EngineConfig) -> Result<SessionId, EngineError> {
        let id = uuid::Uuid::new_v4().into_bytes();
        let session = GameSession::new(id, config)?;

        info!(session = %uuid::Uuid::from_bytes(id), "session created");
        Ok(self.insert(session).await)
    }

    /// Resume a session from snapshot JSON under a new ID.
    pub async fn resume_session(&self, snapshot_json: &str) -> Result<SessionId, SessionError> {
        let state = Snapshot::restore(snapshot_json)?;
        let id = uuid::Uuid::new_v4().into_bytes();

        info!(
            session = %uuid::Uuid::from_bytes(id),
            state = %short_hex(&state.compute_hash()),
            round = state.round(),
            "session resumed"
        );
        Ok(self.insert(GameSession::from_state(id, state)).await)
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &SessionId) -> Option<Arc<RwLock<GameSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Run a mutation against one session under its write lock.
    pub async fn with_session<T, E, F>(&self, id: &SessionId, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameSession) -> Result<T, E>,
        E: From<SessionError>,
    {
        let session = self
            .get_session(id)
            .await
            .ok_or_else(|| SessionError::NotFound(uuid::Uuid::from_bytes(*id).to_string()))?;
        let mut guard = session.write().await;
        f(&mut guard)
    }

    /// Remove a session.
    pub async fn remove_session(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            debug!(session = %uuid::Uuid::from_bytes(*id), "session removed");
        }
        removed
    }

    /// Get active session count.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SessionError> for SubmitError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Engine(e) => SubmitError::Engine(e),
            other => SubmitError::Engine(EngineError::Configuration(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationOutcome;

    fn started_session() -> GameSession {
        let mut session = GameSession::new([0; 16], EngineConfig::with_players(2)).unwrap();
        session.submit_roster(&["A", "B"]).unwrap();
        session
    }

    #[test]
    fn test_rejection_persists_outcome_only() {
        let mut session = started_session();
        let before_chain = session.state().chain_history().to_vec();

        let err = session.submit_word("ぱん").unwrap_err();
        let outcome = ValidationOutcome { is_hiragana: true, is_chained: false };
        assert_eq!(err, SubmitError::Rejected(outcome));

        assert_eq!(session.state().last_outcome(), outcome);
        assert_eq!(session.state().chain_history(), before_chain.as_slice());
        assert_eq!(session.state().current_player_index(), Some(0));
    }

    #[test]
    fn test_accepted_word_resets_outcome_and_logs() {
        let mut session = started_session();
        session.submit_word("ABC").unwrap_err();
        session.submit_word("りんご").unwrap();
        session.submit_word("ごりら").unwrap();

        assert!(session.state().last_outcome().is_accepted());

        let kinds: Vec<&GameEventData> = session.events().iter().map(|e| &e.data).collect();
        assert!(matches!(kinds[0], GameEventData::RosterSubmitted { .. }));
        assert!(matches!(kinds[1], GameEventData::WordRejected { player_index: 0, .. }));
        assert!(matches!(kinds[2], GameEventData::WordAccepted { player_index: 0, .. }));
        assert!(matches!(kinds[3], GameEventData::WordAccepted { player_index: 1, .. }));
        assert!(matches!(kinds[4], GameEventData::RoundAdvanced { round: 2 }));

        let sequences: Vec<u64> = session.events().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);

        let rounds: Vec<u32> = session.events().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_submit_form_by_key() {
        let mut session = GameSession::new([0; 16], EngineConfig::with_players(1)).unwrap();
        session.submit_form("user_setting", &["A".to_string()]).unwrap();

        session.set_pending_input("りす").unwrap();
        session.submit_form("answer", &[]).unwrap();
        assert_eq!(session.state().last_entry().unwrap().word, "りす");

        let err = session.submit_form("unknown_form", &[]).unwrap_err();
        assert!(matches!(err, SubmitError::Engine(EngineError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_session_manager() {
        let manager = SessionManager::new();

        let session_id = manager.create_session(EngineConfig::with_players(2)).await.unwrap();
        assert_eq!(manager.session_count().await, 1);

        let session = manager.get_session(&session_id).await;
        assert!(session.is_some());

        assert!(manager.remove_session(&session_id).await);
        assert_eq!(manager.session_count().await, 0);
        assert!(!manager.remove_session(&session_id).await);
    }

    #[tokio::test]
    async fn test_invalid_config_creates_nothing() {
        let manager = SessionManager::new();
        let result = manager.create_session(EngineConfig::with_players(0)).await;
        assert!(result.is_err());
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let manager = SessionManager::new();
        let first = manager.create_session(EngineConfig::with_players(1)).await.unwrap();
        let second = manager.create_session(EngineConfig::with_players(1)).await.unwrap();

        manager
            .with_session(&first, |s| -> Result<(), SubmitError> {
                s.submit_roster(&["A"])?;
                s.submit_word("りんご")
            })
            .await
            .unwrap();

        let other = manager.get_session(&second).await.unwrap();
        let other = other.read().await;
        assert_eq!(other.state().chain_history().len(), 1);
        assert!(other.events().is_empty());

        let changed = manager.get_session(&first).await.unwrap();
        assert_eq!(changed.read().await.state().chain_history().len(), 2);
    }

    #[tokio::test]
    async fn test_with_unknown_session() {
        let manager = SessionManager::new();
        let result = manager
            .with_session(&[9; 16], |_s| -> Result<(), SessionError> { Ok(()) })
            .await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resume_from_snapshot() {
        let manager = SessionManager::new();
        let id = manager.create_session(EngineConfig::with_players(2)).await.unwrap();

        let json = manager
            .with_session(&id, |s| -> Result<String, SessionError> {
                s.submit_roster(&["A", "B"])?;
                Ok(s.snapshot().to_json()?)
            })
            .await
            .unwrap();

        let resumed = manager.resume_session(&json).await.unwrap();
        assert_ne!(resumed, id);

        let session = manager.get_session(&resumed).await.unwrap();
        let session = session.read().await;
        assert_eq!(session.state().current_player().unwrap().name.as_deref(), Some("A"));

        assert!(manager.resume_session("not json").await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_submissions_serialize() {
        let manager = Arc::new(SessionManager::new());
        let id = manager.create_session(EngineConfig::with_players(2)).await.unwrap();
        manager
            .with_session(&id, |s| -> Result<(), SessionError> { Ok(s.submit_roster(&["A", "B"])?) })
            .await
            .unwrap();

        // Both tasks race to answer the same turn; exactly one wins.
        let mut handles = Vec::new();
        for _ in 0..2 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move {
                manager
                    .with_session(&id, |s| s.submit_word("りんご"))
                    .await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);

        let session = manager.get_session(&id).await.unwrap();
        let session = session.read().await;
        assert_eq!(session.state().chain_history().len(), 2);
        assert_eq!(session.state().current_player_index(), Some(1));
    }
}
