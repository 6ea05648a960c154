//! Turn Coordination
//!
//! The game's state machine. Every transition borrows the current state and
//! returns the next one; a failed transition leaves the caller's state as it was.
//!
//! ```text
//! SETUP ──submit_roster──▶ ANSWERING ──submit_word──▶ ANSWERING
//!   │                          │
//!   └─resize_roster            └─(player n-1 ▶ player 0: round += 1)
//! ```

use tracing::{debug, info};

use crate::config::{EngineConfig, validate_player_count};
use crate::core::kana::is_hiragana;
use crate::error::{EngineError, SubmitError, ValidationOutcome};
use crate::game::color::ColorProfile;
use crate::game::state::{Author, GameState, Phase, Player, WordEntry};

/// Form a UI collaborator can submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKey {
    /// Roster names.
    UserSetting,
    /// A word answer.
    Answer,
}

impl FormKey {
    /// Parse a form key. Unknown keys are a configuration error.
    pub fn from_key(key: &str) -> Result<Self, EngineError> {
        match key {
            "user_setting" => Ok(FormKey::UserSetting),
            "answer" => Ok(FormKey::Answer),
            other => Err(EngineError::Configuration(format!(
                "the form key `{other}` is not under consideration"
            ))),
        }
    }
}

/// Result of advancing the turn after an accepted word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnAdvance {
    /// Player who answered.
    pub from: usize,
    /// Player who answers next.
    pub to: usize,
    /// Did the turn wrap to the first player?
    pub new_round: bool,
}

/// Next turn holder for a roster of `player_count`.
pub fn next_turn(current: usize, player_count: usize) -> TurnAdvance {
    let next = current + 1;
    if next < player_count {
        TurnAdvance { from: current, to: next, new_round: false }
    } else {
        TurnAdvance { from: current, to: 0, new_round: true }
    }
}

fn build_roster(profile: ColorProfile, player_count: usize) -> Result<Vec<Player>, EngineError> {
    (1..=player_count)
        .map(|position| profile.color_for_index(position).map(Player::new))
        .collect()
}

impl GameState {
    /// Create a game in the setup phase with an unnamed roster.
    pub fn new_game(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let players = build_roster(config.color_profile, config.player_count)?;
        let seed = WordEntry::seed(config.seed_word.clone());

        info!(
            players = config.player_count,
            rule_set = ?config.rule_set,
            color_profile = ?config.color_profile,
            seed = %seed.word,
            "new game"
        );

        Ok(Self {
            phase: Phase::Setup,
            players,
            chain: vec![seed],
            round: 1,
            current_player_index: None,
            pending_input: None,
            last_outcome: ValidationOutcome::PASSED,
            config,
        })
    }

    fn require_phase(&self, phase: Phase, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(EngineError::InvalidPhase { operation, phase: self.phase })
        }
    }

    /// Change the roster size. Rebuilds every seat with fresh colors.
    pub fn resize_roster(&self, player_count: usize) -> Result<Self, EngineError> {
        self.require_phase(Phase::Setup, "resize_roster")?;
        validate_player_count(player_count)?;

        let config = EngineConfig { player_count, ..self.config.clone() };
        config.validate()?;

        let mut next = self.clone();
        next.players = build_roster(config.color_profile, player_count)?;
        next.config = config;

        debug!(players = player_count, "roster resized");
        Ok(next)
    }

    /// Name every seat and start the game with player 0 answering.
    ///
    /// Any empty or blank name rejects the whole roster.
    pub fn submit_roster<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, EngineError> {
        self.require_phase(Phase::Setup, "submit_roster")?;

        if names.len() != self.players.len() {
            return Err(EngineError::RosterSize {
                expected: self.players.len(),
                got: names.len(),
            });
        }

        if let Some(position) = names.iter().position(|n| n.as_ref().trim().is_empty()) {
            return Err(EngineError::EmptyPlayerName { position });
        }

        let mut next = self.clone();
        for (player, name) in next.players.iter_mut().zip(names) {
            player.name = Some(name.as_ref().to_string());
        }
        next.current_player_index = Some(0);
        next.phase = Phase::Answering;

        info!(
            players = next.players.len(),
            first = %names[0].as_ref(),
            "roster submitted, answering begins"
        );
        Ok(next)
    }

    /// Record the text currently typed into the answer form.
    pub fn set_pending_input(&self, text: impl Into<String>) -> Result<Self, EngineError> {
        self.require_phase(Phase::Answering, "set_pending_input")?;

        let mut next = self.clone();
        next.pending_input = Some(text.into());
        Ok(next)
    }

    /// Run both validators against the last chain entry.
    ///
    /// A state with no chain entry chains nothing.
    pub fn judge(&self, word: &str) -> ValidationOutcome {
        let rule_set = self.config.rule_set;
        ValidationOutcome {
            is_hiragana: is_hiragana(word),
            is_chained: self
                .last_entry()
                .is_some_and(|before| rule_set.is_chained(&before.word, word)),
        }
    }

    /// Submit a word for the current player.
    ///
    /// On acceptance the word joins the chain and the player's history,
    /// and the turn passes on. On rejection the caller's state is untouched
    /// and the same player answers again.
    pub fn submit_word(&self, word: &str) -> Result<Self, SubmitError> {
        self.require_phase(Phase::Answering, "submit_word")?;

        let current = self.current_player_index.ok_or(EngineError::InvalidPhase {
            operation: "submit_word",
            phase: self.phase,
        })?;

        if self.chain.is_empty() {
            return Err(EngineError::Configuration("chain has no seed entry".into()).into());
        }
        let name = self
            .players
            .get(current)
            .ok_or_else(|| {
                EngineError::Configuration(format!(
                    "current player {current} is outside a roster of {}",
                    self.players.len()
                ))
            })?
            .name
            .clone()
            .ok_or_else(|| EngineError::Configuration(format!("player {current} has no name")))?;

        let outcome = self.judge(word);
        if !outcome.is_accepted() {
            debug!(player = current, word, %outcome, "word rejected");
            return Err(SubmitError::Rejected(outcome));
        }

        let entry = WordEntry::new(word, Author::Player(name));

        let mut next = self.clone();
        next.chain.push(entry.clone());
        next.players[current].submitted_words.push(entry);
        next.pending_input = None;
        next.last_outcome = outcome;

        let advance = next_turn(current, next.players.len());
        next.current_player_index = Some(advance.to);
        if advance.new_round {
            next.round += 1;
            info!(round = next.round, "round advanced");
        }

        debug!(player = current, word, next = advance.to, chain_len = next.chain.len(), "word accepted");
        Ok(next)
    }

    /// Submit whatever is in the answer form. Missing input counts as empty.
    pub fn submit_pending(&self) -> Result<Self, SubmitError> {
        let word = self.pending_input.clone().unwrap_or_default();
        self.submit_word(&word)
    }

    /// Dispatch a form submission by key.
    ///
    /// `UserSetting` takes every field as a roster name. `Answer` takes the
    /// first field as the word, or falls back to the pending input.
    pub fn submit_form<S: AsRef<str>>(&self, key: FormKey, fields: &[S]) -> Result<Self, SubmitError> {
        match key {
            FormKey::UserSetting => Ok(self.submit_roster(fields)?),
            FormKey::Answer => match fields.first() {
                Some(word) => self.submit_word(word.as_ref()),
                None => self.submit_pending(),
            },
        }
    }
}
