//! Match recording and replay.
//!
//! Rounds are deterministic given the board and the die values, so a
//! recording only stores:
//! - the match configuration
//! - the board
//! - every die value, in order
//!
//! No state deltas are kept. To view step N, re-run the rolls from step 0 to N.
//!
//! # Time Travel
//!
//! - **Forward**: Resolve the next recorded roll
//! - **Backward**: Re-run from step 0 to (`step` - 1)
//! - **Jump to step N**: Re-run from step 0 to N

use crate::board::{Board, Cell};
use crate::config::{ConfigError, MatchConfig};
use crate::error::{InvalidStateError, StateError};
use crate::game::{MatchState, RoundOutcome};
use crate::session::Match;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Everything needed to replay a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Configuration the match was played with.
    pub config: MatchConfig,
    /// The board, stored whole so generated boards replay exactly.
    pub board: Board,
    /// Die values, one per resolved round.
    pub rolls: Vec<u8>,
}

impl Recording {
    /// Create a recording from its parts.
    #[must_use]
    pub const fn new(config: MatchConfig, board: Board, rolls: Vec<u8>) -> Self {
        Self {
            config,
            board,
            rolls,
        }
    }

    /// Record a match played from the start with `rolls`.
    #[must_use]
    pub fn from_match(game: &Match, rolls: Vec<u8>) -> Self {
        Self::new(*game.config(), game.board().clone(), rolls)
    }

    /// Save the recording as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a recording saved by [`Recording::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// recording.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Error type for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing a recording failed.
    #[error("recording I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The recording is not valid JSON for this format.
    #[error("invalid recording: {0}")]
    Json(#[from] serde_json::Error),
    /// The recorded configuration is invalid.
    #[error("invalid recording config: {0}")]
    Config(#[from] ConfigError),
    /// The initial state could not be built.
    #[error(transparent)]
    State(#[from] StateError),
    /// The stored board is not the one the configuration describes.
    #[error("config describes {expected} cells, recorded board has {found}")]
    BoardMismatch {
        /// Size from the configuration.
        expected: Cell,
        /// Size of the recorded board.
        found: Cell,
    },
    /// Step number out of bounds.
    #[error("step {requested} out of bounds (max: {max_step})")]
    StepOutOfBounds {
        /// Requested step.
        requested: usize,
        /// Last valid step.
        max_step: usize,
    },
    /// No recorded rolls left.
    #[error("end of recording")]
    EndOfRecording,
    /// The match already has a winner.
    #[error("match is already over")]
    GameOver,
}

impl From<InvalidStateError> for ReplayError {
    fn from(_: InvalidStateError) -> Self {
        Self::GameOver
    }
}

/// Replay engine - steps through a recorded match.
///
/// Since rounds are deterministic, this engine can:
/// - Step forward by resolving one recorded roll
/// - Step backward by replaying from step 0
/// - Jump to any step by replaying from step 0
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    state: MatchState,
    step: usize,
    last_outcome: Option<RoundOutcome>,
}

impl ReplayEngine {
    /// Create a replay engine positioned before the first roll.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded configuration or board is invalid.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        Self::new_at_step(recording, 0)
    }

    /// Create a replay engine positioned after `target_step` rolls.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording is invalid or `target_step` is past
    /// its end.
    pub fn new_at_step(recording: Recording, target_step: usize) -> Result<Self, ReplayError> {
        recording.config.validate()?;
        if recording.board.size() != recording.config.size() {
            return Err(ReplayError::BoardMismatch {
                expected: recording.config.size(),
                found: recording.board.size(),
            });
        }
        if target_step > recording.rolls.len() {
            return Err(ReplayError::StepOutOfBounds {
                requested: target_step,
                max_step: recording.rolls.len(),
            });
        }

        let state = MatchState::new(recording.config.player_count())?;
        let mut engine = Self {
            recording,
            state,
            step: 0,
            last_outcome: None,
        };

        while engine.step < target_step {
            engine.step_forward()?;
        }

        log::debug!("Replay positioned at step {}", engine.step);
        Ok(engine)
    }

    /// The recording being replayed.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// The recorded board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.recording.board
    }

    /// Rolls resolved so far.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Rolls in the recording.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.recording.rolls.len()
    }

    /// State after [`ReplayEngine::step`] rolls.
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Outcome of the most recent roll, if any.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// Whether the replayed match has a winner.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    /// Resolve the next recorded roll.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::GameOver`] after the win and
    /// [`ReplayError::EndOfRecording`] when the rolls run out.
    pub fn step_forward(&mut self) -> Result<RoundOutcome, ReplayError> {
        if self.state.is_finished() {
            return Err(ReplayError::GameOver);
        }
        let roll = *self
            .recording
            .rolls
            .get(self.step)
            .ok_or(ReplayError::EndOfRecording)?;

        let outcome = self
            .state
            .play_round(&self.recording.board, &mut || roll)?;
        self.step += 1;
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    /// Step backward one roll.
    ///
    /// This replays from step 0 to (`step` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at step 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.step == 0 {
            return Err(ReplayError::StepOutOfBounds {
                requested: 0,
                max_step: self.total_steps(),
            });
        }
        self.goto_step(self.step - 1)
    }

    /// Jump to a specific step by replaying from step 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is out of bounds.
    pub fn goto_step(&mut self, target_step: usize) -> Result<(), ReplayError> {
        if target_step > self.total_steps() {
            return Err(ReplayError::StepOutOfBounds {
                requested: target_step,
                max_step: self.total_steps(),
            });
        }
        let recording = self.recording.clone();
        *self = Self::new_at_step(recording, target_step)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RandomDice, RecordingDice};
    use tempfile::tempdir;

    fn recorded_match(seed: u64) -> (Match, Recording) {
        let mut game = Match::start(MatchConfig::small()).unwrap();
        let start = game.clone();
        let mut inner = RandomDice::seeded(seed);
        let mut dice = RecordingDice::new(&mut inner);
        game.play_to_end(&mut dice, 10_000).unwrap();
        let recording = Recording::from_match(&start, dice.into_rolls());
        (game, recording)
    }

    #[test]
    fn test_replay_reaches_same_state() {
        let (game, recording) = recorded_match(4);
        let steps = recording.rolls.len();

        let engine = ReplayEngine::new_at_step(recording, steps).unwrap();
        assert_eq!(engine.state(), game.state());
        assert!(engine.is_game_over());
        assert!(matches!(
            engine.last_outcome(),
            Some(RoundOutcome::Won { .. })
        ));
    }

    #[test]
    fn test_step_forward_and_back() {
        let (_, recording) = recorded_match(9);
        let mut engine = ReplayEngine::new(recording).unwrap();

        engine.step_forward().unwrap();
        engine.step_forward().unwrap();
        let after_two = engine.state().clone();
        engine.step_forward().unwrap();
        assert_eq!(engine.step(), 3);

        engine.step_backward().unwrap();
        assert_eq!(engine.step(), 2);
        assert_eq!(engine.state(), &after_two);

        engine.goto_step(0).unwrap();
        assert_eq!(engine.state().positions(), &[0, 0]);
        assert!(engine.step_backward().is_err());
    }

    #[test]
    fn test_end_of_recording() {
        let recording = Recording::new(
            MatchConfig::small(),
            Board::classic(25).unwrap(),
            vec![3, 4],
        );
        let mut engine = ReplayEngine::new(recording).unwrap();
        engine.step_forward().unwrap();
        engine.step_forward().unwrap();
        assert!(matches!(
            engine.step_forward(),
            Err(ReplayError::EndOfRecording)
        ));
        assert!(matches!(
            engine.goto_step(3),
            Err(ReplayError::StepOutOfBounds { requested: 3, max_step: 2 })
        ));
    }

    #[test]
    fn test_board_mismatch() {
        let recording = Recording::new(
            MatchConfig::default(),
            Board::classic(25).unwrap(),
            Vec::new(),
        );
        assert!(matches!(
            ReplayEngine::new(recording),
            Err(ReplayError::BoardMismatch { expected: 100, found: 25 })
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_, recording) = recorded_match(12);
        let dir = tempdir().unwrap();
        let path = dir.path().join("match.json");

        recording.save(&path).unwrap();
        let loaded = Recording::load(&path).unwrap();
        assert_eq!(loaded, recording);
    }

    #[test]
    fn test_load_rejects_tampered_board() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"config": {}, "board": {"size": 100, "shortcuts": {"10": 4}}, "rolls": []}"#,
        )
        .unwrap();
        assert!(matches!(Recording::load(&path), Err(ReplayError::Json(_))));
    }

    #[test]
    fn test_replay_error_display() {
        let err = ReplayError::StepOutOfBounds {
            requested: 9,
            max_step: 4,
        };
        assert_eq!(err.to_string(), "step 9 out of bounds (max: 4)");
    }
}
