//! A configured match: config, board and state kept together.
//!
//! [`MatchState::play_round`] knows nothing about who controls a slot.
//! [`Match`] adds seating on top: it refuses a human move out of turn, and
//! drives the computer slots in versus-computer mode.

use crate::board::{self, Board, GenerateOptions, Layout};
use crate::config::{ConfigError, MatchConfig};
use crate::error::{BoardError, GenerationError, InvalidStateError, StateError};
use crate::game::{DiceRoller, MatchState, RoundOutcome};
use serde::Serialize;
use thiserror::Error;

/// Error type for match sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configuration cannot start a match.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Board generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Board construction failed.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Initial state could not be built.
    #[error(transparent)]
    State(#[from] StateError),
    /// The match already has a winner.
    #[error(transparent)]
    Finished(#[from] InvalidStateError),
    /// A slot tried to move out of turn.
    #[error("it is player {}'s turn, not player {}'s", current + 1, slot + 1)]
    NotYourTurn {
        /// Slot that tried to move.
        slot: usize,
        /// Slot whose turn it is.
        current: usize,
    },
}

/// One match in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    config: MatchConfig,
    board: Board,
    state: MatchState,
}

impl Match {
    /// Validate `config`, build its board and seat every player at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn start(config: MatchConfig) -> Result<Self, SessionError> {
        let game = Self::build(config)?;
        log::info!(
            "Match started: {} players on {} cells ({:?} layout)",
            game.config.player_count(),
            game.board.size(),
            game.board.layout()
        );
        Ok(game)
    }

    /// [`Match::start`] without logging.
    pub(crate) fn build(config: MatchConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let board = build_board(&config)?;
        let state = MatchState::new(config.player_count())?;
        Ok(Self {
            config,
            board,
            state,
        })
    }

    /// Reassemble a match from checked parts.
    pub(crate) const fn from_parts(config: MatchConfig, board: Board, state: MatchState) -> Self {
        Self {
            config,
            board,
            state,
        }
    }

    /// The configuration this match was started with.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Winning slot, once finished.
    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.state.winner(&self.board)
    }

    /// Whether the slot to move is controlled by a person.
    #[must_use]
    pub fn is_human_turn(&self) -> bool {
        !self.state.is_finished() && !self.config.is_computer(self.state.current_player())
    }

    /// Resolve one round for whoever is to move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Finished`] once the match has a winner.
    pub fn play_round<D: DiceRoller + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> Result<RoundOutcome, SessionError> {
        Ok(self.state.play_round(&self.board, dice)?)
    }

    /// Resolve one round on behalf of `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotYourTurn`] if `slot` is not to move, or
    /// [`SessionError::Finished`] once the match has a winner.
    pub fn play_turn<D: DiceRoller + ?Sized>(
        &mut self,
        slot: usize,
        dice: &mut D,
    ) -> Result<RoundOutcome, SessionError> {
        if self.state.is_finished() {
            return Err(InvalidStateError.into());
        }
        let current = self.state.current_player();
        if slot != current {
            return Err(SessionError::NotYourTurn { slot, current });
        }
        self.play_round(dice)
    }

    /// Play rounds for computer slots until a human is to move or the match
    /// ends. Returns the number of rounds played.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Finished`] if called on a finished match.
    pub fn play_computer_turns<D: DiceRoller + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> Result<usize, SessionError> {
        if self.state.is_finished() {
            return Err(InvalidStateError.into());
        }
        let mut played = 0;
        while !self.state.is_finished() && self.config.is_computer(self.state.current_player()) {
            self.play_round(dice)?;
            played += 1;
        }
        Ok(played)
    }

    /// Play rounds for every slot until someone wins or `max_turns` rounds
    /// have been resolved. Returns the number of rounds played.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Finished`] if called on a finished match.
    pub fn play_to_end<D: DiceRoller + ?Sized>(
        &mut self,
        dice: &mut D,
        max_turns: u32,
    ) -> Result<u32, SessionError> {
        if self.state.is_finished() {
            return Err(InvalidStateError.into());
        }
        let mut played = 0;
        while !self.state.is_finished() && played < max_turns {
            self.play_round(dice)?;
            played += 1;
        }
        if !self.state.is_finished() {
            log::warn!("Match stopped after {played} turns without a winner");
        }
        Ok(played)
    }

    /// Start over with the same configuration.
    ///
    /// A generated board without a fixed seed is regenerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be rebuilt.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.board = build_board(&self.config)?;
        self.state = MatchState::new(self.config.player_count())?;
        log::info!("Match restarted");
        Ok(())
    }
}

/// Build the board a configuration asks for.
///
/// # Errors
///
/// Returns an error if no board of that shape can be built.
pub fn build_board(config: &MatchConfig) -> Result<Board, SessionError> {
    let size = config.size();
    let board = match config.layout {
        Layout::Classic => Board::classic(size)?,
        Layout::Generated => board::generate(
            size,
            &GenerateOptions {
                shortcuts: config.shortcuts,
                setbacks: config.setbacks,
                seed: config.seed,
            },
        )?,
    };
    Ok(board)
}
