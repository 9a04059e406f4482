//! Match state record.

use crate::board::{Board, Cell};
use crate::error::StateError;
use crate::game::event_log::{MATCH_STARTED, MatchLog};
use crate::game::round::SIX_STREAK_PENALTY;
use serde::{Deserialize, Serialize};

/// Whether a match can still be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Rounds may be played.
    #[default]
    InProgress,
    /// Somebody reached the final cell. Terminal.
    Finished,
}

/// The last resolved move, kept for animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Slot that moved.
    pub player: usize,
    /// Cell before the move.
    pub from: Cell,
    /// Cell after the move.
    pub to: Cell,
    /// Die value rolled.
    pub dice: u8,
    /// Landing cell when a hazard then moved the token; `None` for plain
    /// moves and penalty resets.
    pub pre_hazard_position: Option<Cell>,
}

/// Mutable state of one match.
///
/// Only [`MatchState::play_round`] changes it once a match is running.
/// Callers must serialize calls per match; the engine holds no locks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) positions: Vec<Cell>,
    pub(crate) current_player: usize,
    pub(crate) six_streak: Vec<u8>,
    pub(crate) status: Status,
    pub(crate) round_number: u32,
    pub(crate) log: MatchLog,
    pub(crate) last_move: Option<LastMove>,
    pub(crate) last_roll: Option<u8>,
    pub(crate) message: String,
}

impl MatchState {
    /// A new match with every token at the start.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoPlayers`] if `players` is 0.
    pub fn new(players: usize) -> Result<Self, StateError> {
        Self::from_positions(vec![0; players])
    }

    /// A running match with tokens already placed, streaks cleared and slot 0
    /// to move.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoPlayers`] if `positions` is empty.
    pub fn from_positions(positions: Vec<Cell>) -> Result<Self, StateError> {
        if positions.is_empty() {
            return Err(StateError::NoPlayers);
        }
        Ok(Self {
            six_streak: vec![0; positions.len()],
            positions,
            current_player: 0,
            status: Status::InProgress,
            round_number: 1,
            log: MatchLog::started(),
            last_move: None,
            last_roll: None,
            message: MATCH_STARTED.to_string(),
        })
    }

    /// Number of player slots.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.positions.len()
    }

    /// Token positions, by slot.
    #[must_use]
    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    /// Position of one slot.
    #[must_use]
    pub fn position(&self, slot: usize) -> Option<Cell> {
        self.positions.get(slot).copied()
    }

    /// Slot whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> usize {
        self.current_player
    }

    /// Consecutive sixes rolled, by slot.
    #[must_use]
    pub fn six_streak(&self) -> &[u8] {
        &self.six_streak
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether the match has a winner.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Current round, starting at 1.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The event log.
    #[must_use]
    pub const fn log(&self) -> &MatchLog {
        &self.log
    }

    /// Last resolved move.
    #[must_use]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Last die value rolled.
    #[must_use]
    pub const fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// Most recent narration line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Slot standing on the final cell once finished.
    #[must_use]
    pub fn winner(&self, board: &Board) -> Option<usize> {
        if !self.is_finished() {
            return None;
        }
        self.positions.iter().position(|&p| p == board.size())
    }

    /// Check this state fits `board` and could have been reached by play.
    ///
    /// Run on every state loaded from outside before playing on it. Covers
    /// shape (lengths, ranges, indices) and the game rules: no unpunished
    /// streak of three sixes, one log round per round number, and a token on
    /// the final cell exactly when the match is finished.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate_against(&self, board: &Board) -> Result<(), StateError> {
        let players = self.positions.len();
        if players == 0 {
            return Err(StateError::NoPlayers);
        }
        if self.six_streak.len() != players {
            return Err(StateError::LengthMismatch {
                field: "six_streak",
                expected: players,
                found: self.six_streak.len(),
            });
        }
        if let Some((slot, &position)) = self
            .positions
            .iter()
            .enumerate()
            .find(|&(_, &p)| p > board.size())
        {
            return Err(StateError::PositionOutOfRange {
                slot,
                position,
                size: board.size(),
            });
        }
        if self.current_player >= players {
            return Err(StateError::CurrentPlayerOutOfRange {
                index: self.current_player,
                players,
            });
        }
        if self.round_number == 0 {
            return Err(StateError::ZeroRound);
        }
        if self.log.rounds().is_empty() {
            return Err(StateError::EmptyLog);
        }
        let rounds = self.log.rounds().len();
        if u32::try_from(rounds).ok() != Some(self.round_number) {
            return Err(StateError::RoundMismatch {
                rounds,
                round_number: self.round_number,
            });
        }
        if let Some((slot, &streak)) = self
            .six_streak
            .iter()
            .enumerate()
            .find(|&(_, &s)| s >= SIX_STREAK_PENALTY)
        {
            return Err(StateError::SixStreakTooLong { slot, streak });
        }

        let mut at_goal = self
            .positions
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p == board.size())
            .map(|(slot, _)| slot);
        match self.status {
            Status::InProgress => {
                if let Some(slot) = at_goal.next() {
                    return Err(StateError::WinnerInRunningMatch { slot });
                }
            }
            Status::Finished => {
                let count = at_goal.count();
                if count != 1 {
                    return Err(StateError::FinishedWithoutWinner { at_goal: count });
                }
            }
        }
        Ok(())
    }
}
