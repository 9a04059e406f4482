//! Turn and round state machine.
//!
//! Implements the rules on top of the board and movement resolver:
//! - Per-slot turn order with an extra turn on a six
//! - Three sixes in a row send a player back to the start
//! - Win on reaching the final cell
//! - A round-partitioned event log for display and replay

mod dice;
mod event_log;
mod invariants;
mod round;
mod state;

pub use dice::{DiceRoller, MAX_FACE, MIN_FACE, RandomDice, RecordingDice};
pub use event_log::{LogEntry, MATCH_STARTED, MatchLog, Round};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use round::{RoundOutcome, SIX_STREAK_PENALTY};
pub use state::{LastMove, MatchState, Status};
