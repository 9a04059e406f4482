//! Error types for the round-resolution engine.
//!
//! Penalties, bounce-backs and wins are ordinary outcomes and never show up
//! here. Only conditions the caller has to act on are errors.

use thiserror::Error;

/// Board generation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Board is too small to place non-overlapping hazards.
    #[error("board of {size} cells is too small (minimum {min})")]
    BoardTooSmall {
        /// Requested cell count.
        size: u32,
        /// Smallest supported cell count.
        min: u32,
    },
}

/// A hazard map violates one of the board invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Board has fewer cells than the engine supports.
    #[error("board of {size} cells is too small (minimum {min})")]
    TooSmall {
        /// Requested cell count.
        size: u32,
        /// Smallest supported cell count.
        min: u32,
    },
    /// An entry touches cell 0, the final cell, or lies beyond it.
    #[error("hazard {from}->{to} leaves the playable range 1..{size}")]
    OutOfRange {
        /// Origin cell.
        from: u32,
        /// Destination cell.
        to: u32,
        /// Board size.
        size: u32,
    },
    /// A shortcut that does not climb.
    #[error("shortcut {from}->{to} does not move up")]
    ShortcutNotAscending {
        /// Origin cell.
        from: u32,
        /// Destination cell.
        to: u32,
    },
    /// A setback that does not descend.
    #[error("setback {from}->{to} does not move down")]
    SetbackNotDescending {
        /// Origin cell.
        from: u32,
        /// Destination cell.
        to: u32,
    },
    /// A cell is used by more than one hazard endpoint.
    #[error("cell {cell} is used by more than one hazard")]
    Overlap {
        /// The shared cell.
        cell: u32,
    },
    /// A classic layout was requested for a size that has none.
    #[error("no classic layout exists for a board of {size} cells")]
    NoClassicLayout {
        /// Requested cell count.
        size: u32,
    },
}

/// A round was requested on a match that already has a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("match is already finished")]
pub struct InvalidStateError;

/// A match state does not fit the board it is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// A match needs at least one player slot.
    #[error("match has no players")]
    NoPlayers,
    /// Per-slot vectors disagree on the number of players.
    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Expected entry count.
        expected: usize,
        /// Actual entry count.
        found: usize,
    },
    /// A token sits outside `0..=size`.
    #[error("player {slot} is on cell {position}, board has {size} cells")]
    PositionOutOfRange {
        /// Player slot.
        slot: usize,
        /// Stored position.
        position: u32,
        /// Board size.
        size: u32,
    },
    /// The current player index does not name a slot.
    #[error("current player {index} is not a slot (players: {players})")]
    CurrentPlayerOutOfRange {
        /// Stored index.
        index: usize,
        /// Number of slots.
        players: usize,
    },
    /// Round numbers start at 1.
    #[error("round number must be at least 1")]
    ZeroRound,
    /// The log must always contain an open round.
    #[error("event log has no open round")]
    EmptyLog,
    /// The log and the round counter disagree.
    #[error("event log has {rounds} rounds but the round number is {round_number}")]
    RoundMismatch {
        /// Rounds in the log.
        rounds: usize,
        /// Stored round number.
        round_number: u32,
    },
    /// A streak that should already have been penalized.
    #[error("player {slot} holds a streak of {streak} sixes")]
    SixStreakTooLong {
        /// Player slot.
        slot: usize,
        /// Stored streak.
        streak: u8,
    },
    /// A running match with a token already on the final cell.
    #[error("player {slot} is on the final cell but the match is still running")]
    WinnerInRunningMatch {
        /// Player slot.
        slot: usize,
    },
    /// A finished match needs exactly one token on the final cell.
    #[error("finished match has {at_goal} players on the final cell")]
    FinishedWithoutWinner {
        /// Tokens on the final cell.
        at_goal: usize,
    },
}
