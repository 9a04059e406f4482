//! Round-partitioned event log.
//!
//! Entries are only ever appended, to the newest round. A new round is opened
//! when turn order wraps back to slot 0.

use serde::{Deserialize, Serialize};

/// Text of the first entry of every match.
pub const MATCH_STARTED: &str = "Match started.";

/// One line of narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Acting player slot, or `None` for system messages.
    pub player: Option<usize>,
    /// Human-readable text.
    pub text: String,
}

impl LogEntry {
    /// A message about a player's own action.
    #[must_use]
    pub fn player(slot: usize, text: impl Into<String>) -> Self {
        Self {
            player: Some(slot),
            text: text.into(),
        }
    }

    /// A message from the match itself.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            player: None,
            text: text.into(),
        }
    }
}

/// Entries of a single round, in order.
pub type Round = Vec<LogEntry>;

/// The whole log of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchLog {
    rounds: Vec<Round>,
}

impl MatchLog {
    /// A fresh log holding only the start message.
    #[must_use]
    pub fn started() -> Self {
        Self {
            rounds: vec![vec![LogEntry::system(MATCH_STARTED)]],
        }
    }

    /// Append to the newest round.
    pub fn push(&mut self, entry: LogEntry) {
        match self.rounds.last_mut() {
            Some(round) => round.push(entry),
            None => self.rounds.push(vec![entry]),
        }
    }

    /// Start a new, empty round.
    pub fn open_round(&mut self) {
        self.rounds.push(Vec::new());
    }

    /// All rounds, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round currently being written.
    #[must_use]
    pub fn current_round(&self) -> &[LogEntry] {
        self.rounds.last().map_or(&[], Vec::as_slice)
    }

    /// Every entry in append order.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.rounds.iter().flatten()
    }

    /// Total entry count across rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    /// Whether no entry was ever written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        Self::started()
    }
}
