//! Match configuration.
//!
//! A match is configured once, before the board is built. Configurations can
//! come from code, CLI flags or a TOML file:
//!
//! ```toml
//! rows = 5
//! cols = 5
//! layout = "classic"
//!
//! [mode]
//! kind = "versus_computer"
//! computers = 2
//! ```

use crate::board::{Cell, Layout, MIN_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fewest seats a match can have.
pub const MIN_PLAYERS: usize = 2;
/// Most seats a match can have.
pub const MAX_PLAYERS: usize = 8;

/// Who sits at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// One human in slot 0 against computer-controlled slots.
    VersusComputer {
        /// Computer opponents.
        computers: usize,
    },
    /// Every slot is a human sharing a room.
    Multiplayer {
        /// Human players.
        players: usize,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Self::VersusComputer { computers: 1 }
    }
}

/// Everything needed to start a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seating.
    pub mode: Mode,
    /// Fixed classic board or a generated one.
    pub layout: Layout,
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Ladders to generate (generated layout only).
    pub shortcuts: Option<usize>,
    /// Snakes to generate (generated layout only).
    pub setbacks: Option<usize>,
    /// Board generation seed.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            layout: Layout::Classic,
            rows: 10,
            cols: 10,
            shortcuts: None,
            setbacks: None,
            seed: None,
        }
    }
}

/// Error type for configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Fewer than [`MIN_PLAYERS`] seats.
    #[error("too few players: {0} (minimum {MIN_PLAYERS})")]
    TooFewPlayers(usize),
    /// More than [`MAX_PLAYERS`] seats.
    #[error("too many players: {0} (maximum {MAX_PLAYERS})")]
    TooManyPlayers(usize),
    /// Versus-computer mode without opponents.
    #[error("versus-computer mode needs at least one computer")]
    NoComputers,
    /// Grid with zero rows or columns.
    #[error("board grid {rows}x{cols} is empty")]
    EmptyGrid {
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        cols: u32,
    },
    /// Grid too small for hazards.
    #[error("board of {size} cells is too small (minimum {MIN_SIZE})")]
    BoardTooSmall {
        /// Cell count.
        size: Cell,
    },
    /// Classic layout requested for a size that has none.
    #[error("no classic layout for a board of {size} cells (use 5x5 or 10x10)")]
    NoClassicLayout {
        /// Cell count.
        size: Cell,
    },
}

impl MatchConfig {
    /// The small 5x5 classic board against one computer.
    #[must_use]
    pub fn small() -> Self {
        Self {
            rows: 5,
            cols: 5,
            ..Self::default()
        }
    }

    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load and parse a TOML file. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Total cells on the board.
    #[must_use]
    pub const fn size(&self) -> Cell {
        self.rows.saturating_mul(self.cols)
    }

    /// Total seats, humans and computers.
    #[must_use]
    pub const fn player_count(&self) -> usize {
        match self.mode {
            Mode::VersusComputer { computers } => computers.saturating_add(1),
            Mode::Multiplayer { players } => players,
        }
    }

    /// Whether `slot` is played by the computer.
    #[must_use]
    pub const fn is_computer(&self, slot: usize) -> bool {
        match self.mode {
            Mode::VersusComputer { .. } => slot != 0 && slot < self.player_count(),
            Mode::Multiplayer { .. } => false,
        }
    }

    /// Check the configuration can start a match.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Mode::VersusComputer { computers: 0 } = self.mode {
            return Err(ConfigError::NoComputers);
        }

        let players = self.player_count();
        if players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(players));
        }
        if players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(players));
        }

        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let size = self.size();
        if size < MIN_SIZE {
            return Err(ConfigError::BoardTooSmall { size });
        }
        if self.layout == Layout::Classic && size != 25 && size != 100 {
            return Err(ConfigError::NoClassicLayout { size });
        }

        Ok(())
    }
}
