//! CLI command implementations for Ladders.

pub(crate) mod board;
pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod simulate;

mod output;

use clap::{Args, ValueEnum};
use ladders::board::Layout;
use ladders::config::{ConfigError, MatchConfig, Mode};
use ladders::replay::ReplayError;
use ladders::session::SessionError;
use ladders::snapshot::SnapshotError;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Flags that describe a match, layered over an optional TOML file.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct MatchArgs {
    /// TOML match config; the flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid rows (default: 10)
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns (default: 10)
    #[arg(long)]
    cols: Option<u32>,

    /// Computer opponents against one human (default: 1)
    #[arg(long, conflicts_with = "players")]
    computers: Option<usize>,

    /// Human players sharing the board, no computers
    #[arg(long)]
    players: Option<usize>,

    /// Use the fixed classic board (5x5 or 10x10 only)
    #[arg(long, conflicts_with = "generated")]
    classic: bool,

    /// Generate a random board
    #[arg(long)]
    generated: bool,

    /// Ladders on a generated board (default: scales with size)
    #[arg(long)]
    shortcuts: Option<usize>,

    /// Snakes on a generated board (default: scales with size)
    #[arg(long)]
    setbacks: Option<usize>,

    /// Seed for board generation (default: random)
    #[arg(long)]
    board_seed: Option<u64>,
}

impl MatchArgs {
    /// Build the match configuration: file first, then flags.
    ///
    /// A grid with no classic layout switches to a generated board unless
    /// `--classic` was given explicitly.
    pub(crate) fn resolve(&self) -> Result<MatchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(computers) = self.computers {
            config.mode = Mode::VersusComputer { computers };
        }
        if let Some(players) = self.players {
            config.mode = Mode::Multiplayer { players };
        }
        if self.shortcuts.is_some() {
            config.shortcuts = self.shortcuts;
        }
        if self.setbacks.is_some() {
            config.setbacks = self.setbacks;
        }
        if self.board_seed.is_some() {
            config.seed = self.board_seed;
        }

        if self.classic {
            config.layout = Layout::Classic;
        } else if self.generated {
            config.layout = Layout::Generated;
        } else if config.layout == Layout::Classic && !matches!(config.size(), 25 | 100) {
            log::info!(
                "No classic board for {}x{}, generating one",
                config.rows,
                config.cols
            );
            config.layout = Layout::Generated;
        }

        config.validate()?;
        Ok(config)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = MatchArgs::default().resolve().unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_resolve_switches_to_generated() {
        let args = MatchArgs {
            rows: Some(6),
            cols: Some(6),
            players: Some(3),
            ..MatchArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.layout, Layout::Generated);
        assert_eq!(config.mode, Mode::Multiplayer { players: 3 });
    }

    #[test]
    fn test_resolve_explicit_classic_is_checked() {
        let args = MatchArgs {
            rows: Some(6),
            cols: Some(6),
            classic: true,
            ..MatchArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
