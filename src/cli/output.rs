//! Output formatting utilities for CLI.

use ladders::board::{Board, Cell, HazardKind, serpentine_cells};
use ladders::game::{LogEntry, MatchLog, MatchState};
use ladders::session::Match;
use ladders::simulate::BatchStats;
use serde::Serialize;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult<'a> {
    /// Winning player number (1-based, null if unfinished).
    pub(super) winner: Option<usize>,
    /// Round counter when play stopped.
    pub(super) rounds: u32,
    /// Final token positions, by slot.
    pub(super) positions: &'a [Cell],
    /// Most recent narration line.
    pub(super) message: &'a str,
    /// Round-partitioned event log.
    pub(super) log: &'a MatchLog,
}

impl<'a> JsonMatchResult<'a> {
    /// Create from a match.
    pub(super) fn from_match(game: &'a Match) -> Self {
        Self::from_state(game.state(), game.winner())
    }

    /// Create from a bare state.
    pub(super) fn from_state(state: &'a MatchState, winner: Option<usize>) -> Self {
        Self {
            winner: winner.map(|slot| slot + 1),
            rounds: state.round_number(),
            positions: state.positions(),
            message: state.message(),
            log: state.log(),
        }
    }
}

/// One log entry as a single line.
pub(super) fn format_entry(entry: &LogEntry) -> String {
    match entry.player {
        Some(_) => format!("  {}", entry.text),
        None => format!("  * {}", entry.text),
    }
}

/// Format the round-partitioned log.
pub(super) fn format_log_text(log: &MatchLog) -> String {
    let mut output = String::new();
    for (i, round) in log.rounds().iter().enumerate() {
        if round.is_empty() {
            continue;
        }
        output.push_str(&format!("Round {}:\n", i + 1));
        for entry in round {
            output.push_str(&format_entry(entry));
            output.push('\n');
        }
    }
    output
}

/// Format a finished (or stopped) match as human-readable text.
pub(super) fn format_match_text(game: &Match) -> String {
    let mut output = String::new();
    let state = game.state();

    output.push_str(&format!(
        "Match: {} players on {} cells ({:?} board)\n\n",
        state.player_count(),
        game.board().size(),
        game.board().layout()
    ));
    output.push_str(&format_log_text(state.log()));
    output.push('\n');

    output.push_str("Final positions:\n");
    for (slot, position) in state.positions().iter().enumerate() {
        let seat = if game.config().is_computer(slot) {
            "computer"
        } else {
            "human"
        };
        output.push_str(&format!("  Player {} ({seat}): cell {position}\n", slot + 1));
    }

    match game.winner() {
        Some(slot) => output.push_str(&format!("\nWinner: Player {}\n", slot + 1)),
        None => output.push_str(&format!(
            "\nNo winner after {} rounds\n",
            state.round_number()
        )),
    }
    output
}

/// Format a board's hazards and its serpentine grid.
pub(super) fn format_board_text(board: &Board, rows: u32, cols: u32) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Board: {} cells ({:?})\n\n",
        board.size(),
        board.layout()
    ));

    output.push_str(&format!("Ladders ({}):\n", board.shortcuts().len()));
    for (from, to) in board.shortcuts() {
        output.push_str(&format!("  {from:>4} -> {to}\n"));
    }
    output.push_str(&format!("Snakes ({}):\n", board.setbacks().len()));
    for (from, to) in board.setbacks() {
        output.push_str(&format!("  {from:>4} -> {to}\n"));
    }

    if u64::from(rows) * u64::from(cols) != u64::from(board.size()) {
        return output;
    }

    let width = board.size().to_string().len();
    output.push('\n');
    let cells = serpentine_cells(rows, cols);
    for row in cells.chunks(cols as usize) {
        let line: Vec<String> = row
            .iter()
            .map(|&cell| {
                let marker = match board.hazard_at(cell) {
                    Some((HazardKind::Shortcut, _)) => 'L',
                    Some((HazardKind::Setback, _)) => 'S',
                    None => ' ',
                };
                format!("{cell:>width$}{marker}")
            })
            .collect();
        output.push_str(line.join(" ").trim_end());
        output.push('\n');
    }
    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Matches played.
    pub(super) games_played: u64,
    /// Per-player results.
    pub(super) players: Vec<JsonBatchPlayer>,
    /// Matches that hit the turn cap.
    pub(super) unfinished: u64,
    /// Mean final round counter.
    pub(super) avg_rounds: f64,
    /// Mean rolls per match.
    pub(super) avg_turns: f64,
    /// Three-sixes penalties across all matches.
    pub(super) penalties: u64,
    /// Ladders climbed across all matches.
    pub(super) shortcuts_taken: u64,
    /// Snakes slid down across all matches.
    pub(super) setbacks_taken: u64,
    /// Bounces off the final cell across all matches.
    pub(super) bounces: u64,
}

/// JSON-serializable per-player batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchPlayer {
    /// Player number (1-based).
    pub(super) player: usize,
    /// Matches won.
    pub(super) wins: u64,
    /// Share of matches won.
    pub(super) win_rate: f64,
}

impl JsonBatchResult {
    /// Create from batch stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        let players = stats
            .wins
            .iter()
            .enumerate()
            .map(|(i, &wins)| JsonBatchPlayer {
                player: i + 1,
                wins,
                win_rate: stats.win_rate(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            unfinished: stats.unfinished,
            avg_rounds: stats.avg_rounds(),
            avg_turns: stats.avg_turns(),
            penalties: stats.penalties,
            shortcuts_taken: stats.shortcuts_taken,
            setbacks_taken: stats.setbacks_taken,
            bounces: stats.bounces,
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Simulation Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, wins) in stats.wins.iter().enumerate() {
        let rate = stats.win_rate(i) * 100.0;
        output.push_str(&format!("  Player {}: {rate:.1}% ({wins} wins)\n", i + 1));
    }
    output.push_str(&format!("  Unfinished: {}\n\n", stats.unfinished));

    output.push_str(&format!("Average Match Length: {:.1} rounds ({:.1} rolls)\n", stats.avg_rounds(), stats.avg_turns()));
    output.push_str(&format!("Ladders climbed: {}\n", stats.shortcuts_taken));
    output.push_str(&format!("Snakes slid down: {}\n", stats.setbacks_taken));
    output.push_str(&format!("Bounces: {}\n", stats.bounces));
    output.push_str(&format!("Three-sixes penalties: {}\n", stats.penalties));

    output
}
